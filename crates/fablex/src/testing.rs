use std::fmt::Write as _;

/// Renders one token per line as `line:column KIND "lexeme"`, followed by `=> "value"` when the
/// value differs from the lexeme.
pub fn snapshot_tokens_from_str(input: &str) -> String {
    let mut out = String::new();
    for token in crate::lex(input) {
        let _ = write!(
            out,
            "{}:{} {} {:?}",
            token.line, token.column, token.kind, token.lexeme
        );
        if token.value != token.lexeme {
            let _ = write!(out, " => {:?}", token.value);
        }
        out.push('\n');
    }
    out
}
