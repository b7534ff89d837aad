//! The unified Gerber / Excellon rule table.
//!
//! Rules are tried in declaration order and the first one that matches at the cursor wins. The
//! order is load bearing: codes and header tokens must come before the generic `NUMBER` and
//! `CHAR` rules, otherwise `T001` would lex as `CHAR` + `NUMBER`.

use crate::token::TokenKind;
use regex::Regex;
use std::sync::LazyLock;

/// Maps a matched lexeme to its semantic value.
pub type Transform = fn(&str) -> &str;

/// Given input a rule failed on, returns how many bytes ahead the rule is certain to keep
/// failing at every offset.
pub type MissSpan = fn(&str) -> usize;

pub struct Rule {
    pub kind: TokenKind,
    pattern: Regex,
    transform: Transform,
    miss_span: Option<MissSpan>,
    /// The lexeme may contain line breaks that the cursor has to count.
    pub line_breaks: bool,
    /// The rule only applies at the start of a line.
    pub line_start: bool,
}

impl Rule {
    /// Returns the lexeme this rule matches at the start of `rest`, if any.
    ///
    /// Empty matches are rejected so every accepted rule makes progress.
    pub fn matches<'a>(&self, rest: &'a str, at_line_start: bool) -> Option<&'a str> {
        if self.line_start && !at_line_start {
            return None;
        }
        let found = self.pattern.find(rest)?;
        if found.start() != 0 || found.is_empty() {
            return None;
        }
        Some(found.as_str())
    }

    pub fn value<'a>(&self, lexeme: &'a str) -> &'a str {
        (self.transform)(lexeme)
    }

    /// Bytes of `rest` the rule can skip after failing on it; zero when unknown.
    pub fn miss_span(&self, rest: &str) -> usize {
        self.miss_span.map_or(0, |span| span(rest))
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

struct RuleDef {
    kind: TokenKind,
    pattern: &'static str,
    transform: Transform,
    miss_span: Option<MissSpan>,
    line_breaks: bool,
    line_start: bool,
}

const fn rule(kind: TokenKind, pattern: &'static str, transform: Transform) -> RuleDef {
    RuleDef {
        kind,
        pattern,
        transform,
        miss_span: None,
        line_breaks: false,
        line_start: false,
    }
}

const fn plain(kind: TokenKind, pattern: &'static str) -> RuleDef {
    rule(kind, pattern, identity)
}

/// Number of rules in the table.
pub const RULE_COUNT: usize = 20;

const DEFS: [RuleDef; RULE_COUNT] = [
    rule(TokenKind::TCode, r"T[0-9]+", code_value),
    rule(TokenKind::GCode, r"G[0-9]+", code_value),
    rule(TokenKind::MCode, r"M[0-9]+", code_value),
    rule(TokenKind::DCode, r"D[0-9]+", code_value),
    plain(TokenKind::Asterisk, r"\*"),
    plain(TokenKind::Percent, r"%"),
    rule(TokenKind::GerberFormat, r"FS[LTDAI]+", gerber_parameter),
    rule(TokenKind::GerberUnits, r"MO(?:IN|MM)", gerber_parameter),
    rule(TokenKind::GerberToolDef, r"ADD[0-9]+", tool_def_value),
    rule(TokenKind::DrillComment, r";[^\r\n]*", after_prefix),
    RuleDef {
        line_start: true,
        ..plain(TokenKind::DrillUnits, r"METRIC|INCH")
    },
    rule(TokenKind::DrillZeroInclusion, r",(?:TZ|LZ)", zero_inclusion),
    rule(TokenKind::DrillCoordFormat, r",0{1,8}\.0{1,8}", after_prefix),
    // "-" is illegal in a tool name but some writers emit it anyway
    RuleDef {
        miss_span: Some(tool_name_run),
        ..rule(
            TokenKind::GerberToolName,
            r"[A-Za-z_.$][A-Za-z0-9_.\-]*?,",
            without_trailing_comma,
        )
    },
    rule(TokenKind::DrillToolProps, r"(?:[CFSBHZ][0-9.]+)+", diameter),
    plain(TokenKind::Number, r"[+-]?[0-9.]+"),
    plain(TokenKind::Char, r"[XYZIJA]"),
    plain(TokenKind::Whitespace, r"[ \t]+"),
    RuleDef {
        line_breaks: true,
        ..plain(TokenKind::Newline, r"\r?\n")
    },
    // `#` has no meaning in either dialect and is reported as an error
    plain(TokenKind::Catchall, r"[^\s#]"),
];

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|def| Rule {
            kind: def.kind,
            pattern: Regex::new(&format!("^(?:{})", def.pattern))
                .unwrap_or_else(|err| panic!("invalid pattern for {}: {err}", def.kind)),
            transform: def.transform,
            miss_span: def.miss_span,
            line_breaks: def.line_breaks,
            line_start: def.line_start,
        })
        .collect()
});

/// The compiled rule table, in priority order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

fn identity(lexeme: &str) -> &str {
    lexeme
}

fn strip_leading_zeros(digits: &str) -> &str {
    match digits.trim_start_matches('0') {
        "" => "0",
        stripped => stripped,
    }
}

fn code_value(lexeme: &str) -> &str {
    strip_leading_zeros(&lexeme[1..])
}

fn tool_def_value(lexeme: &str) -> &str {
    strip_leading_zeros(&lexeme["ADD".len()..])
}

fn gerber_parameter(lexeme: &str) -> &str {
    &lexeme[2..]
}

fn after_prefix(lexeme: &str) -> &str {
    &lexeme[1..]
}

fn zero_inclusion(lexeme: &str) -> &str {
    &lexeme[1..2]
}

fn without_trailing_comma(lexeme: &str) -> &str {
    lexeme.strip_suffix(',').unwrap_or(lexeme)
}

fn is_tool_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '.' | '$')
}

fn is_tool_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// The identifier run a failed tool-name match walked over.
///
/// Every offset inside the run sees the same run end and the same missing comma, so the rule
/// fails there too. The run stops before a `$`, which may start a new name.
fn tool_name_run(rest: &str) -> usize {
    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, c)) if is_tool_name_start(c) => chars
            .find(|(_, c)| !is_tool_name_char(*c))
            .map_or(rest.len(), |(idx, _)| idx),
        _ => 0,
    }
}

fn diameter(lexeme: &str) -> &str {
    let Some(start) = lexeme.find('C') else {
        return "";
    };
    let len = lexeme[start + 1..]
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(lexeme.len() - start - 1);
    &lexeme[start..start + 1 + len]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_for(kind: TokenKind) -> &'static Rule {
        rules().iter().find(|rule| rule.kind == kind).unwrap()
    }

    #[test]
    fn table_compiles_every_kind_but_error() {
        let kinds: Vec<_> = rules().iter().map(|rule| rule.kind).collect();
        let expected: Vec<_> = TokenKind::ALL
            .into_iter()
            .filter(|kind| *kind != TokenKind::Error)
            .collect();
        assert_eq!(kinds, expected);
    }

    #[test]
    fn patterns_are_anchored() {
        for rule in rules() {
            assert!(rule.pattern().starts_with("^(?:"), "{}", rule.kind);
        }
    }

    #[test]
    fn code_values_strip_leading_zeros() {
        let t = rule_for(TokenKind::TCode);
        assert_eq!(t.value("T001"), "1");
        assert_eq!(t.value("T0"), "0");
        assert_eq!(t.value("T000"), "0");
        assert_eq!(t.value("T10"), "10");
        assert_eq!(rule_for(TokenKind::GerberToolDef).value("ADD010"), "10");
        assert_eq!(rule_for(TokenKind::GerberToolDef).value("ADD00"), "0");
    }

    #[test]
    fn diameter_is_first_c_group() {
        let props = rule_for(TokenKind::DrillToolProps);
        assert_eq!(props.value("C0.5F10S20"), "C0.5");
        assert_eq!(props.value("F10C.8S20"), "C.8");
        assert_eq!(props.value("S20C1.25"), "C1.25");
        assert_eq!(props.value("F10S20"), "");
    }

    #[test]
    fn tool_name_match_is_lazy_up_to_first_comma() {
        let name = rule_for(TokenKind::GerberToolName);
        assert_eq!(name.matches("My-Tool1,C,0.5", false), Some("My-Tool1,"));
        assert_eq!(name.matches("NoComma", false), None);
        assert_eq!(name.matches("1abc,", false), None);
    }

    #[test]
    fn tool_name_miss_span_covers_identifier_run() {
        let name = rule_for(TokenKind::GerberToolName);
        assert_eq!(name.miss_span("abc*"), 3);
        assert_eq!(name.miss_span("a-b.c"), 5);
        assert_eq!(name.miss_span("ab$cd,"), 2);
        assert_eq!(name.miss_span("1abc"), 0);
        assert_eq!(name.miss_span("*"), 0);
        assert_eq!(rule_for(TokenKind::Number).miss_span("abc"), 0);
    }

    #[test]
    fn drill_units_require_line_start() {
        let units = rule_for(TokenKind::DrillUnits);
        assert_eq!(units.matches("METRIC,TZ", true), Some("METRIC"));
        assert_eq!(units.matches("INCH", false), None);
    }

    #[test]
    fn comment_stops_before_carriage_return() {
        let comment = rule_for(TokenKind::DrillComment);
        assert_eq!(comment.matches(";hello\r\nX1", false), Some(";hello"));
        assert_eq!(comment.value(";hello"), "hello");
        assert_eq!(comment.value(";"), "");
    }

    #[test]
    fn catchall_rejects_hash_and_whitespace() {
        let catchall = rule_for(TokenKind::Catchall);
        assert_eq!(catchall.matches("#", false), None);
        assert_eq!(catchall.matches("\r", false), None);
        assert_eq!(catchall.matches("\u{a0}", false), None);
        assert_eq!(catchall.matches("N10", false), Some("N"));
        for other in ["[", "]", "~", "^", "`", "é", "µm"] {
            assert_eq!(
                catchall.matches(other, false).map(|m| m.chars().count()),
                Some(1),
                "{other:?}"
            );
        }
    }
}
