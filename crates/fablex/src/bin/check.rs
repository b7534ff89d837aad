use anyhow::{Context, Result};
use clap::Parser;
use fablex::{Token, ToolProperties};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

/// Tokenize Gerber / Excellon files and report characters no rule accepts.
#[derive(Parser)]
#[command(name = "check")]
struct Args {
    /// Files to tokenize.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print every token as a JSON line.
    #[arg(long)]
    json: bool,

    /// Only set the exit status.
    #[arg(long)]
    quiet: bool,
}

/// One `--json` output line: the token plus, for tool property groups, their parsed fields.
#[derive(Serialize)]
struct TokenRecord<'a> {
    #[serde(flatten)]
    token: Token<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_properties: Option<ToolProperties<'a>>,
}

impl<'a> From<Token<'a>> for TokenRecord<'a> {
    fn from(token: Token<'a>) -> Self {
        Self {
            tool_properties: token.tool_properties(),
            token,
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut failed = 0usize;
    for path in &args.files {
        match check_file(path, &args) {
            Ok(0) => {
                if !args.quiet && !args.json {
                    println!("OK {}", path.display());
                }
            }
            Ok(errors) => {
                if !args.quiet && !args.json {
                    println!("ERR {}: {errors} unmatched character(s)", path.display());
                }
                failed += 1;
            }
            Err(err) => {
                tracing::error!("{err:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Returns the number of error tokens in the file.
fn check_file(path: &Path, args: &Args) -> Result<usize> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read input {}", path.display()))?;

    tracing::info!("Tokenizing {} ({} bytes)", path.display(), input.len());

    let mut tokens = 0usize;
    let mut errors = 0usize;
    for token in fablex::lex(&input) {
        tokens += 1;
        if args.json {
            let line = serde_json::to_string(&TokenRecord::from(token))
                .context("failed to render token")?;
            println!("{line}");
        }
        if let Some(err) = token.as_error() {
            if !args.quiet {
                tracing::warn!("{}: {err}", path.display());
            }
            errors += 1;
        }
    }

    tracing::debug!("{}: {tokens} tokens, {errors} errors", path.display());
    Ok(errors)
}
