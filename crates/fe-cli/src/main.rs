//! `fe-parse`: parse Fe source files with the Fe grammar
//!
//! Prints an S-expression, a JSON AST, the token stream or highlight
//! captures for each file. Exits with 2 when the grammar cannot be loaded
//! and 1 when any file fails.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser as ClapParser, ValueEnum};
use fe_grammar::parser::{Lexer, TokenKind};
use fe_grammar::{Language, Parser, ParserConfig};
use tracing::{debug, info};

/// Output format for each parsed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// tree-sitter style S-expression
    Sexp,
    /// AST as JSON
    Json,
    /// One token per line
    Tokens,
    /// One highlight capture per line
    Highlight,
}

/// Command line arguments
#[derive(ClapParser, Debug)]
#[command(name = "fe-parse")]
#[command(about = "Parse Fe source files with the Fe grammar")]
struct Args {
    /// Files to parse; reads stdin when none are given
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Sexp)]
    format: Format,

    /// Maximum nesting depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Print name, version and table sizes of the loaded grammar
    #[arg(long)]
    language_info: bool,

    /// Print the grammar artifact JSON
    #[arg(long)]
    dump_artifact: bool,

    /// Load the grammar from an artifact file instead of the built-in one
    #[arg(long, value_name = "PATH")]
    artifact: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_tracing(args.verbose);

    let language = match load_language(args.artifact.as_deref()) {
        Ok(language) => language,
        Err(e) => {
            eprintln!("Error loading Fe grammar: {:#}", e);
            return ExitCode::from(2);
        }
    };
    info!(name = language.name(), version = language.version(), "Loaded grammar");

    if args.language_info {
        print_language_info(&language);
    }
    if args.dump_artifact {
        println!("{}", language.to_artifact_json());
    }
    if args.files.is_empty() && (args.language_info || args.dump_artifact) {
        return ExitCode::SUCCESS;
    }

    let mut config = ParserConfig::default();
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }

    let mut parser = Parser::new().with_config(config);
    if let Err(e) = parser.set_language(&language) {
        eprintln!("Error loading Fe grammar: {}", e);
        return ExitCode::from(2);
    }

    if args.files.is_empty() {
        return match read_stdin().and_then(|source| render(&mut parser, args.format, &source)) {
            Ok(output) => {
                println!("{}", output);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("<stdin>: {:#}", e);
                ExitCode::from(1)
            }
        };
    }

    let mut failed = 0usize;
    for path in &args.files {
        match process_file(&mut parser, args.format, path) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("{}: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    debug!(files = args.files.len(), failed, "Done");
    if failed > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("fe_parse=debug,fe_grammar=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_language(artifact: Option<&Path>) -> anyhow::Result<Language> {
    match artifact {
        Some(path) => fe_grammar::load_artifact(path)
            .with_context(|| format!("failed to load artifact {}", path.display())),
        None => {
            let language = fe_grammar::language();
            language.validate()?;
            Ok(language)
        }
    }
}

fn print_language_info(language: &Language) {
    println!("name: {}", language.name());
    println!("version: {}", language.version());
    println!("node kinds: {}", language.node_kind_count());
    println!("fields: {}", language.field_count());
}

fn read_stdin() -> anyhow::Result<String> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("failed to read stdin")?;
    Ok(source)
}

fn process_file(parser: &mut Parser, format: Format, path: &Path) -> anyhow::Result<String> {
    let source = std::fs::read_to_string(path).context("failed to read file")?;
    debug!(path = %path.display(), bytes = source.len(), "Read source");
    render(parser, format, &source)
}

fn render(parser: &mut Parser, format: Format, source: &str) -> anyhow::Result<String> {
    let output = match format {
        Format::Sexp => parser.parse(source)?.to_sexp(),
        Format::Json => serde_json::to_string_pretty(parser.parse(source)?.root())?,
        Format::Tokens => render_tokens(source)?,
        Format::Highlight => fe_grammar::highlight(source)?
            .iter()
            .map(|h| {
                let text = source.get(h.span.start..h.span.end).unwrap_or("");
                format!("{}:{}\t{}\t{}", h.span.line, h.span.column, h.capture, text)
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(output)
}

fn render_tokens(source: &str) -> anyhow::Result<String> {
    let mut lines = Vec::new();
    for token in Lexer::new(source).tokenize() {
        let label = match &token.kind {
            TokenKind::Eof => break,
            TokenKind::Error(message) => {
                bail!("{}:{}: {}", token.line(), token.column(), message)
            }
            TokenKind::Ident(_) => "identifier",
            TokenKind::NumberLit { .. } => "number_literal",
            TokenKind::StringLit(_) => "string_literal",
            TokenKind::Comment => "comment",
            kind => kind.node_kind().unwrap_or("token"),
        };
        lines.push(format!(
            "{}:{}\t{}\t{}",
            token.line(),
            token.column(),
            label,
            token.text
        ));
    }
    Ok(lines.join("\n"))
}
