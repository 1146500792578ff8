//! Corpus tests in tree-sitter format
//!
//! Each file under `tests/corpus/` holds cases of the form
//!
//! ```text
//! ==================
//! Name
//! ==================
//!
//! source
//!
//! ---
//!
//! (expected s-expression)
//! ```

use fe_grammar::{language, Parser};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct CorpusCase {
    name: String,
    source: String,
    expected: String,
}

fn corpus_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("corpus")
}

fn is_rule(line: &str, ch: char) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == ch)
}

/// Collapse whitespace so multi-line expectations compare against one line
fn normalize(sexp: &str) -> String {
    sexp.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_corpus(text: &str) -> Vec<CorpusCase> {
    let lines: Vec<&str> = text.lines().collect();
    let mut cases = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !is_rule(lines[i].trim_end(), '=') {
            i += 1;
            continue;
        }

        let name = lines.get(i + 1).map(|l| l.trim().to_string()).unwrap_or_default();
        i += 3;

        let mut source = Vec::new();
        while i < lines.len() && !is_rule(lines[i].trim_end(), '-') {
            source.push(lines[i]);
            i += 1;
        }
        i += 1;

        let mut expected = Vec::new();
        while i < lines.len() && !is_rule(lines[i].trim_end(), '=') {
            expected.push(lines[i]);
            i += 1;
        }

        cases.push(CorpusCase {
            name,
            source: source.join("\n").trim().to_string(),
            expected: normalize(&expected.join("\n")),
        });
    }

    cases
}

fn corpus_files() -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(corpus_dir())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    files
}

fn run_corpus_file(path: &Path) -> usize {
    let text = fs::read_to_string(path).unwrap();
    let cases = parse_corpus(&text);
    assert!(!cases.is_empty(), "No cases in {}", path.display());

    let mut parser = Parser::new();
    parser.set_language(&language()).expect("Error loading Fe grammar");

    let mut failures = Vec::new();
    for case in &cases {
        match parser.parse(&case.source) {
            Ok(tree) => {
                let actual = tree.to_sexp();
                if actual != case.expected {
                    failures.push(format!(
                        "{}\n  expected: {}\n  actual:   {}",
                        case.name, case.expected, actual
                    ));
                }
            }
            Err(e) => failures.push(format!("{}\n  parse error: {}", case.name, e)),
        }
    }

    assert!(
        failures.is_empty(),
        "{} corpus failures in {}:\n{}",
        failures.len(),
        path.display(),
        failures.join("\n")
    );
    cases.len()
}

#[test]
fn test_corpus_reader() {
    let cases = parse_corpus(
        "===\nOne\n===\n\nfn f() {}\n\n---\n\n(source_file\n  (x))\n\n===\nTwo\n===\n---\n(source_file)\n",
    );

    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].name, "One");
    assert_eq!(cases[0].source, "fn f() {}");
    assert_eq!(cases[0].expected, "(source_file (x))");
    assert_eq!(cases[1].source, "");
    assert_eq!(cases[1].expected, "(source_file)");
}

#[test]
fn test_definitions_corpus() {
    assert_eq!(run_corpus_file(&corpus_dir().join("definitions.txt")), 8);
}

#[test]
fn test_expressions_corpus() {
    assert_eq!(run_corpus_file(&corpus_dir().join("expressions.txt")), 5);
}

#[test]
fn test_all_corpus_files() {
    let files = corpus_files();
    assert!(files.len() >= 2);

    let total: usize = files.iter().map(|path| run_corpus_file(path)).sum();
    assert!(total >= 12);
}
