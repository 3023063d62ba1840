#![allow(dead_code)]

use qmldir_rs::{Ast, format, parse};

/// Parse tolerantly and assert the input had no malformed lines.
pub fn parse_clean(input: &str) -> Ast {
    let ast = parse(input);
    assert!(
        !ast.has_errors(),
        "unexpected syntax errors in:\n{input}\n--- ast ---\n{ast:#?}"
    );
    ast
}

/// Helper: canonical input must survive parse-then-format unchanged.
pub fn roundtrip(input: &str) {
    let ast = parse_clean(input);
    let output = format(&ast);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}
