//! Lexer, parser, and semantic model for `qmldir` QML module
//! definition files.
//!
//! A line-oriented pipeline: byte stream → [`Lexer`] → token stream →
//! [`parse`] → [`Ast`] (ordered command list, including comments and
//! syntax-error pseudo-commands) → [`reduce`] → flat [`Document`]
//! record.
//!
//! # Quick start
//!
//! ## Parse and reduce a qmldir file
//!
//! ```
//! use qmldir_rs::{parse, reduce};
//!
//! let input = "module My.Module\nplugin myplugin\nMyType 1.0 MyType.qml\n";
//! let ast = parse(input);
//! let document = reduce(&ast);
//! assert_eq!(document.module_identifier.as_deref(), Some("My.Module"));
//! assert_eq!(document.resources.len(), 1);
//! ```
//!
//! ## Tolerant parsing keeps going past malformed lines
//!
//! ```
//! use qmldir_rs::{CommandKind, parse};
//!
//! let ast = parse("plugin\nmodule Foo\n");
//! assert_eq!(ast.commands.len(), 2);
//! assert!(matches!(ast.commands[0].kind, CommandKind::SyntaxError { .. }));
//! assert!(matches!(ast.commands[1].kind, CommandKind::Module { .. }));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod document;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Ast, Command, CommandKind, Version, Word};
pub use document::{Dependency, Document, Plugin, Resource, reduce};
pub use formatter::format;
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseError, ParseErrorKind, PendingNode, parse, parse_strict};
pub use token::{Position, SourceLocation, Token, TokenKind};

/// Parse a qmldir source tolerantly and reduce it to its semantic
/// record in one step.
#[must_use]
pub fn parse_document(input: &str) -> Document {
    reduce(&parse(input))
}
