//! Serializer that writes a qmldir AST back into canonical text.
//!
//! One line per command, single-space separated operands, comments
//! verbatim. Syntax-error pseudo-commands have no source form and are
//! omitted.

use std::fmt::Write as _;

use crate::ast::{Ast, CommandKind};

/// Format a qmldir AST into canonical qmldir text.
#[must_use]
pub fn format(ast: &Ast) -> String {
    let mut out = String::new();

    for command in &ast.commands {
        match &command.kind {
            CommandKind::Module { identifier } => {
                let _ = writeln!(out, "module {identifier}");
            }
            CommandKind::Singleton {
                type_name,
                initial_version,
                file,
            } => {
                let _ = writeln!(out, "singleton {type_name} {initial_version} {file}");
            }
            CommandKind::Internal { type_name, file } => {
                let _ = writeln!(out, "internal {type_name} {file}");
            }
            CommandKind::Resource {
                identifier,
                initial_version,
                file,
            } => {
                let _ = writeln!(out, "{identifier} {initial_version} {file}");
            }
            CommandKind::Plugin { name, path } => match path {
                Some(path) => {
                    let _ = writeln!(out, "plugin {name} {path}");
                }
                None => {
                    let _ = writeln!(out, "plugin {name}");
                }
            },
            CommandKind::Classname { identifier } => {
                let _ = writeln!(out, "classname {identifier}");
            }
            CommandKind::TypeInfo { file } => {
                let _ = writeln!(out, "typeinfo {file}");
            }
            CommandKind::Depends {
                module_identifier,
                initial_version,
            } => {
                let _ = writeln!(out, "depends {module_identifier} {initial_version}");
            }
            CommandKind::DesignerSupported => {
                out.push_str("designersupported\n");
            }
            CommandKind::Comment { text } => {
                let _ = writeln!(out, "{text}");
            }
            CommandKind::SyntaxError { .. } => {}
        }
    }

    out
}
