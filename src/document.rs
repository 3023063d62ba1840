use std::path::PathBuf;

use crate::ast::{Ast, CommandKind};

/// Flat semantic record reduced from a parsed qmldir document.
///
/// Constructed once from a complete [`Ast`] in a single pass and
/// immutable thereafter. Singular fields are first-occurrence-wins;
/// plural fields accumulate in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub module_identifier: Option<String>,
    pub plugin: Option<Plugin>,
    pub classname: Option<String>,
    pub types_file_name: Option<String>,
    pub depends: Vec<Dependency>,
    pub resources: Vec<Resource>,
    pub designer_supported: bool,
}

/// Plugin library descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    pub name: String,
    pub relative_path: Option<PathBuf>,
}

/// One `depends` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub initial_version: String,
}

/// One exposed type, produced from `Resource`, `Internal`, or
/// `Singleton` commands. `Internal` entries carry no version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub name: String,
    pub file_name: String,
    pub initial_version: Option<String>,
    pub internal: bool,
    pub singleton: bool,
}

/// Fold a parsed qmldir AST into its flat semantic record.
///
/// Duplicate singular commands (`module`, `plugin`, `classname`,
/// `typeinfo`) are silently ignored after the first occurrence; this
/// leniency is intentional, not an oversight. `designersupported` is a
/// logical OR over all occurrences. Comments and syntax errors are
/// skipped entirely; they exist for diagnostics consumers of the raw
/// AST.
#[must_use]
pub fn reduce(ast: &Ast) -> Document {
    let mut document = Document::default();

    for command in &ast.commands {
        match &command.kind {
            CommandKind::Module { identifier } => {
                if document.module_identifier.is_none() {
                    document.module_identifier = Some(identifier.text.clone());
                }
            }
            CommandKind::Plugin { name, path } => {
                if document.plugin.is_none() {
                    document.plugin = Some(Plugin {
                        name: name.text.clone(),
                        relative_path: path.as_ref().map(|p| PathBuf::from(&p.text)),
                    });
                }
            }
            CommandKind::Classname { identifier } => {
                if document.classname.is_none() {
                    document.classname = Some(identifier.text.clone());
                }
            }
            CommandKind::TypeInfo { file } => {
                if document.types_file_name.is_none() {
                    document.types_file_name = Some(file.text.clone());
                }
            }
            CommandKind::Depends {
                module_identifier,
                initial_version,
            } => {
                document.depends.push(Dependency {
                    name: module_identifier.text.clone(),
                    initial_version: initial_version.version_string.clone(),
                });
            }
            CommandKind::Resource {
                identifier,
                initial_version,
                file,
            } => {
                document.resources.push(Resource {
                    name: identifier.text.clone(),
                    file_name: file.text.clone(),
                    initial_version: Some(initial_version.version_string.clone()),
                    internal: false,
                    singleton: false,
                });
            }
            CommandKind::Internal { type_name, file } => {
                document.resources.push(Resource {
                    name: type_name.text.clone(),
                    file_name: file.text.clone(),
                    initial_version: None,
                    internal: true,
                    singleton: false,
                });
            }
            CommandKind::Singleton {
                type_name,
                initial_version,
                file,
            } => {
                document.resources.push(Resource {
                    name: type_name.text.clone(),
                    file_name: file.text.clone(),
                    initial_version: Some(initial_version.version_string.clone()),
                    internal: false,
                    singleton: true,
                });
            }
            CommandKind::DesignerSupported => {
                document.designer_supported = true;
            }
            CommandKind::Comment { .. } | CommandKind::SyntaxError { .. } => {}
        }
    }

    document
}
