use std::fmt;

use crate::token::{SourceLocation, Token};

/// Parsed qmldir document: one entry per non-blank source line, in
/// source order.
///
/// The list deliberately interleaves real commands, comments, and
/// syntax-error pseudo-commands so a consumer that wants a faithful
/// line-by-line view of the file needs no second data structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ast {
    pub commands: Vec<Command>,
}

impl Ast {
    /// Whether any command is a syntax error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.syntax_errors().next().is_some()
    }

    /// The syntax-error commands, in source order.
    #[must_use]
    pub fn syntax_errors(&self) -> impl Iterator<Item = &Command> {
        self.commands
            .iter()
            .filter(|c| matches!(c.kind, CommandKind::SyntaxError { .. }))
    }
}

/// One command line: shared span header plus the command payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Absolute byte offset of the first token of the command.
    pub start: usize,
    /// Absolute byte offset just past the last token of the command.
    pub end: usize,
    pub location: SourceLocation,
    pub kind: CommandKind,
}

/// The closed set of qmldir commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// `module <identifier>`
    Module { identifier: Word },
    /// `singleton <TypeName> <version> <file>`
    Singleton {
        type_name: Word,
        initial_version: Version,
        file: Word,
    },
    /// `internal <TypeName> <file>`
    Internal { type_name: Word, file: Word },
    /// `<TypeName> <version> <file>` (line starts with a bare word)
    Resource {
        identifier: Word,
        initial_version: Version,
        file: Word,
    },
    /// `plugin <name> [<path>]`
    Plugin { name: Word, path: Option<Word> },
    /// `classname <identifier>`
    Classname { identifier: Word },
    /// `typeinfo <file>`
    TypeInfo { file: Word },
    /// `depends <module> <version>`
    Depends {
        module_identifier: Word,
        initial_version: Version,
    },
    /// `designersupported`
    DesignerSupported,
    /// Comment line, text verbatim including the leading `#`.
    Comment { text: String },
    /// Pseudo-command recording a malformed line (tolerant mode).
    SyntaxError { offending_token: Token, message: String },
}

/// Word leaf: the matched text is returned verbatim, with no validation
/// of identifier or path legality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub location: SourceLocation,
}

/// Version leaf (`major.minor`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub version_string: String,
    pub start: usize,
    pub end: usize,
    pub location: SourceLocation,
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version_string)
    }
}
