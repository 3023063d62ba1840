use std::fmt;

use crate::ast::{Ast, Command, CommandKind, Version, Word};
use crate::lexer::Lexer;
use crate::token::{Position, SourceLocation, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// First token on the line cannot start any command.
    UnexpectedCommand { found: String },
    /// Expected a word operand.
    ExpectedWord { found: String },
    /// Expected a `major.minor` version operand.
    ExpectedVersion { found: String },
    /// Trailing tokens after a complete command.
    ExpectedEndOfCommand { found: String },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (expected, found) = match self {
            Self::UnexpectedCommand { found } => ("a command", found),
            Self::ExpectedWord { found } => ("a word", found),
            Self::ExpectedVersion { found } => ("a version (major.minor)", found),
            Self::ExpectedEndOfCommand { found } => ("end of command", found),
        };
        if found.is_empty() {
            write!(f, "expected {expected}, got end of input")
        } else {
            write!(f, "expected {expected}, got '{found}'")
        }
    }
}

/// Error produced during parsing.
///
/// Carries the offending token and, when a command was already open, the
/// innermost in-progress node header so diagnostics can span the whole
/// partial command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{kind} at line {}, column {}",
    offending.location.start.line,
    offending.location.start.column
)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offending: Token,
    pub pending: Option<PendingNode>,
}

/// Header of a node whose production has started but not completed:
/// the provisional start of its span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNode {
    pub start: usize,
    pub location_start: Position,
}

/// Parse a qmldir source in tolerant mode (the default).
///
/// Never fails: malformed lines become `SyntaxError` commands and
/// parsing resumes at the next line.
#[must_use]
pub fn parse(input: &str) -> Ast {
    Parser::new(input).parse_tolerant()
}

/// Parse a qmldir source in strict mode.
///
/// # Errors
///
/// Returns the first syntax error encountered, aborting the parse.
pub fn parse_strict(input: &str) -> Result<Ast, ParseError> {
    Parser::new(input).parse_strict()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
    last_end: usize,
    last_location_end: Position,
    open: Vec<PendingNode>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token(true);
        Self {
            lexer,
            token,
            last_end: 0,
            last_location_end: Position { line: 1, column: 0 },
            open: Vec::new(),
        }
    }

    fn parse_tolerant(mut self) -> Ast {
        let mut commands = Vec::new();
        while self.token.kind != TokenKind::Eof {
            match self.parse_command() {
                Ok(Some(command)) => commands.push(command),
                Ok(None) => {}
                Err(error) => {
                    commands.push(self.error_command(&error));
                    self.recover();
                }
            }
        }
        Ast { commands }
    }

    fn parse_strict(mut self) -> Result<Ast, ParseError> {
        let mut commands = Vec::new();
        while self.token.kind != TokenKind::Eof {
            if let Some(command) = self.parse_command()? {
                commands.push(command);
            }
        }
        Ok(Ast { commands })
    }

    /// Dispatch on the first token of the line. A leading `Word` means a
    /// resource declaration; a bare `CommandEnd` is a blank line and
    /// produces no command.
    fn parse_command(&mut self) -> Result<Option<Command>, ParseError> {
        match self.token.kind {
            TokenKind::CommandEnd => {
                self.advance();
                Ok(None)
            }
            TokenKind::Comment => self.parse_comment().map(Some),
            TokenKind::Module => self.parse_module().map(Some),
            TokenKind::Singleton => self.parse_singleton().map(Some),
            TokenKind::Internal => self.parse_internal().map(Some),
            TokenKind::Plugin => self.parse_plugin().map(Some),
            TokenKind::Classname => self.parse_classname().map(Some),
            TokenKind::TypeInfo => self.parse_typeinfo().map(Some),
            TokenKind::Depends => self.parse_depends().map(Some),
            TokenKind::DesignerSupported => self.parse_designer_supported().map(Some),
            TokenKind::Word => self.parse_resource().map(Some),
            _ => Err(self.fail(ParseErrorKind::UnexpectedCommand {
                found: self.token.text.clone(),
            })),
        }
    }

    fn parse_comment(&mut self) -> Result<Command, ParseError> {
        self.open_node();
        let text = self.token.text.clone();
        self.advance();
        self.finish(CommandKind::Comment { text })
    }

    fn parse_module(&mut self) -> Result<Command, ParseError> {
        self.open_node();
        self.advance();
        let identifier = self.expect_word()?;
        self.finish(CommandKind::Module { identifier })
    }

    fn parse_singleton(&mut self) -> Result<Command, ParseError> {
        self.open_node();
        self.advance();
        let type_name = self.expect_word()?;
        let initial_version = self.expect_version()?;
        let file = self.expect_word()?;
        self.finish(CommandKind::Singleton {
            type_name,
            initial_version,
            file,
        })
    }

    fn parse_internal(&mut self) -> Result<Command, ParseError> {
        self.open_node();
        self.advance();
        let type_name = self.expect_word()?;
        let file = self.expect_word()?;
        self.finish(CommandKind::Internal { type_name, file })
    }

    fn parse_plugin(&mut self) -> Result<Command, ParseError> {
        self.open_node();
        self.advance();
        let name = self.expect_word()?;
        let path = if self.token.kind == TokenKind::Word {
            Some(self.expect_word()?)
        } else {
            None
        };
        self.finish(CommandKind::Plugin { name, path })
    }

    fn parse_classname(&mut self) -> Result<Command, ParseError> {
        self.open_node();
        self.advance();
        let identifier = self.expect_word()?;
        self.finish(CommandKind::Classname { identifier })
    }

    fn parse_typeinfo(&mut self) -> Result<Command, ParseError> {
        self.open_node();
        self.advance();
        let file = self.expect_word()?;
        self.finish(CommandKind::TypeInfo { file })
    }

    fn parse_depends(&mut self) -> Result<Command, ParseError> {
        self.open_node();
        self.advance();
        let module_identifier = self.expect_word()?;
        let initial_version = self.expect_version()?;
        self.finish(CommandKind::Depends {
            module_identifier,
            initial_version,
        })
    }

    fn parse_designer_supported(&mut self) -> Result<Command, ParseError> {
        self.open_node();
        self.advance();
        self.finish(CommandKind::DesignerSupported)
    }

    /// Resource declaration, reached only via `Word` dispatch. The
    /// version operand must be a `Decimal` token; a plain word in the
    /// version position is always an error, never coerced.
    fn parse_resource(&mut self) -> Result<Command, ParseError> {
        self.open_node();
        let identifier = self.expect_word()?;
        let initial_version = self.expect_version()?;
        let file = self.expect_word()?;
        self.finish(CommandKind::Resource {
            identifier,
            initial_version,
            file,
        })
    }

    fn advance(&mut self) {
        self.last_end = self.token.end;
        self.last_location_end = self.token.location.end;
        self.token = self.lexer.next_token(true);
    }

    fn open_node(&mut self) {
        self.open.push(PendingNode {
            start: self.token.start,
            location_start: self.token.location.start,
        });
    }

    /// Seal the innermost open node with the end of the last consumed
    /// token. Must be paired with a preceding `open_node`.
    fn close_node(&mut self, kind: CommandKind) -> Command {
        let pending = self.open.pop().unwrap_or(PendingNode {
            start: self.last_end,
            location_start: self.last_location_end,
        });
        Command {
            start: pending.start,
            end: self.last_end,
            location: SourceLocation {
                start: pending.location_start,
                end: self.last_location_end,
            },
            kind,
        }
    }

    /// Every production must end at `CommandEnd` or `Eof`; a file need
    /// not end with a newline. The node is sealed before the terminator
    /// is consumed, so command spans never include the line break.
    fn finish(&mut self, kind: CommandKind) -> Result<Command, ParseError> {
        match self.token.kind {
            TokenKind::CommandEnd => {
                let command = self.close_node(kind);
                self.advance();
                Ok(command)
            }
            TokenKind::Eof => Ok(self.close_node(kind)),
            _ => Err(self.fail(ParseErrorKind::ExpectedEndOfCommand {
                found: self.token.text.clone(),
            })),
        }
    }

    fn expect_word(&mut self) -> Result<Word, ParseError> {
        if self.token.kind != TokenKind::Word {
            return Err(self.fail(ParseErrorKind::ExpectedWord {
                found: self.token.text.clone(),
            }));
        }
        let word = Word {
            text: self.token.text.clone(),
            start: self.token.start,
            end: self.token.end,
            location: self.token.location,
        };
        self.advance();
        Ok(word)
    }

    fn expect_version(&mut self) -> Result<Version, ParseError> {
        if self.token.kind != TokenKind::Decimal {
            return Err(self.fail(ParseErrorKind::ExpectedVersion {
                found: self.token.text.clone(),
            }));
        }
        let version = Version {
            version_string: self.token.text.clone(),
            start: self.token.start,
            end: self.token.end,
            location: self.token.location,
        };
        self.advance();
        Ok(version)
    }

    fn fail(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            offending: self.token.clone(),
            pending: self.open.last().copied(),
        }
    }

    /// Build the `SyntaxError` pseudo-command for a recovered error. Its
    /// span starts at the abandoned node's provisional start when one
    /// was open, otherwise at the offending token.
    fn error_command(&mut self, error: &ParseError) -> Command {
        self.open.clear();
        let (start, location_start) = error.pending.map_or(
            (error.offending.start, error.offending.location.start),
            |pending| (pending.start, pending.location_start),
        );
        Command {
            start,
            end: error.offending.end,
            location: SourceLocation {
                start: location_start,
                end: error.offending.location.end,
            },
            kind: CommandKind::SyntaxError {
                offending_token: error.offending.clone(),
                message: error.to_string(),
            },
        }
    }

    /// Resynchronize at the next physical line: discard tokens without
    /// validation until a `CommandEnd` is consumed or `Eof` is reached.
    fn recover(&mut self) {
        while self.token.kind != TokenKind::CommandEnd && self.token.kind != TokenKind::Eof {
            self.advance();
        }
        if self.token.kind == TokenKind::CommandEnd {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_command() {
        let ast = parse("module My.Module\n");
        assert_eq!(ast.commands.len(), 1);
        assert!(matches!(
            &ast.commands[0].kind,
            CommandKind::Module { identifier } if identifier.text == "My.Module"
        ));
    }

    #[test]
    fn module_without_trailing_newline() {
        let ast = parse_strict("module My.Module").expect("parse failed");
        assert_eq!(ast.commands.len(), 1);
    }

    #[test]
    fn resource_dispatched_from_bare_word() {
        let ast = parse("MyType 1.0 MyType.qml\n");
        assert!(matches!(
            &ast.commands[0].kind,
            CommandKind::Resource { identifier, initial_version, file }
                if identifier.text == "MyType"
                    && initial_version.version_string == "1.0"
                    && file.text == "MyType.qml"
        ));
    }

    #[test]
    fn plugin_with_and_without_path() {
        let ast = parse("plugin mylib\nplugin mylib platform/\n");
        assert!(matches!(
            &ast.commands[0].kind,
            CommandKind::Plugin { name, path: None } if name.text == "mylib"
        ));
        assert!(matches!(
            &ast.commands[1].kind,
            CommandKind::Plugin { name, path: Some(path) }
                if name.text == "mylib" && path.text == "platform/"
        ));
    }

    #[test]
    fn blank_lines_produce_no_commands() {
        let ast = parse("\n\nmodule Foo\n\n");
        assert_eq!(ast.commands.len(), 1);
    }

    #[test]
    fn recovery_resynchronizes_at_next_line() {
        let ast = parse("plugin\nmodule Foo\n");
        assert_eq!(ast.commands.len(), 2);
        assert!(matches!(
            ast.commands[0].kind,
            CommandKind::SyntaxError { .. }
        ));
        assert!(matches!(
            &ast.commands[1].kind,
            CommandKind::Module { identifier } if identifier.text == "Foo"
        ));
    }

    #[test]
    fn strict_mode_aborts_on_first_error() {
        let error = parse_strict("plugin\nmodule Foo\n").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::ExpectedWord { .. }));
        assert_eq!(error.offending.location.start.line, 1);
    }

    #[test]
    fn trailing_token_is_an_error() {
        let ast = parse("module Foo bar\n");
        assert_eq!(ast.commands.len(), 1);
        assert!(matches!(
            &ast.commands[0].kind,
            CommandKind::SyntaxError { offending_token, .. }
                if offending_token.text == "bar"
        ));
    }

    #[test]
    fn word_in_version_position_is_not_coerced() {
        let ast = parse("MyType one.two MyType.qml\n");
        assert!(matches!(
            ast.commands[0].kind,
            CommandKind::SyntaxError { .. }
        ));
    }

    #[test]
    fn integer_in_version_position_is_an_error() {
        let ast = parse("MyType 1 MyType.qml\n");
        assert!(matches!(
            ast.commands[0].kind,
            CommandKind::SyntaxError { .. }
        ));
    }

    #[test]
    fn error_command_spans_the_partial_command() {
        let ast = parse("depends My.Other\n");
        let command = &ast.commands[0];
        assert!(matches!(command.kind, CommandKind::SyntaxError { .. }));
        // Span starts at `depends`, not at the offending newline.
        assert_eq!(command.start, 0);
        assert_eq!(command.location.start.column, 0);
    }

    #[test]
    fn error_message_carries_line_and_column() {
        let error = parse_strict("module Foo\ndepends My.Other notaversion\n").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("notaversion"), "{message}");
    }

    #[test]
    fn command_spans_exclude_the_line_break() {
        let ast = parse("module Foo\n");
        assert_eq!(ast.commands[0].start, 0);
        assert_eq!(ast.commands[0].end, 10);
        assert_eq!(ast.commands[0].location.end.column, 10);
    }

    #[test]
    fn comment_kept_verbatim() {
        let ast = parse("# qmldir for My.Module\n");
        assert!(matches!(
            &ast.commands[0].kind,
            CommandKind::Comment { text } if text == "# qmldir for My.Module"
        ));
    }

    #[test]
    fn designersupported_takes_no_operands() {
        let ast = parse("designersupported\ndesignersupported extra\n");
        assert!(matches!(
            ast.commands[0].kind,
            CommandKind::DesignerSupported
        ));
        assert!(matches!(
            ast.commands[1].kind,
            CommandKind::SyntaxError { .. }
        ));
    }
}
