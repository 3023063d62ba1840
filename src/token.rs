/// A point in the source text: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Half-open span in the source text as (line, column) pairs.
///
/// Built incrementally during parsing: a node's location opens at the
/// first token consumed for it and is sealed with the end position of
/// the last token consumed for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    /// Location collapsed to a single point.
    #[must_use]
    pub const fn point(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }
}

/// Token kinds produced by the lexer.
///
/// Declaration order is the lexer's match order: the first pattern that
/// matches at the cursor wins, not the longest. Keyword kinds precede
/// `Word` so `module` lexes as a keyword while `modules` (no boundary)
/// falls through to `Word`; `Decimal` precedes `Integer` so `1.2` is not
/// split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Comment (`#` to end of line).
    Comment,
    /// `module` keyword.
    Module,
    /// `typeinfo` keyword.
    TypeInfo,
    /// `singleton` keyword.
    Singleton,
    /// `internal` keyword.
    Internal,
    /// `plugin` keyword.
    Plugin,
    /// `classname` keyword.
    Classname,
    /// `depends` keyword.
    Depends,
    /// `designersupported` keyword.
    DesignerSupported,
    /// Bare word (identifier, file name, path).
    Word,
    /// Dotted version number (`digits.digits`).
    Decimal,
    /// Plain integer (`digits`).
    Integer,
    /// Run of non-newline blanks.
    Whitespace,
    /// Line terminator (`\n` or `\r\n`).
    CommandEnd,
    /// Catch-all for a byte no other pattern matches.
    Unknown,
    /// Synthetic end-of-input marker.
    Eof,
}

/// A single token: kind, matched text, byte offsets, and location.
///
/// `text` has embedded `\n`/`\r` bytes replaced with the two-character
/// literal sequences `\n`/`\r` so it is always safe to print. `start`
/// and `end` are absolute byte offsets into the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub location: SourceLocation,
}
