use crate::token::{Position, SourceLocation, Token, TokenKind};

/// Keyword patterns, in match order. Each requires a boundary (blank,
/// newline, or end of input) immediately after the keyword text.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("module", TokenKind::Module),
    ("typeinfo", TokenKind::TypeInfo),
    ("singleton", TokenKind::Singleton),
    ("internal", TokenKind::Internal),
    ("plugin", TokenKind::Plugin),
    ("classname", TokenKind::Classname),
    ("depends", TokenKind::Depends),
    ("designersupported", TokenKind::DesignerSupported),
];

/// Tokenize an entire qmldir source string, whitespace tokens included.
///
/// Convenience wrapper around [`Lexer`] for tooling that wants the full
/// token stream (e.g. highlighting). The synthetic `Eof` token is not
/// included in the result.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token(false);
        if token.kind == TokenKind::Eof {
            break;
        }
        tokens.push(token);
    }
    tokens
}

/// Pull-based lexer over a fully buffered qmldir source.
///
/// Never fails: unmatched bytes become `Unknown` tokens and running past
/// the end always yields `Eof`, idempotently.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: u32,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let bytes = input.as_bytes();
        let start = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            input: bytes,
            pos: start,
            line: 1,
            line_start: start,
        }
    }

    /// Produce the next token.
    ///
    /// With `skip_whitespace` set, `Whitespace` tokens are consumed and
    /// the next non-whitespace token is returned instead. `CommandEnd`
    /// is never skipped.
    pub fn next_token(&mut self, skip_whitespace: bool) -> Token {
        loop {
            let Some((kind, len)) = self.match_at(self.pos) else {
                return self.eof_token();
            };
            let start = self.pos;
            let end = start + len;
            let token = self.make_token(kind, start, end);
            if kind == TokenKind::CommandEnd {
                self.line += 1;
                self.line_start = end;
            }
            self.pos = end;
            if skip_whitespace && kind == TokenKind::Whitespace {
                continue;
            }
            return token;
        }
    }

    /// Try every pattern at `pos` in declaration order; first match wins.
    ///
    /// The ordering is load-bearing: `Comment` first so `#` always
    /// starts a comment, keywords before `Word`, `Decimal` before
    /// `Integer`. `Unknown` guarantees progress on anything left over.
    fn match_at(&self, pos: usize) -> Option<(TokenKind, usize)> {
        if pos >= self.input.len() {
            return None;
        }
        if let Some(len) = self.match_comment(pos) {
            return Some((TokenKind::Comment, len));
        }
        for &(text, kind) in KEYWORDS {
            if let Some(len) = self.match_keyword(pos, text) {
                return Some((kind, len));
            }
        }
        if let Some(len) = self.match_word(pos) {
            return Some((TokenKind::Word, len));
        }
        if let Some(len) = self.match_decimal(pos) {
            return Some((TokenKind::Decimal, len));
        }
        if let Some(len) = self.match_integer(pos) {
            return Some((TokenKind::Integer, len));
        }
        if let Some(len) = self.match_whitespace(pos) {
            return Some((TokenKind::Whitespace, len));
        }
        if let Some(len) = self.match_command_end(pos) {
            return Some((TokenKind::CommandEnd, len));
        }
        Some((TokenKind::Unknown, 1))
    }

    fn match_comment(&self, pos: usize) -> Option<usize> {
        if self.input[pos] != b'#' {
            return None;
        }
        let mut end = pos;
        while end < self.input.len() && self.input[end] != b'\n' && self.input[end] != b'\r' {
            end += 1;
        }
        Some(end - pos)
    }

    fn match_keyword(&self, pos: usize, keyword: &str) -> Option<usize> {
        let bytes = keyword.as_bytes();
        if !self.input[pos..].starts_with(bytes) {
            return None;
        }
        // Boundary lookahead: `modules` must not lex as `module`.
        let boundary = self
            .input
            .get(pos + bytes.len())
            .is_none_or(|&b| is_blank(b) || b == b'\n' || b == b'\r');
        boundary.then_some(bytes.len())
    }

    fn match_word(&self, pos: usize) -> Option<usize> {
        let first = self.input[pos];
        if first.is_ascii_digit() || !is_word_byte(first) {
            return None;
        }
        let mut end = pos + 1;
        while end < self.input.len() && is_word_byte(self.input[end]) {
            end += 1;
        }
        Some(end - pos)
    }

    fn match_decimal(&self, pos: usize) -> Option<usize> {
        let major = self.match_integer(pos)?;
        if self.input.get(pos + major) != Some(&b'.') {
            return None;
        }
        let minor = self.match_integer(pos + major + 1)?;
        Some(major + 1 + minor)
    }

    fn match_integer(&self, pos: usize) -> Option<usize> {
        let mut end = pos;
        while end < self.input.len() && self.input[end].is_ascii_digit() {
            end += 1;
        }
        (end > pos).then_some(end - pos)
    }

    fn match_whitespace(&self, pos: usize) -> Option<usize> {
        let mut end = pos;
        while end < self.input.len() && is_blank(self.input[end]) {
            end += 1;
        }
        (end > pos).then_some(end - pos)
    }

    fn match_command_end(&self, pos: usize) -> Option<usize> {
        match self.input[pos] {
            b'\n' => Some(1),
            b'\r' if self.input.get(pos + 1) == Some(&b'\n') => Some(2),
            _ => None,
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        let raw = String::from_utf8_lossy(&self.input[start..end]);
        let text = raw.replace('\r', "\\r").replace('\n', "\\n");
        Token {
            kind,
            text,
            start,
            end,
            location: SourceLocation {
                start: self.position_at(start),
                end: self.position_at(end),
            },
        }
    }

    fn eof_token(&self) -> Token {
        Token {
            kind: TokenKind::Eof,
            text: String::new(),
            start: self.pos,
            end: self.pos,
            location: SourceLocation::point(self.position_at(self.pos)),
        }
    }

    fn position_at(&self, offset: usize) -> Position {
        Position {
            line: self.line,
            column: u32::try_from(offset - self.line_start).unwrap_or(u32::MAX),
        }
    }
}

const fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

const fn is_word_byte(byte: u8) -> bool {
    !matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'#')
}
