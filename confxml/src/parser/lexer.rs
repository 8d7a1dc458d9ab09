use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::CompileError;
use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Def,
    // Punctuation
    Assign,   // =
    LBrace,   // {
    RBrace,   // }
    Comma,    // ,
    Question, // ?
    LBracket, // [
    RBracket, // ]
    // Identifiers and literals
    Name,
    Number,
    Str,
    // Special
    Eof,
}

impl TokenKind {
    /// Human-readable name used in syntax errors.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Def => "'def'",
            Self::Assign => "'='",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Comma => "','",
            Self::Question => "'?'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Name => "constant name",
            Self::Number => "number",
            Self::Str => "string",
            Self::Eof => "end of input",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text of the lexeme, quotes included for strings.
    pub text: String,
    pub span: Span,
}

/// Lazy token stream over a source text. Yields `Eof` once, then stops.
/// Stops after the first error as well.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            column: 1,
            finished: false,
        }
    }

    fn next_token(&mut self) -> Result<Token, CompileError> {
        self.skip_trivia()?;

        let start = self.offset();
        let (line, column) = (self.line, self.column);
        let span_here = |end| Span::new(line, column, start, end);

        let Some(ch) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                span: span_here(start),
            });
        };

        let kind = match ch {
            '=' => self.single(TokenKind::Assign),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ',' => self.single(TokenKind::Comma),
            '?' => self.single(TokenKind::Question),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '"' => {
                self.bump(); // opening quote
                loop {
                    match self.bump() {
                        Some('"') => break,
                        Some(_) => {}
                        None => {
                            return Err(CompileError::LexerError {
                                span: span_here(self.offset()),
                                message: "Unterminated string literal".to_string(),
                            });
                        }
                    }
                }
                TokenKind::Str
            }
            '+' | '-' => {
                self.bump();
                if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    return Err(CompileError::LexerError {
                        span: span_here(self.offset()),
                        message: format!("Expected digits after '{}'", ch),
                    });
                }
                self.eat_while(|c| c.is_ascii_digit());
                TokenKind::Number
            }
            '0'..='9' => {
                self.eat_while(|c| c.is_ascii_digit());
                TokenKind::Number
            }
            'A'..='Z' | '_' => {
                self.eat_while(is_name_char);
                TokenKind::Name
            }
            'a'..='z' => {
                self.eat_while(is_name_char);
                let end = self.offset();
                let word = &self.source[start..end];
                if word != "def" {
                    return Err(CompileError::LexerError {
                        span: span_here(end),
                        message: format!(
                            "Unexpected word '{}': constant names must start with an uppercase letter or '_'",
                            word
                        ),
                    });
                }
                TokenKind::Def
            }
            _ => {
                self.bump();
                return Err(CompileError::LexerError {
                    span: span_here(self.offset()),
                    message: format!("Unexpected character: '{}'", ch),
                });
            }
        };

        let end = self.offset();
        Ok(Token {
            kind,
            text: self.source[start..end].to_string(),
            span: span_here(end),
        })
    }

    /// Skips whitespace, `-- line` comments and `|# block #|` comments.
    fn skip_trivia(&mut self) -> Result<(), CompileError> {
        loop {
            match (self.peek(), self.peek_second()) {
                (Some(c), _) if c.is_ascii_whitespace() => {
                    self.bump();
                }
                (Some('-'), Some('-')) => {
                    self.eat_while(|c| c != '\n');
                }
                (Some('|'), Some('#')) => {
                    let start = self.offset();
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('#') if self.peek() == Some('|') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(CompileError::LexerError {
                                    span: Span::new(line, column, start, self.offset()),
                                    message: "Unterminated block comment, expected '#|'".to_string(),
                                });
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.bump();
        }
    }

    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, ch)| ch)
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.source.len(), |&(i, _)| i)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if matches!(&result, Ok(Token { kind: TokenKind::Eof, .. }) | Err(_)) {
            self.finished = true;
        }
        Some(result)
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Lexes the whole source, ending with an `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    Lexer::new(source).collect()
}
