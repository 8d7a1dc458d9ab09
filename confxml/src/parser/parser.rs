use crate::error::CompileError;
use crate::ir::ast;
use crate::span::Span;
use super::lexer::{Token, TokenKind};

/// Deepest array nesting accepted. Resolution and emission recurse once per
/// level, so this also bounds their stack use.
pub const MAX_NESTING_DEPTH: usize = 256;

pub fn parse_tokens(tokens: Vec<Token>) -> Result<ast::Program, CompileError> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, position: 0 }
    }

    fn parse_program(&mut self) -> Result<ast::Program, CompileError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(ast::Program { statements })
    }

    fn parse_statement(&mut self) -> Result<ast::Statement, CompileError> {
        match self.peek_kind() {
            TokenKind::Def => self.parse_assignment(),
            _ => Ok(ast::Statement::Value(self.parse_value(0)?)),
        }
    }

    fn parse_assignment(&mut self) -> Result<ast::Statement, CompileError> {
        let def = self.expect(TokenKind::Def)?.span;
        let target = self.expect(TokenKind::Name)?.text.clone();
        self.expect(TokenKind::Assign)?;
        let value = self.parse_value(0)?;

        let span = Span::new(def.line, def.column, def.start, value.span().end);
        Ok(ast::Statement::Assign { target, value, span })
    }

    fn parse_value(&mut self, depth: usize) -> Result<ast::Expression, CompileError> {
        match self.peek_kind() {
            TokenKind::Number => {
                let token = self.advance();
                Ok(ast::Expression::Number(token.text.clone(), token.span))
            }
            TokenKind::Str => {
                let token = self.advance();
                let text = token.text[1..token.text.len() - 1].to_string();
                Ok(ast::Expression::Text(text, token.span))
            }
            TokenKind::LBrace => self.parse_array(depth + 1),
            TokenKind::Question => self.parse_const_ref(),
            _ => Err(self.unexpected("a value (number, string, '{' or '?[')")),
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<ast::Expression, CompileError> {
        let open = self.expect(TokenKind::LBrace)?.span;
        if depth > MAX_NESTING_DEPTH {
            return Err(CompileError::NestingTooDeep {
                span: open,
                limit: MAX_NESTING_DEPTH,
            });
        }

        let mut elements = vec![self.parse_value(depth)?];
        while self.peek_kind() == TokenKind::Comma {
            self.advance(); // consume ','
            elements.push(self.parse_value(depth)?);
        }
        let close = self.expect(TokenKind::RBrace)?.span;

        let span = Span::new(open.line, open.column, open.start, close.end);
        Ok(ast::Expression::Array(elements, span))
    }

    fn parse_const_ref(&mut self) -> Result<ast::Expression, CompileError> {
        let question = self.expect(TokenKind::Question)?.span;
        self.expect(TokenKind::LBracket)?;
        let name = self.expect(TokenKind::Name)?.text.clone();
        let close = self.expect(TokenKind::RBracket)?.span;

        let span = Span::new(question.line, question.column, question.start, close.end);
        Ok(ast::Expression::ConstRef(name, span))
    }

    // Helpers

    fn current(&self) -> &Token {
        // The lexer always terminates the stream with Eof, which is never consumed.
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.position.min(last)]
    }

    fn peek_kind(&self) -> TokenKind {
        if self.tokens.is_empty() {
            TokenKind::Eof
        } else {
            self.current().kind
        }
    }

    fn advance(&mut self) -> &Token {
        let index = self.position;
        if self.peek_kind() != TokenKind::Eof {
            self.position += 1;
        }
        &self.tokens[index]
    }

    fn expect(&mut self, expected: TokenKind) -> Result<&Token, CompileError> {
        if self.peek_kind() == expected {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        let (span, found) = match self.tokens.get(self.position) {
            Some(token) if token.kind != TokenKind::Eof => {
                (token.span, format!("'{}'", token.text))
            }
            Some(token) => (token.span, TokenKind::Eof.describe().to_string()),
            None => (Span::default(), TokenKind::Eof.describe().to_string()),
        };
        CompileError::SyntaxError {
            span,
            expected: expected.to_string(),
            found,
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }
}
