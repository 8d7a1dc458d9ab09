use crate::span::Span;

/// Parse tree of a whole source file, top-level items in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// def PORT = 8080
    Assign {
        target: String,
        value: Expression,
        span: Span,
    },
    /// A bare top-level value, e.g. "localhost"
    Value(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// -12, +7, 8080 (raw text, converted during resolution)
    Number(String, Span),
    /// "text" with the quotes stripped
    Text(String, Span),
    /// { value, value, ... }
    Array(Vec<Expression>, Span),
    /// ?[NAME]
    ConstRef(String, Span),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Self::Number(_, span)
            | Self::Text(_, span)
            | Self::Array(_, span)
            | Self::ConstRef(_, span) => *span,
        }
    }
}
