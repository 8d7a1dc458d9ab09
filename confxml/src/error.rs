use thiserror::Error;

use crate::span::Span;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Input file '{path}' not found")]
    FileNotFound { path: String },

    #[error("Error reading file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Lexer error at {span}: {message}")]
    LexerError { span: Span, message: String },

    #[error("Syntax error at {span}: expected {expected}, found {found}")]
    SyntaxError {
        span: Span,
        expected: String,
        found: String,
    },

    #[error("Nesting error at {span}: arrays nested deeper than {limit} levels")]
    NestingTooDeep { span: Span, limit: usize },

    #[error("Undefined constant '{name}' used in expression ?[{name}] at {span}")]
    UndefinedConstant { name: String, span: Span },

    #[error("Number literal '{literal}' at {span} does not fit in a 64-bit signed integer")]
    NumberOverflow { literal: String, span: Span },

    #[error("XML emission failed: {message}")]
    EmitError { message: String },
}
