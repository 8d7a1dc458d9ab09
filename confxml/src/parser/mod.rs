pub mod lexer;
pub mod parser;

use crate::error::CompileError;
use crate::ir::ast;

/// Entry point of the front end: source text in, parse tree out.
pub fn parse(source: &str) -> Result<ast::Program, CompileError> {
    let tokens = lexer::tokenize(source)?;
    log::debug!("lexed {} tokens", tokens.len());
    let program = parser::parse_tokens(tokens)?;
    log::debug!("parsed {} top-level statements", program.statements.len());
    Ok(program)
}
