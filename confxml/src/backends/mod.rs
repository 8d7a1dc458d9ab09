pub mod xml;

use crate::error::CompileError;
use crate::ir::value::Document;

pub trait Backend {
    fn emit(&mut self, document: &Document) -> Result<String, CompileError>;
}
