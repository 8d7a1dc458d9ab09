//! Compiler for the Variant 24 configuration language.
//!
//! The pipeline is linear: source text is lexed and parsed into an
//! [`ir::ast::Program`], constant references are resolved into an
//! [`ir::value::Document`], and the document is serialized as XML.

pub mod backends;
pub mod error;
pub mod ir;
pub mod parser;
pub mod resolver;
pub mod span;

use backends::Backend;
use backends::xml::XmlBackend;
use error::CompileError;

/// Compiles source text into an XML document rooted at `root`.
pub fn compile(source: &str, root: &str) -> Result<String, CompileError> {
    log::info!("parsing {} bytes of source", source.len());
    let program = parser::parse(source)?;

    log::info!("resolving {} statements", program.statements.len());
    let resolved = resolver::resolve(&program)?;
    log::debug!(
        "resolved {} document entries, {} constants",
        resolved.document.len(),
        resolved.constants.len()
    );

    log::info!("emitting XML with root <{}>", root);
    XmlBackend::new(root).emit(&resolved.document)
}
