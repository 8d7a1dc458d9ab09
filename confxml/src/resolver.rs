use crate::error::CompileError;
use crate::ir::ast;
use crate::ir::value::{ConstantTable, Document, Value};
use crate::parser::parser::MAX_NESTING_DEPTH;

/// Output of resolution: the document plus the constants as they stood at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub document: Document,
    pub constants: ConstantTable,
}

pub fn resolve(program: &ast::Program) -> Result<Resolved, CompileError> {
    let mut resolver = Resolver::new();
    resolver.resolve_program(program)?;
    Ok(resolver.finish())
}

/// Single left-to-right pass over the parse tree. References read the
/// constant table as it is at the point of use.
pub struct Resolver {
    constants: ConstantTable,
    document: Document,
    unnamed_counter: usize,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            constants: ConstantTable::new(),
            document: Document::new(),
            unnamed_counter: 0,
        }
    }

    pub fn resolve_program(&mut self, program: &ast::Program) -> Result<(), CompileError> {
        for statement in &program.statements {
            self.resolve_statement(statement)?;
        }
        Ok(())
    }

    fn resolve_statement(&mut self, statement: &ast::Statement) -> Result<(), CompileError> {
        match statement {
            ast::Statement::Assign { target, value, span } => {
                let (value, depth) = self.resolve_expression(value)?;
                log::debug!("defined constant {} at {} (depth {})", target, span, depth);
                self.constants.define(target.clone(), value.clone(), depth);
                self.document.insert(target.clone(), value);
            }
            ast::Statement::Value(expression) => {
                let (value, _) = self.resolve_expression(expression)?;
                let key = format!("item_{}", self.unnamed_counter);
                self.unnamed_counter += 1;
                self.document.insert(key, value);
            }
        }
        Ok(())
    }

    /// Resolves an expression to its value and array nesting depth.
    ///
    /// References splice whole constants into arrays, so the depth of a
    /// resolved value can exceed the brace nesting seen by the parser. It is
    /// checked against the same limit here.
    fn resolve_expression(
        &self,
        expression: &ast::Expression,
    ) -> Result<(Value, usize), CompileError> {
        match expression {
            ast::Expression::Number(literal, span) => literal
                .parse::<i64>()
                .map(|n| (Value::Number(n), 0))
                .map_err(|_| CompileError::NumberOverflow {
                    literal: literal.clone(),
                    span: *span,
                }),
            ast::Expression::Text(text, _) => Ok((Value::Text(text.clone()), 0)),
            ast::Expression::Array(elements, span) => {
                let mut items = Vec::with_capacity(elements.len());
                let mut deepest = 0;
                for element in elements {
                    let (item, depth) = self.resolve_expression(element)?;
                    deepest = deepest.max(depth);
                    items.push(item);
                }
                let depth = deepest + 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(CompileError::NestingTooDeep {
                        span: *span,
                        limit: MAX_NESTING_DEPTH,
                    });
                }
                Ok((Value::array(items), depth))
            }
            ast::Expression::ConstRef(name, span) => self
                .constants
                .lookup(name)
                .map(|(value, depth)| (value.clone(), depth))
                .ok_or_else(|| CompileError::UndefinedConstant {
                    name: name.clone(),
                    span: *span,
                }),
        }
    }

    pub fn finish(self) -> Resolved {
        Resolved {
            document: self.document,
            constants: self.constants,
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
