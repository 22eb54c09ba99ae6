// Structural tree rewriting and deep duplication

use crate::ast::{Argument, Formal, Node};
use crate::runtime::values::Value;
use std::convert::Infallible;

// Remaining stack below which a rewrite moves onto a fresh segment.
pub(crate) const STACK_RED_ZONE: usize = 128 * 1024;
pub(crate) const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Bottom-up tree rewriter. The provided methods rebuild every node kind
/// from its rewritten children; implementors override only the hooks they
/// care about. Recursion grows the native stack on demand, so deep trees
/// do not abort the process.
pub trait Rewriter {
    type Error;

    fn rewrite(&mut self, node: &Node) -> Result<Node, Self::Error> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.rewrite_children(node))
    }

    fn rewrite_arguments(&mut self, arguments: &[Argument]) -> Result<Vec<Argument>, Self::Error> {
        arguments
            .iter()
            .map(|argument| self.rewrite_argument(argument))
            .collect()
    }

    fn rewrite_argument(&mut self, argument: &Argument) -> Result<Argument, Self::Error> {
        Ok(Argument {
            name: argument.name.clone(),
            value: argument
                .value
                .as_ref()
                .map(|value| self.rewrite(value))
                .transpose()?,
        })
    }

    fn rewrite_boxed(&mut self, node: &Node) -> Result<Box<Node>, Self::Error> {
        self.rewrite(node).map(Box::new)
    }

    fn rewrite_children(&mut self, node: &Node) -> Result<Node, Self::Error> {
        let rewritten = match node {
            Node::Constant(value) => Node::Constant(duplicate_constant(value)),
            Node::SymbolRef(symbol) => Node::SymbolRef(symbol.clone()),
            Node::Call {
                function,
                arguments,
            } => Node::Call {
                function: function.clone(),
                arguments: self.rewrite_arguments(arguments)?,
            },
            Node::Block(statements) => Node::Block(
                statements
                    .iter()
                    .map(|statement| self.rewrite(statement))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => Node::If {
                condition: self.rewrite_boxed(condition)?,
                then_branch: self.rewrite_boxed(then_branch)?,
                else_branch: else_branch
                    .as_ref()
                    .map(|e| self.rewrite_boxed(e))
                    .transpose()?,
            },
            Node::While { condition, body } => Node::While {
                condition: self.rewrite_boxed(condition)?,
                body: self.rewrite_boxed(body)?,
            },
            Node::Repeat(body) => Node::Repeat(self.rewrite_boxed(body)?),
            Node::For {
                variable,
                sequence,
                body,
            } => Node::For {
                variable: variable.clone(),
                sequence: self.rewrite_boxed(sequence)?,
                body: self.rewrite_boxed(body)?,
            },
            Node::Function { formals, body } => Node::Function {
                formals: formals
                    .iter()
                    .map(|formal| -> Result<Formal, Self::Error> {
                        Ok(Formal {
                            name: formal.name.clone(),
                            default: formal
                                .default
                                .as_ref()
                                .map(|d| self.rewrite(d))
                                .transpose()?,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                body: self.rewrite_boxed(body)?,
            },
            Node::Assign {
                target,
                value,
                superassign,
            } => Node::Assign {
                target: target.clone(),
                value: self.rewrite_boxed(value)?,
                superassign: *superassign,
            },
            Node::Binary { operator, lhs, rhs } => Node::Binary {
                operator: *operator,
                lhs: self.rewrite_boxed(lhs)?,
                rhs: self.rewrite_boxed(rhs)?,
            },
            Node::Unary { operator, operand } => Node::Unary {
                operator: *operator,
                operand: self.rewrite_boxed(operand)?,
            },
            Node::Index {
                base,
                arguments,
                exact,
            } => Node::Index {
                base: self.rewrite_boxed(base)?,
                arguments: self.rewrite_arguments(arguments)?,
                exact: *exact,
            },
            Node::Field { base, field } => Node::Field {
                base: self.rewrite_boxed(base)?,
                field: field.clone(),
            },
            Node::Next => Node::Next,
            Node::Break => Node::Break,
        };
        Ok(rewritten)
    }
}

// Quoted expressions embedded as constants get their own tree too.
fn duplicate_constant(value: &Value) -> Value {
    match value {
        Value::Language(node) => Value::language(duplicate(node)),
        other => other.clone(),
    }
}

/// Rewriter that changes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Duplicator;

impl Rewriter for Duplicator {
    type Error = Infallible;
}

/// Deep copy of `node` that shares no tree structure with it.
pub fn duplicate(node: &Node) -> Node {
    match Duplicator.rewrite(node) {
        Ok(copy) => copy,
        Err(never) => match never {},
    }
}
