//! Non-standard evaluation support: rewriting unevaluated expressions with
//! the bindings of a frame, list or environment.

pub mod builtin;
pub mod duplicate;
pub mod engine;
pub mod resolver;

pub use builtin::{BuiltinSignature, MatchedArguments, SubstituteCall, SUBSTITUTE};
pub use duplicate::{duplicate, Duplicator, Rewriter};
pub use engine::{substitute_binding, Substituter};
pub use resolver::BindingSource;

use crate::ast::Node;
use crate::runtime::error::RuntimeResult;
use crate::runtime::values::Value;

/// Substitutes `node` against `source` with the default depth limit.
pub fn substitute(node: &Node, source: BindingSource<'_>) -> RuntimeResult<Node> {
    Substituter::new(source).substitute(node)
}

/// Like [`substitute`], but yields the value a caller sees: a constant
/// unwraps to the value it holds, any other tree is returned quoted.
pub fn substitute_value(node: &Node, source: BindingSource<'_>) -> RuntimeResult<Value> {
    substitute(node, source).map(into_value)
}

pub(crate) fn into_value(node: Node) -> Value {
    match node {
        Node::Constant(value) => value,
        other => Value::language(other),
    }
}
