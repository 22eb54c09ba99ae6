//! Runtime model
//!
//! Values, environments and activation frames as seen by the substitution
//! engine. Evaluation itself lives outside this crate; the evaluator is only
//! reached through the [`ArgumentEvaluator`] seam.

pub mod environment;
pub mod error;
pub mod values;

pub use environment::{Environment, Frame};
pub use error::{RuntimeError, RuntimeResult};
pub use values::{Closure, Dots, DotsEntry, List, Promise, Value};

use crate::ast::Node;

/// Evaluates builtin arguments that are not taken unevaluated.
pub trait ArgumentEvaluator {
    fn evaluate(&mut self, expression: &Node, frame: Option<&Frame>) -> RuntimeResult<Value>;
}
