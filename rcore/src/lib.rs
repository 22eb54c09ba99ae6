// rcore
// Runtime core for an R dialect: NSE substitution and lazy vectors
pub mod ast;
pub mod config;
pub mod runtime;
pub mod substitute;
pub mod vector;

// Re-export the syntax tree and the runtime model.
pub use ast::*;
pub use runtime::{ArgumentEvaluator, Environment, Frame, RuntimeError, RuntimeResult, Value};

// Re-export the substitution entry points
pub use substitute::{duplicate, substitute, substitute_value, BindingSource, SubstituteCall};

// Re-export vector handles
pub use vector::{DoubleVector, Encoding, IntVector, Logical, LogicalVector, Vector};
