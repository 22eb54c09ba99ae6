// Error handling for the runtime core

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors surfaced by substitution, argument matching and vector factories.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// `env` evaluated to something that is neither an environment nor a list
    #[error("Invalid environment: '{argument}' must be an environment or a list")]
    InvalidEnvironment { argument: String },

    /// Substitution produced something that cannot be expressed, e.g. a call
    /// whose target resolves to a non-name value
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Unused argument: {0}")]
    UnusedArgument(String),

    #[error("Missing required argument '{0}'")]
    MissingArgument(String),

    #[error("Duplicate argument: '{0}' matched by multiple actual arguments")]
    DuplicateArgument(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index out of bounds: index {index} is not in range [0, {length})")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Recursion guard tripped while walking a syntax tree
    #[error("Stack overflow: {0}")]
    StackOverflow(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Logic errors in the runtime itself
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl RuntimeError {
    pub fn unsupported(message: impl Into<String>) -> RuntimeError {
        RuntimeError::Unsupported(message.into())
    }
}
