//! Error types for symbol resolution.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Why a symbol could not be resolved.
///
/// Every variant is the same failure from the caller's point of view: the
/// symbol is not available for invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("symbol name is empty")]
    EmptyName,

    #[error("symbol name contains an interior NUL byte: {name:?}")]
    InvalidName { name: String },

    #[error("symbol not found: {name}{}", loader_suffix(.message))]
    NotFound {
        name: String,
        message: Option<String>,
    },

    #[error("default-scope symbol lookup is not supported on this target: {name}")]
    Unsupported { name: String },
}

fn loader_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(" ({message})"),
        None => String::new(),
    }
}

impl ResolveError {
    pub fn not_found(name: &str) -> Self {
        ResolveError::NotFound {
            name: name.to_string(),
            message: None,
        }
    }

    /// The symbol name the failure refers to, when there is one.
    pub fn name(&self) -> Option<&str> {
        match self {
            ResolveError::EmptyName => None,
            ResolveError::InvalidName { name }
            | ResolveError::NotFound { name, .. }
            | ResolveError::Unsupported { name } => Some(name),
        }
    }
}
