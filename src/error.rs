use thiserror::Error;

use crate::core::signature::Key;

/// Every failure a chain, pipe or signature can report.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DaisyError {
    #[error("No parameter matches {0}")]
    Lookup(Key),

    #[error("Unsupported operand for `|`: {0}")]
    UnsupportedOperand(String),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Cannot call an empty chain")]
    EmptyChain,

    #[error("Index {index} out of range for chain of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("Invalid slice: {0}")]
    InvalidSlice(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("{name} failed: {message}")]
    Function { name: String, message: String },

    #[error("Invalid declaration: {0}")]
    Declaration(String),

    #[error("Unknown color mode '{0}', expected auto, always or never")]
    InvalidColorMode(String),
}

impl DaisyError {
    /// Convenience for function bodies reporting their own failure.
    pub fn function(name: impl Into<String>, message: impl Into<String>) -> Self {
        DaisyError::Function {
            name: name.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DaisyError>;
