//! Synthesis errors.
//!
//! Missing annotations, unsupported arities and unresolved well-known types
//! are not errors: they shrink the result. Only host collaborator failures
//! and internal shape misuse end up here.

use thiserror::Error;

use crate::registry::FactoryError;

/// Synthesis could not complete.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthError {
    /// The host type factory failed.
    #[error(transparent)]
    Factory(#[from] FactoryError),
    /// A wrapper shape was applied to the wrong number of type arguments.
    #[error("wrapper shape expects {expected} type argument(s), got {actual}")]
    ShapeArguments {
        /// Arity of the shape.
        expected: usize,
        /// Arguments supplied.
        actual: usize,
    },
}
