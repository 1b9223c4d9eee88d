//! Error types for semantic analysis and registration.
//!
//! Two distinct failure surfaces exist:
//!
//! - [`SemaError`] - failures of overload resolution itself (no viable
//!   candidate, ambiguity). "No conversion exists" is *not* an error; it is
//!   the `NoConversion` cost value and candidates carrying it are simply not
//!   viable.
//! - [`RegistrationError`] - failures while populating the registry.
//!
//! Contract violations (comparing deferred costs, malformed entries) are
//! assertions, not error values; they indicate a bug in the caller.

use thiserror::Error;

use crate::Span;

/// Errors produced by overload resolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemaError {
    /// No candidate accepts the given arguments.
    #[error("no matching overload for '{name}({args})' at {span}")]
    NoMatchingOverload {
        name: String,
        args: String,
        span: Span,
    },

    /// Two or more candidates tie and none is strictly better.
    #[error("call to '{name}' at {span} is ambiguous: candidates are {candidates}")]
    AmbiguousOverload {
        name: String,
        candidates: String,
        span: Span,
    },

    /// An invariant of the resolution machinery was violated.
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Errors produced while registering types and functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A type with the same hash is already registered.
    #[error("duplicate type registration: {name}")]
    DuplicateType { name: String },

    /// A function with the same hash is already registered.
    #[error("duplicate function registration: {name}")]
    DuplicateFunction { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sema_error_display() {
        let err = SemaError::NoMatchingOverload {
            name: "draw".to_string(),
            args: "int, float".to_string(),
            span: Span::new(2, 7, 4),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("draw"));
        assert!(msg.contains("2:7"));
    }

    #[test]
    fn registration_error_display() {
        let err = RegistrationError::DuplicateType {
            name: "Widget".to_string(),
        };
        assert!(format!("{}", err).contains("Widget"));
    }
}
