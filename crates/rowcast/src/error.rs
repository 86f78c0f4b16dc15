//! Cast errors

use std::num::ParseIntError;
use thiserror::Error;

/// Error raised by the host's own coercion, passed through untouched
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for cast operations
pub type CastResult<T> = Result<T, CastError>;

/// Failure to find a named class in the host type namespace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// A constant in the path does not exist
    #[error("Uninitialized constant {path}")]
    MissingConstant { path: String },

    /// The subsystem owning the path is not loaded
    #[error("Subsystem not loaded: {name}")]
    SubsystemUnavailable { name: String },
}

impl LookupError {
    /// Create a missing constant error from path segments
    pub fn missing(path: &[&str]) -> Self {
        Self::MissingConstant {
            path: path.join("::"),
        }
    }

    /// Create a subsystem unavailable error
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self::SubsystemUnavailable { name: name.into() }
    }
}

/// Errors that can occur while casting a value
#[derive(Debug, Error)]
pub enum CastError {
    /// Integer column received a non-numeric string
    #[error("invalid value for Integer(): {value:?}")]
    InvalidInteger {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A required type could not be resolved from the host
    #[error("Cannot resolve required type: {0}")]
    Initialization(#[source] LookupError),

    /// The host's fallback coercion failed
    #[error(transparent)]
    Host(HostError),

    /// The process-wide caster was used before being installed
    #[error("No process-wide caster installed")]
    NotInstalled,
}

impl CastError {
    /// Create an invalid integer error
    pub fn invalid_integer(value: impl Into<String>, source: ParseIntError) -> Self {
        Self::InvalidInteger {
            value: value.into(),
            source,
        }
    }

    /// Check if this is the integer parse failure
    pub fn is_invalid_integer(&self) -> bool {
        matches!(self, Self::InvalidInteger { .. })
    }
}

impl From<LookupError> for CastError {
    fn from(error: LookupError) -> Self {
        Self::Initialization(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::missing(&["ActiveRecord", "Type", "Money"]);
        assert_eq!(
            err.to_string(),
            "Uninitialized constant ActiveRecord::Type::Money"
        );
    }

    #[test]
    fn test_invalid_integer_display() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = CastError::invalid_integer("abc", source);
        assert!(err.is_invalid_integer());
        assert_eq!(err.to_string(), r#"invalid value for Integer(): "abc""#);
    }

    #[test]
    fn test_host_error_is_transparent() {
        let host: HostError = "boom".into();
        let err = CastError::Host(host);
        assert_eq!(err.to_string(), "boom");
    }
}
