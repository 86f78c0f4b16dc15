//! Coercion rule outcomes

use crate::RawValue;

/// Result of running one coercion rule against a value
#[derive(Debug, Clone, PartialEq)]
pub enum CastOutcome {
    /// The rule produced a value
    Handled(RawValue),
    /// The rule produced SQL NULL
    Null,
    /// The rule declined; the host's own coercion decides
    Deferred,
}

impl CastOutcome {
    /// Check if the rule declined
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred)
    }

    /// Get the casted value, or `None` when deferred
    pub fn into_value(self) -> Option<RawValue> {
        match self {
            Self::Handled(value) => Some(value),
            Self::Null => Some(RawValue::Null),
            Self::Deferred => None,
        }
    }
}

impl From<RawValue> for CastOutcome {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Null => Self::Null,
            other => Self::Handled(other),
        }
    }
}
