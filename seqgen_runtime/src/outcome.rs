//! Classified results of executing one statement

use std::time::Duration;

use thiserror::Error;

use crate::value::Value;

/// Exception raised by subject code while a statement executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{exception_type}: {message}")]
pub struct Thrown {
    pub exception_type: String,
    pub message: String,
}

impl Thrown {
    pub fn new(exception_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            exception_type: exception_type.into(),
            message: message.into(),
        }
    }
}

/// Result of dynamically performing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// The statement completed and produced `value`
    Normal { value: Value, elapsed: Duration },
    /// Subject code raised an exception
    Exceptional { thrown: Thrown, elapsed: Duration },
    /// The statement was skipped because an earlier one did not complete
    NotExecuted,
}

impl ExecutionOutcome {
    pub fn normal(value: Value, elapsed: Duration) -> Self {
        ExecutionOutcome::Normal { value, elapsed }
    }

    pub fn exceptional(thrown: Thrown, elapsed: Duration) -> Self {
        ExecutionOutcome::Exceptional { thrown, elapsed }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, ExecutionOutcome::Normal { .. })
    }

    pub fn is_exceptional(&self) -> bool {
        matches!(self, ExecutionOutcome::Exceptional { .. })
    }

    /// The produced value, for normal outcomes
    pub fn value(&self) -> Option<&Value> {
        match self {
            ExecutionOutcome::Normal { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn thrown(&self) -> Option<&Thrown> {
        match self {
            ExecutionOutcome::Exceptional { thrown, .. } => Some(thrown),
            _ => None,
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            ExecutionOutcome::Normal { elapsed, .. }
            | ExecutionOutcome::Exceptional { elapsed, .. } => Some(*elapsed),
            ExecutionOutcome::NotExecuted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outcome_accessors() {
        let normal = ExecutionOutcome::normal(Value::Int(1), Duration::from_millis(2));
        assert!(normal.is_normal());
        assert_eq!(normal.value(), Some(&Value::Int(1)));
        assert_eq!(normal.elapsed(), Some(Duration::from_millis(2)));
        assert!(normal.thrown().is_none());

        let thrown = Thrown::new("IllegalStateException", "closed");
        let exceptional = ExecutionOutcome::exceptional(thrown.clone(), Duration::ZERO);
        assert!(exceptional.is_exceptional());
        assert_eq!(exceptional.thrown(), Some(&thrown));
        assert!(exceptional.value().is_none());

        assert_eq!(ExecutionOutcome::NotExecuted.elapsed(), None);
    }

    #[test]
    fn test_thrown_display() {
        let thrown = Thrown::new("IllegalStateException", "closed");
        assert_eq!(thrown.to_string(), "IllegalStateException: closed");
    }
}
