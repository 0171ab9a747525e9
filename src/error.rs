//! Error taxonomy for timetable construction and evolution.
//!
//! Configuration and capacity problems are detected once, before any
//! chromosome is built, and abort the run. Nothing is retried.

/// Errors surfaced by requirement loading, problem setup, and the engine.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// Malformed or missing requirement fields, or invalid run parameters.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// More sessions than distinct slots; construction cannot give every
    /// session its own slot.
    #[error("capacity error: {sessions} sessions cannot fit into {slots} slots")]
    Capacity {
        /// Expanded session count.
        sessions: usize,
        /// Distinct (day, time) slots available.
        slots: usize,
    },

    /// The mating pool cannot yield two distinct parents.
    #[error("degenerate selection: mating pool of {pool} cannot supply two distinct parents")]
    DegenerateSelection {
        /// Effective mating pool size.
        pool: usize,
    },

    /// Reading a requirement or grid document failed.
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    /// A requirement or grid document is not valid JSON for its schema.
    #[error("failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TimetableError>;

impl TimetableError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message() {
        let err = TimetableError::Capacity {
            sessions: 26,
            slots: 25,
        };
        assert_eq!(
            err.to_string(),
            "capacity error: 26 sessions cannot fit into 25 slots"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TimetableError = parse.into();
        assert!(matches!(err, TimetableError::Parse(_)));
    }
}
