use std::fmt;

/// Machine-readable error codes for callers that branch on failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidSnapshot,
    EmptyNodeId,
    DuplicateNode,
    UnknownNode,
    InvalidConfig,
    Cancelled,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidSnapshot => "E1001",
            Self::EmptyNodeId => "E1002",
            Self::DuplicateNode => "E1003",
            Self::UnknownNode => "E2001",
            Self::InvalidConfig => "E3001",
            Self::Cancelled => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidSnapshot => "Snapshot could not be parsed",
            Self::EmptyNodeId => "Node with empty id",
            Self::DuplicateNode => "Duplicate node id",
            Self::UnknownNode => "Node not found in snapshot",
            Self::InvalidConfig => "Invalid analytics configuration",
            Self::Cancelled => "Computation cancelled",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidSnapshot => {
                Some("Every node needs an `id`; every edge needs `from` and `to`.")
            }
            Self::EmptyNodeId => Some("Assign a non-empty id to every node."),
            Self::DuplicateNode => Some("Node ids must be unique within one snapshot."),
            Self::UnknownNode => Some("Query endpoints must be ids present in the snapshot."),
            Self::InvalidConfig => Some("Fix the value in the casenet config file and retry."),
            Self::Cancelled => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Hard failures of the analytics layer.
///
/// Partial data (edges pointing at unknown nodes) and exhausted computation
/// budgets are *not* errors: they surface as diagnostics and `truncated`
/// flags on the returned reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyticsError {
    /// The snapshot document is malformed or misses a required field.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A node carries an empty id.
    #[error("node at position {index} has an empty id")]
    EmptyNodeId { index: usize },

    /// Two nodes share an id.
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    /// A query referenced an id that is not in the snapshot.
    #[error("node not found in snapshot: {0}")]
    UnknownNode(String),

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The caller's cancel token fired before the computation finished.
    #[error("computation cancelled")]
    Cancelled,
}

impl AnalyticsError {
    /// The stable machine code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidSnapshot(_) => ErrorCode::InvalidSnapshot,
            Self::EmptyNodeId { .. } => ErrorCode::EmptyNodeId,
            Self::DuplicateNode(_) => ErrorCode::DuplicateNode,
            Self::UnknownNode(_) => ErrorCode::UnknownNode,
            Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Self::Cancelled => ErrorCode::Cancelled,
        }
    }

    /// Returns `true` for errors caused by the caller-supplied snapshot or
    /// query (rejected before any computation starts).
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSnapshot(_)
                | Self::EmptyNodeId { .. }
                | Self::DuplicateNode(_)
                | Self::UnknownNode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalyticsError, ErrorCode};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::InvalidSnapshot,
            ErrorCode::EmptyNodeId,
            ErrorCode::DuplicateNode,
            ErrorCode::UnknownNode,
            ErrorCode::InvalidConfig,
            ErrorCode::Cancelled,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::UnknownNode.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn input_errors_are_classified() {
        assert!(AnalyticsError::DuplicateNode("a".into()).is_input_error());
        assert!(AnalyticsError::UnknownNode("a".into()).is_input_error());
        assert!(!AnalyticsError::Cancelled.is_input_error());
        assert!(!AnalyticsError::InvalidConfig("x".into()).is_input_error());
    }

    #[test]
    fn error_maps_to_code() {
        let err = AnalyticsError::EmptyNodeId { index: 3 };
        assert_eq!(err.code(), ErrorCode::EmptyNodeId);
        assert_eq!(err.to_string(), "node at position 3 has an empty id");
    }
}
