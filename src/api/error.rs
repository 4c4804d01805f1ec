use thiserror::Error;
use uuid::Uuid;

/// Maximum length for response-body previews embedded in error messages
const MAX_DETAIL_LENGTH: usize = 200;

/// Errors surfaced by the API client.
///
/// Read operations (list, report) recover from an unreachable server by
/// serving locally generated data, so `Unreachable` stays inside the client
/// for those paths. Write operations raise `NotFound`/`DuplicateId` even in
/// fallback mode, since there is no sensible default to return.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("server unreachable: {0}")]
    Unreachable(String),

    #[error("request was cancelled")]
    Cancelled,

    #[error("organization {0} not found")]
    NotFound(Uuid),

    #[error("organization {0} already exists")]
    DuplicateId(Uuid),

    #[error("report period requires both a start and an end date")]
    MissingPeriod,

    #[error("report period ends before it starts")]
    InvalidRange,

    #[error("unexpected response shape: {0}")]
    InvalidResponseShape(String),
}

impl ApiError {
    /// True for caller-initiated cancellation, which views treat as a no-op.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

/// Truncate a response body so error messages stay loggable.
pub(crate) fn preview(body: &str) -> String {
    if body.len() <= MAX_DETAIL_LENGTH {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX_DETAIL_LENGTH).collect();
        format!("{}... (truncated, {} total bytes)", cut, body.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_keeps_short_bodies_intact() {
        assert_eq!(preview("not json"), "not json");
    }

    #[test]
    fn test_preview_truncates_long_bodies() {
        let body = "x".repeat(5000);
        let shown = preview(&body);
        assert!(shown.len() < 300);
        assert!(shown.contains("5000 total bytes"));
    }

    #[test]
    fn test_cancelled_is_distinguishable() {
        assert!(ApiError::Cancelled.is_cancelled());
        assert!(!ApiError::MissingPeriod.is_cancelled());
    }
}
