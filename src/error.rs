use thiserror::Error;

#[derive(Error, Debug)]
pub enum RollcallError {
    #[error("github error: {0}")]
    GitHub(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RollcallError>;

/// Per-participant failure. Caught at the participant boundary and shown in
/// place of a status; never propagated out of a check cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("user not found")]
    UserNotFound,

    #[error("failed to fetch")]
    FetchFailed { detail: String },

    #[error("{0}")]
    Upstream(String),

    #[error("data not found")]
    DataNotFound,

    #[error("request timed out")]
    TimedOut,
}

impl CheckError {
    pub fn fetch_failed(detail: impl Into<String>) -> Self {
        CheckError::FetchFailed {
            detail: detail.into(),
        }
    }

    /// Message plus the underlying cause where one was captured.
    pub fn detail(&self) -> String {
        match self {
            CheckError::FetchFailed { detail } if !detail.is_empty() => {
                format!("{self}: {detail}")
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_differs_from_fetch_failure() {
        let nf = CheckError::UserNotFound.to_string();
        let ff = CheckError::fetch_failed("HTTP 500").to_string();
        assert_eq!(nf, "user not found");
        assert_eq!(ff, "failed to fetch");
        assert_ne!(nf, ff);
    }

    #[test]
    fn detail_includes_cause() {
        let err = CheckError::fetch_failed("connection reset");
        assert_eq!(err.detail(), "failed to fetch: connection reset");
        assert_eq!(CheckError::DataNotFound.detail(), "data not found");
    }
}
