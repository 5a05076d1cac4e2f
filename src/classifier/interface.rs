use crate::error::CoreResult;
use serde::{Deserialize, Serialize};

/// Label stamped on a report when the oracle could not be consulted.
pub const FALLBACK_LABEL: &str = "Unverified";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub label: String,
    /// Confidence, 0-100.
    pub score: f64,
}

impl Classification {
    pub fn fallback() -> Self {
        Self {
            label: FALLBACK_LABEL.to_string(),
            score: 0.0,
        }
    }
}

/// A client for the external classification oracle. Implementations make at
/// most one outbound call per `classify` and never touch report state; a
/// failed call is reported as `CoreError::OracleUnavailable`.
pub trait ClassifierClient: Send + Sync {
    fn classify(&self, content: &str) -> CoreResult<Classification>;
}
