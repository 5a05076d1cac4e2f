use serde::{Deserialize, Serialize};

pub const DEFAULT_VOTE_THRESHOLD: u32 = 10;
pub const DEFAULT_MAX_UPDATE_RETRIES: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusConfig {
    /// Minimum total vote count before a report's status is finalized.
    pub vote_threshold: u32,
    /// Bounded retries for the optimistic vote update before the call is
    /// surfaced as a transient failure.
    pub max_update_retries: u32,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            vote_threshold: DEFAULT_VOTE_THRESHOLD,
            max_update_retries: DEFAULT_MAX_UPDATE_RETRIES,
        }
    }
}
