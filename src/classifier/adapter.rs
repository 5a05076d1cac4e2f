use crate::classifier::interface::{Classification, ClassifierClient};

/// Wraps a `ClassifierClient` and absorbs oracle failure into the fallback
/// pair. Classification failure must never block report creation, so this is
/// the only place an `OracleUnavailable` error terminates.
pub struct ClassifierAdapter<C: ClassifierClient> {
    client: C,
}

impl<C: ClassifierClient> ClassifierAdapter<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Returns the oracle's classification, or `("Unverified", 0)` with
    /// `degraded = true` when the oracle call failed.
    pub fn classify_or_fallback(&self, content: &str) -> (Classification, bool) {
        match self.client.classify(content) {
            Ok(classification) => (classification, false),
            Err(_) => (Classification::fallback(), true),
        }
    }
}
