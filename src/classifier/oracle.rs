use crate::classifier::interface::{Classification, ClassifierClient};
use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct OraclePrediction {
    label: String,
    score: f64,
}

/// Blocking HTTP client for the classification oracle. Expects the oracle to
/// answer `POST endpoint` with `{"label": ..., "score": ...}` for a payload
/// of `{"text": content}`.
pub struct HttpOracleClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpOracleClient {
    pub fn new(endpoint: &str, timeout: Duration) -> CoreResult<Self> {
        validate_endpoint(endpoint)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::OracleUnavailable(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ClassifierClient for HttpOracleClient {
    fn classify(&self, content: &str) -> CoreResult<Classification> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "text": content }))
            .send()
            .map_err(|e| CoreError::OracleUnavailable(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(CoreError::OracleUnavailable(format!(
                "oracle returned status {}",
                resp.status()
            )));
        }
        let prediction: OraclePrediction = resp
            .json()
            .map_err(|e| CoreError::OracleUnavailable(format!("malformed oracle response: {e}")))?;
        Ok(Classification {
            label: prediction.label,
            score: prediction.score.clamp(0.0, 100.0),
        })
    }
}

fn validate_endpoint(endpoint: &str) -> CoreResult<()> {
    let url = url::Url::parse(endpoint)
        .map_err(|_| CoreError::InvalidInput("invalid oracle endpoint URL".to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(CoreError::InvalidInput(
            "oracle endpoint must be http or https".to_string(),
        ));
    }
    if url.host_str().is_none() {
        return Err(CoreError::InvalidInput(
            "oracle endpoint missing host".to_string(),
        ));
    }
    Ok(())
}
