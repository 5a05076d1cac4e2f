use crate::error::{CoreError, CoreResult};
use crate::report::model::SourceKind;
use serde::{Deserialize, Serialize};

/// A submission as handed over by the HTTP layer: a URL, raw text, or both
/// (URL wins). `submitter_id` is an opaque identity string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub url: Option<String>,
    pub text: Option<String>,
    pub submitter_id: String,
}

/// Picks the content to analyze and its kind. Whitespace-trimmed exact
/// equality of this string is the deduplication key; a blank or absent
/// submission is rejected here, before any classifier or store work.
pub fn normalize_submission(req: &SubmitRequest) -> CoreResult<(String, SourceKind)> {
    let (raw, kind) = match (&req.url, &req.text) {
        (Some(url), _) if !url.trim().is_empty() => (url, SourceKind::Url),
        (_, Some(text)) if !text.trim().is_empty() => (text, SourceKind::Text),
        _ => {
            return Err(CoreError::InvalidInput(
                "no URL or text provided".to_string(),
            ))
        }
    };
    Ok((raw.trim().to_string(), kind))
}
