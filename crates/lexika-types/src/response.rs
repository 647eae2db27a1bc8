use serde::{Deserialize, Serialize};

use crate::record::WordRecord;

/// Envelope returned by the notes API. A non-zero `code` means the request
/// was rejected upstream; `data` carries the payload when present.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Payload inside a successful [`ApiResponse`].
#[derive(Debug, Serialize, Deserialize)]
pub struct WordNotesResponse {
    pub word_notes: Vec<WordRecord>,
}
