use crate::config::{
    default_max_upload_bytes, default_transcription_model, default_transcription_timeout_secs,
    default_transcription_url,
};

use serde::{Deserialize, Serialize};

/// Upstream speech-to-text API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Transcriptions endpoint (OpenAI-compatible).
    #[serde(default = "default_transcription_url")]
    pub base_url: String,
    /// Model name sent with each upload.
    #[serde(default = "default_transcription_model")]
    pub model: String,
    /// Bearer credential. `OPENAI_API_KEY` takes precedence when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout.
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
    /// Largest accepted upload body.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: default_transcription_url(),
            model: default_transcription_model(),
            api_key: None,
            timeout_secs: default_transcription_timeout_secs(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}
