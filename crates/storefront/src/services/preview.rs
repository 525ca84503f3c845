//! Image file preview.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// MIME type used when the host does not report one.
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// A file picked in a file input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// The file as a `data:` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        let mime = if self.mime_type.trim().is_empty() {
            FALLBACK_MIME_TYPE
        } else {
            self.mime_type.trim()
        };
        format!("data:{mime};base64,{}", STANDARD.encode(&self.bytes))
    }
}
