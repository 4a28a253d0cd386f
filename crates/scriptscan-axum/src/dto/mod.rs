//! Data Transfer Objects (DTOs) for the HTTP API contract.
//!
//! Responses reuse `scriptscan_core::ParsedScript`, whose serde shape is
//! already the wire format.

use serde::Deserialize;

/// Body of `POST /parse_text`. A missing `text` is treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseTextRequest {
    #[serde(default)]
    pub text: String,
}
