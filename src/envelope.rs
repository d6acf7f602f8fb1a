//! Server response envelope and outcome classification.
//!
//! The backend wraps every response as `{ code, msg, status, data }`. The two
//! front-ends historically read success differently (the admin console checks
//! `code == 0`, the mini-program checks `status == true`); both encodings are
//! accepted here behind a single classifier. A 401 — whether it arrives as the
//! HTTP status or as the envelope code — is the distinguished session-invalid
//! condition and takes precedence over either success encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default user-facing message when the server supplies none.
pub const DEFAULT_ERROR_MSG: &str = "Error";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub msg: Option<String>,
}

impl Envelope {
    /// Lenient parse: bodies that are not an envelope object classify as a
    /// business error downstream rather than failing the call outright.
    pub fn from_value(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }

    pub fn msg_or_default(&self) -> &str {
        match self.msg.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => DEFAULT_ERROR_MSG,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Envelope indicated success; the wrapper is stripped to its payload.
    Success(Value),
    /// Well-formed error response.
    Business { code: i64, msg: String },
    /// Session-invalid marker, by either encoding.
    Unauthorized,
}

/// Normalize an HTTP status plus response envelope into one outcome.
/// The unauthorized check runs first and overrides the success encodings.
pub fn classify(http_status: u16, envelope: &Envelope) -> Outcome {
    if http_status == 401 || envelope.code == Some(401) {
        return Outcome::Unauthorized;
    }
    if envelope.status == Some(true) || envelope.code == Some(0) {
        return Outcome::Success(envelope.data.clone());
    }
    Outcome::Business {
        code: envelope.code.unwrap_or(-1),
        msg: envelope.msg_or_default().to_string(),
    }
}
