//! Unified gateway error model shared by both client front-ends.
//! This module provides a common error enum used across the request gateway,
//! the navigation guard and callers, along with helper constructors.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GatewayError {
    /// No response reached the client (network failure or timeout).
    Transport { message: String },
    /// Session-invalid marker (HTTP 401 or envelope code 401).
    Unauthorized { message: String },
    /// Well-formed server error response carrying the server's code and message.
    Business { code: i64, message: String },
}

impl GatewayError {
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        GatewayError::Transport { message: msg.into() }
    }
    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        GatewayError::Unauthorized { message: msg.into() }
    }
    pub fn business<S: Into<String>>(code: i64, msg: S) -> Self {
        GatewayError::Business { code, message: msg.into() }
    }

    pub fn message(&self) -> &str {
        match self {
            GatewayError::Transport { message }
            | GatewayError::Unauthorized { message }
            | GatewayError::Business { message, .. } => message.as_str(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport { .. })
    }

    /// Server business code, when the error carries one.
    pub fn business_code(&self) -> Option<i64> {
        match self {
            GatewayError::Business { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Transport { message } => write!(f, "transport: {}", message),
            GatewayError::Unauthorized { message } => write!(f, "unauthorized: {}", message),
            GatewayError::Business { code, message } => write!(f, "business[{}]: {}", code, message),
        }
    }
}

impl std::error::Error for GatewayError {}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<anyhow::Error> for GatewayError {
    fn from(err: anyhow::Error) -> Self {
        // Default mapping: anything that escaped the transport seam is a transport failure
        GatewayError::Transport { message: err.to_string() }
    }
}
