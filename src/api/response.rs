// ABOUTME: Uniform JSON envelope returned by every API route.
// ABOUTME: Mirrors the codes clients already parse: 200 success, 400 rejected, 500 failed.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::deploy::ProxyAddress;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardResponse {
    pub code: u16,
    pub message: String,
    pub data: Value,
}

impl StandardResponse {
    fn error(code: u16, message: &str, error: impl Into<String>) -> Self {
        Self {
            code,
            message: message.to_string(),
            data: json!({ "error": error.into() }),
        }
    }

    pub fn deployed(address: &ProxyAddress) -> Self {
        Self {
            code: 200,
            message: "Deployment successful".to_string(),
            data: json!({ "proxy_address": address }),
        }
    }

    pub fn pending() -> Self {
        Self::error(400, "Pending", "Pending")
    }

    pub fn invalid_request(error: impl Into<String>) -> Self {
        Self::error(400, "Invalid request parameters", error)
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::error(500, "Deployment failed", error)
    }

    pub fn unauthorized(message: &str, error: &str) -> Self {
        Self::error(401, message, error)
    }
}
