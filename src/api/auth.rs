// ABOUTME: HTTP basic-auth middleware guarding every API route.
// ABOUTME: Rejections use the standard envelope with a 401 status.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::StandardResponse;
use crate::config::AuthConfig;
use crate::error::Result;

const REALM: &str = "Basic realm=\"Authorization Required\"";

/// Resolved username/password pair.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Ok(Self::new(config.username.clone(), config.password.resolve()?))
    }

    /// Check the base64 payload of a `Basic` authorization header.
    pub fn verify(&self, encoded: &str) -> bool {
        let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let decoded = String::from_utf8_lossy(&decoded);
        match decoded.split_once(':') {
            Some((user, pass)) => user == self.username && pass == self.password,
            None => false,
        }
    }
}

fn reject(message: &str, error: &str, challenge: bool) -> Response {
    let mut response = (
        StatusCode::UNAUTHORIZED,
        Json(StandardResponse::unauthorized(message, error)),
    )
        .into_response();
    if challenge {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(REALM));
    }
    response
}

pub async fn basic_auth(
    State(credentials): State<Arc<Credentials>>,
    req: Request,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default())
        .unwrap_or_default();

    if header.is_empty() {
        tracing::debug!("missing Authorization header");
        return reject("Unauthorized", "Authorization header is required", true);
    }

    let Some(encoded) = header.strip_prefix("Basic ") else {
        tracing::debug!("non-basic Authorization header");
        return reject(
            "Invalid authorization format",
            "Invalid authorization format",
            false,
        );
    };

    if !credentials.verify(encoded) {
        tracing::debug!("invalid basic-auth credentials");
        return reject("Invalid credentials", "Invalid credentials", false);
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(pair: &str) -> String {
        STANDARD.encode(pair)
    }

    #[test]
    fn accepts_matching_pair() {
        let creds = Credentials::new("admin", "admin123");
        assert!(creds.verify(&encode("admin:admin123")));
    }

    #[test]
    fn password_may_contain_colons() {
        let creds = Credentials::new("admin", "a:b:c");
        assert!(creds.verify(&encode("admin:a:b:c")));
    }

    #[test]
    fn rejects_wrong_password_and_garbage() {
        let creds = Credentials::new("admin", "admin123");
        assert!(!creds.verify(&encode("admin:nope")));
        assert!(!creds.verify(&encode("admin")));
        assert!(!creds.verify("%%%not-base64"));
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials::new("admin", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
