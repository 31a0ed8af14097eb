// ABOUTME: Basic-auth credentials for the HTTP API.
// ABOUTME: Username is literal; password defaults to $ADMIN_PASSWORD, then "admin123".

use super::EnvValue;
use serde::Deserialize;

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin123";
pub const PASSWORD_ENV_VAR: &str = "ADMIN_PASSWORD";

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: EnvValue,
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_password() -> EnvValue {
    EnvValue::from_env(PASSWORD_ENV_VAR, Some(DEFAULT_PASSWORD))
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}
