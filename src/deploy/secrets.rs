// ABOUTME: Loads the signing key from the dotenv secrets file for each deployment.
// ABOUTME: Process environment wins over the file, matching dotenv's no-override rule.

use std::fmt;
use std::path::Path;

use super::DeployError;

/// Variable holding the deployer's private key, both in the secrets file and
/// in the env file / child environment handed to the toolchain.
pub const SECRET_KEY: &str = "PRIVATE_KEY";

/// A secret value that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Read the signing key for a deployment.
///
/// The file must exist and parse; the key may come from either the process
/// environment or the file.
pub fn load_secret(path: &Path) -> Result<Secret, DeployError> {
    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| DeployError::config_load(path, e.to_string()))?;

    let mut from_file = None;
    for entry in entries {
        let (key, value) = entry.map_err(|e| DeployError::config_load(path, e.to_string()))?;
        if key == SECRET_KEY {
            from_file = Some(value);
        }
    }

    let value = match std::env::var(SECRET_KEY) {
        Ok(value) if !value.is_empty() => value,
        _ => from_file
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DeployError::config_load(path, format!("{SECRET_KEY} is not set")))?,
    };

    Ok(Secret::new(value))
}
