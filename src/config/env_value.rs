// ABOUTME: Config values that are either literal or read from an environment variable.
// ABOUTME: Used for credentials so they can stay out of the YAML file.

use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    pub fn from_env(var: impl Into<String>, default: Option<&str>) -> Self {
        EnvValue::FromEnv {
            var: var.into(),
            default: default.map(str::to_string),
        }
    }

    /// Resolve to a concrete value. An empty variable counts as unset.
    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) if !val.is_empty() => Ok(val),
                _ => default
                    .clone()
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }
}
