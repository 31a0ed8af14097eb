// ABOUTME: Error types for deployment requests.
// ABOUTME: Covers the busy gate, secrets loading, env file writes, toolchain runs, output parsing and task aborts.

use std::path::PathBuf;

use super::{DeploymentKind, InFlight};
use crate::toolchain::ToolchainError;

/// Errors a single deployment request can end with.
///
/// Every variant is scoped to the request that produced it; none of them is
/// meant to take the service down.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Another deployment holds the gate.
    #[error("a {} deployment is already in progress (started {})", .0.kind, .0.started_at)]
    Busy(InFlight),

    /// The secrets file could not be loaded or lacks the signing key.
    #[error("failed to load deployment secrets from {}: {reason}", path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// The env file consumed by the toolchain could not be written.
    #[error("failed to write env file {}: {source}", path.display())]
    EnvWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The toolchain failed to start or exited non-zero.
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    /// The toolchain succeeded but printed no proxy address.
    #[error("no proxy address found in toolchain output")]
    Parse,

    /// The task running the deployment panicked or was cancelled.
    #[error("{kind} deployment task aborted: {source}")]
    Aborted {
        kind: DeploymentKind,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    Busy,
    ConfigLoadFailed,
    EnvWrite,
    Toolchain,
    Parse,
    Aborted,
}

impl DeployError {
    pub(crate) fn config_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DeployError::ConfigLoadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Busy(_) => DeployErrorKind::Busy,
            DeployError::ConfigLoadFailed { .. } => DeployErrorKind::ConfigLoadFailed,
            DeployError::EnvWrite { .. } => DeployErrorKind::EnvWrite,
            DeployError::Toolchain(_) => DeployErrorKind::Toolchain,
            DeployError::Parse => DeployErrorKind::Parse,
            DeployError::Aborted { .. } => DeployErrorKind::Aborted,
        }
    }

    /// Returns the deployment holding the gate if this is a busy rejection.
    pub fn in_flight(&self) -> Option<&InFlight> {
        match self {
            DeployError::Busy(info) => Some(info),
            _ => None,
        }
    }

    /// Captured toolchain output, when the failure came from a finished run.
    pub fn toolchain_output(&self) -> Option<&str> {
        match self {
            DeployError::Toolchain(err) => err.output(),
            _ => None,
        }
    }
}
