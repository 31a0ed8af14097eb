// ABOUTME: Toolchain abstraction for building and deploying contract bundles.
// ABOUTME: A build is always followed by a best-effort clean whose failure is only logged.

mod error;
mod shell;

pub use error::{CaptureSnafu, ExitSnafu, SpawnSnafu, ToolchainError};
pub use shell::{RPC_URL_VAR, ShellToolchain, VERIFIER_URL_VAR};

use async_trait::async_trait;

use crate::deploy::{DeploymentKind, Secret};

/// External program that compiles and deploys a bundle.
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Build and deploy `kind`, returning combined stdout/stderr on success.
    async fn build(&self, kind: DeploymentKind, secret: &Secret) -> Result<String, ToolchainError>;

    /// Remove build artifacts.
    async fn clean(&self) -> Result<(), ToolchainError>;

    /// Build, then clean regardless of how the build went.
    ///
    /// A clean failure never replaces the build result.
    async fn run(&self, kind: DeploymentKind, secret: &Secret) -> Result<String, ToolchainError> {
        let result = self.build(kind, secret).await;

        match self.clean().await {
            Ok(()) => tracing::debug!("toolchain artifacts cleaned"),
            Err(e) => tracing::warn!(error = %e, "toolchain clean failed, ignoring"),
        }

        result
    }
}
