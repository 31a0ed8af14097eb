// ABOUTME: Deployment orchestrator: the single entry point for deploying a contract bundle.
// ABOUTME: Gate, secrets, env file, toolchain run and address parsing, in that order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{
    DeployError, DeployGate, DeploymentKind, InFlight, Params, ProxyAddress, extract_proxy_address,
    load_secret, write_env_file,
};
use crate::config::Config;
use crate::toolchain::{ShellToolchain, Toolchain};

/// Filesystem locations a deployment reads and writes.
#[derive(Debug, Clone)]
pub struct DeployPaths {
    /// Dotenv file holding the signing key.
    pub secrets_file: PathBuf,
    /// Env file consumed by the toolchain.
    pub env_file: PathBuf,
    /// Per-kind replacements for `env_file`.
    pub env_files: HashMap<DeploymentKind, PathBuf>,
}

impl DeployPaths {
    pub fn new(secrets_file: impl Into<PathBuf>, env_file: impl Into<PathBuf>) -> Self {
        Self {
            secrets_file: secrets_file.into(),
            env_file: env_file.into(),
            env_files: HashMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            secrets_file: config.secrets_file.clone(),
            env_file: config.contracts.env_file.clone(),
            env_files: config.contracts.env_files.clone(),
        }
    }

    pub fn env_file_for(&self, kind: DeploymentKind) -> &Path {
        self.env_files.get(&kind).unwrap_or(&self.env_file)
    }
}

/// Runs deployments one at a time.
///
/// Cheap to clone; clones share the gate, so handing one to every request
/// handler still allows only a single deployment process-wide.
#[derive(Clone)]
pub struct Orchestrator {
    gate: DeployGate,
    paths: Arc<DeployPaths>,
    toolchain: Arc<dyn Toolchain>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("gate", &self.gate)
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    pub fn new(paths: DeployPaths, toolchain: Arc<dyn Toolchain>) -> Self {
        Self {
            gate: DeployGate::new(),
            paths: Arc::new(paths),
            toolchain,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            DeployPaths::from_config(config),
            Arc::new(ShellToolchain::from_config(config)),
        )
    }

    /// The deployment in progress, if any.
    pub fn in_flight(&self) -> Option<InFlight> {
        self.gate.current()
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Deploy `kind` with the given params and return the new proxy address.
    ///
    /// Fails fast with [`DeployError::Busy`] if another deployment is running;
    /// in that case nothing is written and no process is started. Otherwise the
    /// run happens on its own task that owns the gate guard, so dropping this
    /// future (a disconnected client) neither frees the gate nor skips the
    /// toolchain's clean step.
    pub async fn deploy(
        &self,
        kind: DeploymentKind,
        params: Params,
    ) -> Result<ProxyAddress, DeployError> {
        let guard = self.gate.try_acquire(kind).inspect_err(|e| {
            tracing::warn!(%kind, "rejecting deployment: {e}");
        })?;

        tracing::info!(%kind, params = params.len(), "starting deployment");

        let this = self.clone();
        let task = tokio::spawn(async move {
            let _guard = guard;
            let result = this.run(kind, &params).await;
            match &result {
                Ok(address) => tracing::info!(%kind, %address, "deployment succeeded"),
                Err(e) => tracing::error!(%kind, "deployment failed: {e}"),
            }
            result
        });

        task.await.map_err(|source| {
            tracing::error!(%kind, "deployment task aborted: {source}");
            DeployError::Aborted { kind, source }
        })?
    }

    async fn run(&self, kind: DeploymentKind, params: &Params) -> Result<ProxyAddress, DeployError> {
        let secret = load_secret(&self.paths.secrets_file)?;

        write_env_file(params, self.paths.env_file_for(kind), kind, &secret)?;

        let output = self.toolchain.run(kind, &secret).await?;

        extract_proxy_address(&output)
    }
}
