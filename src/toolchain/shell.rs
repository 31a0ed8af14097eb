// ABOUTME: Toolchain implementation that shells out to make/forge in the contracts directory.
// ABOUTME: Captures stdout and stderr through one pipe so their interleaving is preserved.

use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use snafu::ResultExt;
use tokio::process::Command;

use super::{CaptureSnafu, ExitSnafu, SpawnSnafu, Toolchain, ToolchainError};
use crate::config::{Config, NetworkConfig};
use crate::deploy::{DeploymentKind, SECRET_KEY, Secret};

/// Make variable carrying the chain RPC endpoint.
pub const RPC_URL_VAR: &str = "dbc-mainnet";
/// Make variable carrying the block explorer verifier endpoint.
pub const VERIFIER_URL_VAR: &str = "MAIN_NET_VERIFIER_URL";

/// Runs `<program> <target> dbc-mainnet=<rpc> MAIN_NET_VERIFIER_URL=<url>`
/// in the contracts directory.
///
/// The signing key is handed to the child through its environment, never on
/// the command line.
#[derive(Debug, Clone)]
pub struct ShellToolchain {
    program: String,
    clean: Vec<String>,
    dir: PathBuf,
    path_prefix: Option<String>,
    network: NetworkConfig,
}

impl ShellToolchain {
    pub fn new(program: impl Into<String>, dir: impl Into<PathBuf>, network: NetworkConfig) -> Self {
        Self {
            program: program.into(),
            clean: vec!["forge".to_string(), "clean".to_string()],
            dir: dir.into(),
            path_prefix: None,
            network,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            program: config.toolchain.program.clone(),
            clean: config.toolchain.clean.clone(),
            dir: config.contracts.dir.clone(),
            path_prefix: config.toolchain.path_prefix.clone(),
            network: config.network.clone(),
        }
    }

    /// Replace the clean command. An empty command disables cleaning.
    pub fn clean_command(mut self, command: Vec<String>) -> Self {
        self.clean = command;
        self
    }

    /// Directories searched before the inherited `PATH`.
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    /// Arguments for the deploy invocation of `kind`.
    pub fn build_args(&self, kind: DeploymentKind) -> Vec<String> {
        vec![
            kind.target().to_string(),
            format!("{RPC_URL_VAR}={}", self.network.rpc_url),
            format!("{VERIFIER_URL_VAR}={}", self.network.verifier_url),
        ]
    }

    fn search_path(&self) -> Option<OsString> {
        let prefix = self.path_prefix.as_ref()?;
        let mut path = OsString::from(prefix);
        if let Some(inherited) = std::env::var_os("PATH") {
            path.push(":");
            path.push(inherited);
        }
        Some(path)
    }

    /// Run a command to completion, returning its combined output.
    async fn exec(
        &self,
        program: &str,
        args: &[String],
        envs: &[(&str, &str)],
        label: &str,
    ) -> Result<String, ToolchainError> {
        let (mut reader, writer) = std::io::pipe().context(CaptureSnafu { target: label })?;
        let stderr = writer.try_clone().context(CaptureSnafu { target: label })?;

        // The command holds the parent's copies of the write end; it has to be
        // dropped before reading or the reader never sees EOF.
        let mut child = {
            let mut command = Command::new(program);
            command
                .args(args)
                .current_dir(&self.dir)
                .envs(envs.iter().copied())
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(stderr);
            if let Some(path) = self.search_path() {
                command.env("PATH", path);
            }
            command.spawn().context(SpawnSnafu {
                program,
                target: label,
            })?
        };

        let collector = tokio::task::spawn_blocking(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map(|_| buf)
        });

        let status = child.wait().await.context(CaptureSnafu { target: label })?;
        let bytes = collector
            .await
            .map_err(std::io::Error::other)
            .and_then(|read| read)
            .context(CaptureSnafu { target: label })?;
        let output = String::from_utf8_lossy(&bytes).into_owned();

        tracing::debug!(target_name = label, %status, "toolchain output:\n{output}");

        if !status.success() {
            return ExitSnafu {
                target: label,
                status,
                output,
            }
            .fail();
        }

        Ok(output)
    }
}

#[async_trait]
impl Toolchain for ShellToolchain {
    async fn build(&self, kind: DeploymentKind, secret: &Secret) -> Result<String, ToolchainError> {
        let args = self.build_args(kind);
        tracing::info!(
            dir = %self.dir.display(),
            "running {} {}",
            self.program,
            args.join(" ")
        );

        self.exec(
            &self.program,
            &args,
            &[(SECRET_KEY, secret.expose())],
            kind.target(),
        )
        .await
    }

    async fn clean(&self) -> Result<(), ToolchainError> {
        let Some((program, args)) = self.clean.split_first() else {
            return Ok(());
        };

        tracing::debug!(dir = %self.dir.display(), "running {}", self.clean.join(" "));
        self.exec(program, args, &[], "clean").await.map(|_| ())
    }
}
