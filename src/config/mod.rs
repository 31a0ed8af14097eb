// ABOUTME: Configuration types and parsing for deployer.yml.
// ABOUTME: Handles YAML parsing, defaults matching the production layout, and template generation.

mod auth;
mod env_value;

pub use auth::{AuthConfig, DEFAULT_PASSWORD, DEFAULT_USERNAME, PASSWORD_ENV_VAR};
pub use env_value::EnvValue;

use crate::deploy::DeploymentKind;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "deployer.yml";
pub const CONFIG_FILENAME_ALT: &str = "deployer.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".deployer/config.yml";

/// Service configuration.
///
/// Relative paths are resolved against the process working directory, the
/// same way the toolchain sees them.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Dotenv file holding `PRIVATE_KEY`, re-read on every deployment.
    #[serde(default = "default_secrets_file")]
    pub secrets_file: PathBuf,

    #[serde(default)]
    pub contracts: ContractsConfig,

    #[serde(default)]
    pub toolchain: ToolchainConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractsConfig {
    /// Foundry project root; the toolchain's working directory.
    #[serde(default = "default_contracts_dir")]
    pub dir: PathBuf,

    /// Env file the Makefile reads.
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Per-kind env file overrides.
    #[serde(default)]
    pub env_files: HashMap<DeploymentKind, PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolchainConfig {
    #[serde(default = "default_program")]
    pub program: String,

    /// Artifact cleanup command, run after every deployment. Empty disables it.
    #[serde(default = "default_clean")]
    pub clean: Vec<String>,

    /// Prepended to `PATH` for toolchain processes, e.g. to pin node and forge.
    #[serde(default)]
    pub path_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    #[serde(default = "default_verifier_url")]
    pub verifier_url: String,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8070))
}

fn default_secrets_file() -> PathBuf {
    PathBuf::from("./.env")
}

fn default_contracts_dir() -> PathBuf {
    PathBuf::from("./contracts")
}

fn default_env_file() -> PathBuf {
    PathBuf::from("./contracts/.env")
}

fn default_program() -> String {
    "make".to_string()
}

fn default_clean() -> Vec<String> {
    vec!["forge".to_string(), "clean".to_string()]
}

fn default_rpc_url() -> String {
    "https://rpc.dbcwallet.io".to_string()
}

fn default_verifier_url() -> String {
    "https://www.dbcscan.io/api".to_string()
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            dir: default_contracts_dir(),
            env_file: default_env_file(),
            env_files: HashMap::new(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            clean: default_clean(),
            path_prefix: None,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            verifier_url: default_verifier_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            secrets_file: default_secrets_file(),
            contracts: ContractsConfig::default(),
            toolchain: ToolchainConfig::default(),
            network: NetworkConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("loading config from {}", path.display());
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    fn validate(&self) -> Result<()> {
        if self.toolchain.program.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "toolchain.program cannot be empty".to_string(),
            ));
        }
        if self.network.rpc_url.trim().is_empty() || self.network.verifier_url.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "network.rpc_url and network.verifier_url are required".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, generate_template_yaml(&Config::default()))?;

    Ok(config_path)
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"listen: {listen}
secrets_file: {secrets}
contracts:
  dir: {dir}
  env_file: {env_file}
toolchain:
  program: {program}
  clean: [{clean}]
network:
  rpc_url: {rpc}
  verifier_url: {verifier}
auth:
  username: {username}
  password:
    env: {password_var}
    default: {password_default}
"#,
        listen = config.listen,
        secrets = config.secrets_file.display(),
        dir = config.contracts.dir.display(),
        env_file = config.contracts.env_file.display(),
        program = config.toolchain.program,
        clean = config.toolchain.clean.join(", "),
        rpc = config.network.rpc_url,
        verifier = config.network.verifier_url,
        username = config.auth.username,
        password_var = PASSWORD_ENV_VAR,
        password_default = DEFAULT_PASSWORD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_back_to_defaults() {
        let yaml = generate_template_yaml(&Config::default());
        let config = Config::from_yaml(&yaml).unwrap();

        assert_eq!(config.listen, default_listen());
        assert_eq!(config.contracts.env_file, default_env_file());
        assert_eq!(config.toolchain.clean, default_clean());
        assert_eq!(config.network, NetworkConfig::default());
        assert_eq!(config.auth.password, default_password_value());
    }

    fn default_password_value() -> EnvValue {
        AuthConfig::default().password
    }
}
