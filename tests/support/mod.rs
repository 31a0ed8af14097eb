// ABOUTME: Test support utilities.
// ABOUTME: Provides a stub toolchain, executable script fixtures and a deploy workspace.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use contract_deployer::deploy::{DeployPaths, DeploymentKind, SECRET_KEY, Secret};
use contract_deployer::toolchain::{Toolchain, ToolchainError};
use tempfile::TempDir;
use tokio::sync::Notify;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("contract_deployer=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Secret value the fixture writes into its secrets file.
pub const FILE_SECRET: &str = "0xfeedfacecafebeef";

/// What the orchestrator should resolve as the signing key: a non-empty
/// `PRIVATE_KEY` in the test process environment wins over the file.
#[allow(dead_code)]
pub fn expected_secret() -> String {
    std::env::var(SECRET_KEY)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| FILE_SECRET.to_string())
}

/// Temp directory laid out like a deployment host: secrets file at the root,
/// a contracts directory holding the toolchain's env file.
#[allow(dead_code)]
pub struct Workspace {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("contracts")).unwrap();
        fs::write(
            dir.path().join(".env"),
            format!("{SECRET_KEY}={FILE_SECRET}\n"),
        )
        .unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn contracts_dir(&self) -> PathBuf {
        self.root().join("contracts")
    }

    pub fn env_file(&self) -> PathBuf {
        self.contracts_dir().join(".env")
    }

    pub fn secrets_file(&self) -> PathBuf {
        self.root().join(".env")
    }

    pub fn paths(&self) -> DeployPaths {
        DeployPaths::new(self.secrets_file(), self.env_file())
    }

    /// Env file content as sorted `KEY=VALUE` lines.
    pub fn env_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = fs::read_to_string(self.env_file())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        lines
    }

    /// Write an executable shell script under the workspace root.
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();

        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }
}

/// Blocks `build` until the test releases it.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct Hold {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

/// In-memory toolchain with a fixed outcome and call counters.
#[allow(dead_code)]
pub struct StubToolchain {
    output: String,
    exit_code: Option<i32>,
    hold: Option<Hold>,
    pub builds: AtomicUsize,
    pub cleans: AtomicUsize,
    pub last_kind: parking_lot::Mutex<Option<DeploymentKind>>,
}

#[allow(dead_code)]
impl StubToolchain {
    /// Succeeds and prints `output`.
    pub fn succeeding(output: &str) -> Arc<Self> {
        Arc::new(Self::new(output, None, None))
    }

    /// Exits with `code` after printing `output`.
    pub fn failing(output: &str, code: i32) -> Arc<Self> {
        Arc::new(Self::new(output, Some(code), None))
    }

    /// Succeeds with `output`, but only once `hold.release` is notified.
    pub fn held(output: &str, hold: Hold) -> Arc<Self> {
        Arc::new(Self::new(output, None, Some(hold)))
    }

    fn new(output: &str, exit_code: Option<i32>, hold: Option<Hold>) -> Self {
        Self {
            output: output.to_string(),
            exit_code,
            hold,
            builds: AtomicUsize::new(0),
            cleans: AtomicUsize::new(0),
            last_kind: parking_lot::Mutex::new(None),
        }
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn cleans(&self) -> usize {
        self.cleans.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Toolchain for StubToolchain {
    async fn build(&self, kind: DeploymentKind, _: &Secret) -> Result<String, ToolchainError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        *self.last_kind.lock() = Some(kind);

        if let Some(hold) = &self.hold {
            hold.entered.notify_one();
            hold.release.notified().await;
        }

        match self.exit_code {
            None => Ok(self.output.clone()),
            Some(code) => Err(ToolchainError::Exit {
                target: kind.target().to_string(),
                status: std::process::ExitStatus::from_raw(code << 8),
                output: self.output.clone(),
            }),
        }
    }

    async fn clean(&self) -> Result<(), ToolchainError> {
        self.cleans.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
