// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

use crate::deploy::{DeployError, DeploymentKind, ProxyAddress};

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Only the deployed address, for scripts and CI
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    fn elapsed_secs(&self) -> Option<f64> {
        self.start_time.map(|t| t.elapsed().as_secs_f64())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Report a finished deployment.
    pub fn deployed(&self, kind: DeploymentKind, address: &ProxyAddress) {
        match self.mode {
            OutputMode::Normal => match self.elapsed_secs() {
                Some(elapsed) => {
                    println!("✓ {kind} proxy deployed at {address} ({elapsed:.1}s)")
                }
                None => println!("✓ {kind} proxy deployed at {address}"),
            },
            OutputMode::Quiet => println!("{address}"),
            OutputMode::Json => emit(
                &JsonEvent {
                    event: "deployed",
                    kind: Some(kind),
                    proxy_address: Some(address.as_str()),
                    error: None,
                    output: None,
                    duration_secs: self.elapsed_secs(),
                },
                false,
            ),
        }
    }

    /// Report a failed deployment as a JSON event.
    ///
    /// Normal and quiet modes print nothing here; the returned error is
    /// printed once by `main`.
    pub fn failed(&self, kind: DeploymentKind, err: &DeployError) {
        if self.mode != OutputMode::Json {
            return;
        }
        emit(
            &JsonEvent {
                event: "error",
                kind: Some(kind),
                proxy_address: None,
                error: Some(&err.to_string()),
                output: err.toolchain_output(),
                duration_secs: self.elapsed_secs(),
            },
            true,
        );
    }
}

fn emit(event: &JsonEvent<'_>, to_stderr: bool) {
    if let Ok(json) = serde_json::to_string(event) {
        if to_stderr {
            eprintln!("{json}");
        } else {
            println!("{json}");
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<DeploymentKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    proxy_address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
