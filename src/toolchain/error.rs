// ABOUTME: Toolchain error types with SNAFU pattern.
// ABOUTME: Distinguishes spawn, output capture and non-zero exit failures.

use snafu::Snafu;
use std::process::ExitStatus;

/// Failure of an external toolchain command.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ToolchainError {
    #[snafu(display("failed to start `{program} {target}`: {source}"))]
    Spawn {
        program: String,
        target: String,
        source: std::io::Error,
    },

    #[snafu(display("failed to capture output of `{target}`: {source}"))]
    Capture {
        target: String,
        source: std::io::Error,
    },

    #[snafu(display("`{target}` exited with {status}: {output}"))]
    Exit {
        target: String,
        status: ExitStatus,
        output: String,
    },
}

impl ToolchainError {
    /// Combined stdout/stderr of a run that finished with a failing status.
    pub fn output(&self) -> Option<&str> {
        match self {
            ToolchainError::Exit { output, .. } => Some(output),
            _ => None,
        }
    }

    /// Exit code, if the process ran and exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ToolchainError::Exit { status, .. } => status.code(),
            _ => None,
        }
    }
}
