// ABOUTME: Deployment core: busy gate, env materialization, output parsing and orchestration.
// ABOUTME: Exports the orchestrator plus the pieces it is built from.

mod env_file;
mod error;
mod gate;
mod kind;
mod orchestrator;
mod parser;
mod secrets;

use std::collections::HashMap;

pub use env_file::{merged_env, render, write_env_file};
pub use error::{DeployError, DeployErrorKind};
pub use gate::{DeployGate, GateGuard, InFlight};
pub use kind::{DeploymentKind, KindDescriptor, UnknownKind};
pub use orchestrator::{DeployPaths, Orchestrator};
pub use parser::{PROXY_MARKER, ProxyAddress, extract_proxy_address};
pub use secrets::{SECRET_KEY, Secret, load_secret};

/// Env-file parameters for one deployment, already stringified.
pub type Params = HashMap<String, String>;
