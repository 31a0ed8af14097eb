// ABOUTME: Library root for contract-deployer - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod api;
pub mod config;
pub mod deploy;
pub mod error;
pub mod output;
pub mod toolchain;
