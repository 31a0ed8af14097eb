// ABOUTME: Command module aggregator for the contract-deployer CLI.
// ABOUTME: Re-exports the one-shot deploy command handler.

mod deploy;

pub use deploy::deploy;
