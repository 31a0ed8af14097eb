// ABOUTME: Extracts the deployed proxy address from free-form toolchain output.
// ABOUTME: Matches the deploy script's marker line; the last match wins.

use std::fmt;

use serde::Serialize;

use super::DeployError;

/// Line printed by the deploy scripts once the proxy is live.
pub const PROXY_MARKER: &str = "Proxy Contract deployed at:";

/// On-chain address of a deployed proxy contract. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProxyAddress(String);

impl ProxyAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProxyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scan `output` for the marker line and return the address after it.
///
/// When a script prints the marker more than once, the last non-empty
/// address is returned.
pub fn extract_proxy_address(output: &str) -> Result<ProxyAddress, DeployError> {
    output
        .lines()
        .filter_map(|line| {
            let (_, rest) = line.split_once(PROXY_MARKER)?;
            let address = rest.trim();
            (!address.is_empty()).then(|| ProxyAddress(address.to_string()))
        })
        .last()
        .ok_or(DeployError::Parse)
}
