// ABOUTME: Deployment kinds and their static toolchain descriptors.
// ABOUTME: One table row per contract bundle: make target plus injected env constants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which contract bundle a deployment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentKind {
    Iao,
    Staking,
    Token,
    Payment,
}

/// Per-kind data consumed by the toolchain integration.
///
/// Target names and constants are part of the Makefile's contract; changing
/// any of them breaks the external toolchain.
#[derive(Debug)]
pub struct KindDescriptor {
    /// Make target that builds and deploys the bundle.
    pub target: &'static str,
    /// Constants written into the env file after the caller's params.
    pub injected: &'static [(&'static str, &'static str)],
}

static IAO: KindDescriptor = KindDescriptor {
    target: "deploy-XAAAIO-dbc-mainnet",
    injected: &[
        (
            "XAAIAO_TOKEN_IN_CONTRACT",
            "0x16d83F6B17914a4e88436251589194CA5AC0f452",
        ),
        (
            "XAAIAO_NFT_HOLDER_CONTRACT",
            "0xc488736c09ab088e5203b48d973dca30581d6118",
        ),
    ],
};

static STAKING: KindDescriptor = KindDescriptor {
    target: "deploy-staking-dbc-mainnet",
    injected: &[("DBC_AI_PROXY", "0xa7B9f404653841227AF204a561455113F36d8EC8")],
};

static TOKEN: KindDescriptor = KindDescriptor {
    target: "deploy-token-dbc-mainnet",
    injected: &[],
};

static PAYMENT: KindDescriptor = KindDescriptor {
    target: "deploy-payment-mainnet",
    injected: &[],
};

impl DeploymentKind {
    pub const ALL: [DeploymentKind; 4] = [
        DeploymentKind::Iao,
        DeploymentKind::Staking,
        DeploymentKind::Token,
        DeploymentKind::Payment,
    ];

    pub fn descriptor(&self) -> &'static KindDescriptor {
        match self {
            DeploymentKind::Iao => &IAO,
            DeploymentKind::Staking => &STAKING,
            DeploymentKind::Token => &TOKEN,
            DeploymentKind::Payment => &PAYMENT,
        }
    }

    pub fn target(&self) -> &'static str {
        self.descriptor().target
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentKind::Iao => "iao",
            DeploymentKind::Staking => "staking",
            DeploymentKind::Token => "token",
            DeploymentKind::Payment => "payment",
        }
    }
}

impl fmt::Display for DeploymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown deployment kind: '{0}' (expected iao, staking, token or payment)")]
pub struct UnknownKind(pub String);

impl FromStr for DeploymentKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
