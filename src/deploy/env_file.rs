// ABOUTME: Materializes the toolchain's env file from request params.
// ABOUTME: Merges the signing key and per-kind constants, then overwrites the target file.

use std::collections::HashMap;
use std::path::Path;

use super::secrets::{SECRET_KEY, Secret};
use super::{DeployError, DeploymentKind, Params};

/// Merge caller params with the reserved keys the toolchain relies on.
///
/// Reserved keys always win: a caller-supplied `PRIVATE_KEY` or kind constant
/// is silently replaced.
pub fn merged_env(params: &Params, kind: DeploymentKind, secret: &Secret) -> HashMap<String, String> {
    let mut env = params.clone();
    env.insert(SECRET_KEY.to_string(), secret.expose().to_string());
    for (key, value) in kind.descriptor().injected {
        env.insert((*key).to_string(), (*value).to_string());
    }
    env
}

/// Render `KEY=VALUE` lines. Line order follows map iteration and carries no
/// meaning.
pub fn render(env: &HashMap<String, String>) -> String {
    env.iter()
        .map(|(key, value)| format!("{key}={value}\n"))
        .collect()
}

/// Write the merged env for `kind` to `path`, replacing any previous content.
pub fn write_env_file(
    params: &Params,
    path: &Path,
    kind: DeploymentKind,
    secret: &Secret,
) -> Result<(), DeployError> {
    let env = merged_env(params, kind, secret);
    std::fs::write(path, render(&env)).map_err(|source| DeployError::EnvWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), keys = env.len(), "env file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::DeployErrorKind;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn staking_gets_proxy_constant() {
        let env = merged_env(
            &params(&[("OWNER", "0xA")]),
            DeploymentKind::Staking,
            &Secret::new("0xkey"),
        );
        assert_eq!(env.len(), 3);
        assert_eq!(env["OWNER"], "0xA");
        assert_eq!(env["PRIVATE_KEY"], "0xkey");
        assert_eq!(env["DBC_AI_PROXY"], "0xa7B9f404653841227AF204a561455113F36d8EC8");
    }

    #[test]
    fn iao_constants_override_caller_values() {
        let env = merged_env(
            &params(&[("XAAIAO_TOKEN_IN_CONTRACT", "0xcaller"), ("PRIVATE_KEY", "nope")]),
            DeploymentKind::Iao,
            &Secret::new("0xkey"),
        );
        assert_eq!(
            env["XAAIAO_TOKEN_IN_CONTRACT"],
            "0x16d83F6B17914a4e88436251589194CA5AC0f452"
        );
        assert_eq!(env["PRIVATE_KEY"], "0xkey");
        assert!(env.contains_key("XAAIAO_NFT_HOLDER_CONTRACT"));
    }

    #[test]
    fn token_and_payment_inject_only_secret() {
        for kind in [DeploymentKind::Token, DeploymentKind::Payment] {
            let env = merged_env(&params(&[("OWNER", "0xA")]), kind, &Secret::new("k"));
            assert_eq!(env.len(), 2);
        }
    }

    #[test]
    fn render_writes_one_line_per_key() {
        let rendered = render(&params(&[("A", "1"), ("B", "two words")]));
        let mut lines: Vec<_> = rendered.lines().collect();
        lines.sort();
        assert_eq!(lines, vec!["A=1", "B=two words"]);
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn missing_directory_is_env_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(".env");

        let err = write_env_file(&Params::new(), &path, DeploymentKind::Token, &Secret::new("k"))
            .unwrap_err();
        assert_eq!(err.kind(), DeployErrorKind::EnvWrite);
        assert!(err.to_string().contains("missing"));
    }
}
