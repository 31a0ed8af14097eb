// ABOUTME: Deploy command implementation.
// ABOUTME: Parses KEY=VALUE params and runs one deployment through the orchestrator.

use contract_deployer::config::Config;
use contract_deployer::deploy::{DeploymentKind, Orchestrator, Params};
use contract_deployer::error::{Error, Result};
use contract_deployer::output::Output;

/// Deploy a single bundle and report the proxy address.
pub async fn deploy(config: &Config, kind: &str, raw: &[String], mut output: Output) -> Result<()> {
    let kind: DeploymentKind = kind.parse()?;
    let params = parse_params(raw)?;
    let orchestrator = Orchestrator::from_config(config);

    output.start_timer();
    output.progress(&format!(
        "Deploying {kind} ({}) from {}",
        kind.target(),
        config.contracts.dir.display()
    ));

    match orchestrator.deploy(kind, params).await {
        Ok(address) => {
            output.deployed(kind, &address);
            Ok(())
        }
        Err(e) => {
            output.failed(kind, &e);
            Err(e.into())
        }
    }
}

/// Split `KEY=VALUE` arguments. The value may itself contain `=`.
fn parse_params(raw: &[String]) -> Result<Params> {
    raw.iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(Error::InvalidParam(arg.clone())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_key_value_pairs() {
        let params = parse_params(&args(&["OWNER=0xA", "PROJECT_NAME=My Project"])).unwrap();
        assert_eq!(params["OWNER"], "0xA");
        assert_eq!(params["PROJECT_NAME"], "My Project");
    }

    #[test]
    fn value_may_contain_equals() {
        let params = parse_params(&args(&["NOTE=a=b"])).unwrap();
        assert_eq!(params["NOTE"], "a=b");
    }

    #[test]
    fn rejects_missing_separator_or_key() {
        assert!(matches!(
            parse_params(&args(&["OWNER"])),
            Err(Error::InvalidParam(_))
        ));
        assert!(parse_params(&args(&["=value"])).is_err());
    }
}
