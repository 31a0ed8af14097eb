// ABOUTME: Request bodies for the deploy routes and their env-key mappings.
// ABOUTME: Validation follows "required" semantics: present and non-zero, plus no-space token names.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::deploy::{DeploymentKind, Params};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{0}' is required")]
    Required(&'static str),

    #[error("field '{0}' must not contain spaces")]
    ContainsSpace(&'static str),
}

/// A JSON body that maps onto one deployment kind.
pub trait DeployRequest: DeserializeOwned + Send + 'static {
    const KIND: DeploymentKind;

    fn validate(&self) -> Result<(), ValidationError>;

    /// Env-file parameters, numbers rendered as decimal strings.
    fn into_params(self) -> Params;
}

fn require_str(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

fn require_int(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

fn no_space(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains(' ') {
        return Err(ValidationError::ContainsSpace(field));
    }
    Ok(())
}

fn params<const N: usize>(pairs: [(&str, String); N]) -> Params {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct IaoRequest {
    pub owner: String,
    pub reward_token: String,
    pub start_timestamp: i64,
    pub duration_hours: i64,
    pub reward_amount: String,
    pub token_in_address: String,
}

impl DeployRequest for IaoRequest {
    const KIND: DeploymentKind = DeploymentKind::Iao;

    fn validate(&self) -> Result<(), ValidationError> {
        require_str("owner", &self.owner)?;
        require_str("reward_token", &self.reward_token)?;
        require_int("start_timestamp", self.start_timestamp)?;
        require_int("duration_hours", self.duration_hours)?;
        require_str("reward_amount", &self.reward_amount)?;
        require_str("token_in_address", &self.token_in_address)
    }

    fn into_params(self) -> Params {
        params([
            ("XAAIAO_OWNER", self.owner),
            ("XAAIAO_REWARD_TOKEN_CONTRACT", self.reward_token),
            ("XAAIAO_START_TIMESTAMP", self.start_timestamp.to_string()),
            ("XAAIAO_PERIOD_HOURS", self.duration_hours.to_string()),
            ("XAAIAO_REWARD_AMOUNT", self.reward_amount),
            // Replaced by the fixed token-in contract when the env file is written.
            ("XAAIAO_TOKEN_IN_CONTRACT", self.token_in_address),
        ])
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StakingRequest {
    pub project_name: String,
    pub reward_amount_per_year: String,
    pub owner: String,
    pub reward_token: String,
    pub nft: String,
}

impl DeployRequest for StakingRequest {
    const KIND: DeploymentKind = DeploymentKind::Staking;

    fn validate(&self) -> Result<(), ValidationError> {
        require_str("project_name", &self.project_name)?;
        require_str("reward_amount_per_year", &self.reward_amount_per_year)?;
        require_str("owner", &self.owner)?;
        require_str("reward_token", &self.reward_token)?;
        require_str("nft", &self.nft)
    }

    fn into_params(self) -> Params {
        params([
            ("OWNER", self.owner),
            ("PROJECT_NAME", self.project_name),
            ("REWARD_AMOUNT_PER_YEAR", self.reward_amount_per_year),
            ("REWARD_TOKEN_CONTRACT", self.reward_token),
            ("NFT_CONTRACT", self.nft),
        ])
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub owner: String,
    pub token_name: String,
    pub token_symbol: String,
    pub token_init_supply: String,
    pub token_supply_fixed_years: i64,
    pub token_amount_can_mint_per_year: String,
    pub iao_contract_address: String,
    pub amount_to_iao: String,
}

impl DeployRequest for TokenRequest {
    const KIND: DeploymentKind = DeploymentKind::Token;

    fn validate(&self) -> Result<(), ValidationError> {
        require_str("owner", &self.owner)?;
        require_str("token_name", &self.token_name)?;
        no_space("token_name", &self.token_name)?;
        require_str("token_symbol", &self.token_symbol)?;
        no_space("token_symbol", &self.token_symbol)?;
        require_str("token_init_supply", &self.token_init_supply)?;
        require_int("token_supply_fixed_years", self.token_supply_fixed_years)?;
        require_str(
            "token_amount_can_mint_per_year",
            &self.token_amount_can_mint_per_year,
        )?;
        require_str("iao_contract_address", &self.iao_contract_address)?;
        require_str("amount_to_iao", &self.amount_to_iao)
    }

    fn into_params(self) -> Params {
        params([
            ("TOKEN_OWNER", self.owner),
            ("TOKEN_NAME", self.token_name),
            ("TOKEN_SYMBOL", self.token_symbol),
            ("TOKEN_INIT_SUPPLY", self.token_init_supply),
            (
                "TOKEN_SUPPLY_FIXED_YEARS",
                self.token_supply_fixed_years.to_string(),
            ),
            (
                "TOKEN_AMOUNT_CAN_MINT_PER_YEAR",
                self.token_amount_can_mint_per_year,
            ),
            ("IAO_CONTRACT_ADDRESS", self.iao_contract_address),
            ("AMOUNT_TO_IAO", self.amount_to_iao),
        ])
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub owner: String,
    pub payment_token: String,
    /// Free requests available to the whole contract.
    pub free_request_count: i64,
    /// Free requests available to each address.
    pub address_free_request_count: i64,
    /// Minimum USD balance an address needs before it may use free requests.
    pub min_usd_balance_for_using_free_request: i64,
    pub vip_monthly_quotas: i64,
    pub vip_price_fixed_count: i64,
    pub vip_price_monthly: i64,
}

impl DeployRequest for PaymentRequest {
    const KIND: DeploymentKind = DeploymentKind::Payment;

    fn validate(&self) -> Result<(), ValidationError> {
        require_str("owner", &self.owner)?;
        require_str("payment_token", &self.payment_token)?;
        require_int("free_request_count", self.free_request_count)?;
        require_int("address_free_request_count", self.address_free_request_count)?;
        require_int(
            "min_usd_balance_for_using_free_request",
            self.min_usd_balance_for_using_free_request,
        )?;
        require_int("vip_monthly_quotas", self.vip_monthly_quotas)?;
        require_int("vip_price_fixed_count", self.vip_price_fixed_count)?;
        require_int("vip_price_monthly", self.vip_price_monthly)
    }

    fn into_params(self) -> Params {
        params([
            ("OWNER", self.owner),
            ("PAYMENT_TOKEN", self.payment_token),
            ("FREE_REQUEST_COUNT", self.free_request_count.to_string()),
            (
                "ADDRESS_FREE_REQUEST_COUNT",
                self.address_free_request_count.to_string(),
            ),
            (
                "MIN_USD_BALANCE_FOR_USING_FREE_REQUEST",
                self.min_usd_balance_for_using_free_request.to_string(),
            ),
            ("VIP_MONTHLY_QUOTAS", self.vip_monthly_quotas.to_string()),
            ("VIP_PRICE_FIXED_COUNT", self.vip_price_fixed_count.to_string()),
            ("VIP_PRICE_MONTHLY", self.vip_price_monthly.to_string()),
        ])
    }
}
