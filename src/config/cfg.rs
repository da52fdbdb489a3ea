use config::Config as _Config;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tendermint_rpc::{Error, Url};

use super::error::ConfigError;
use super::key::{MnemonicSource, SigningKey};
use crate::client::error::ClientError;

const ENV_PREFIX: &str = "DONEX";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub chain_cfg: ChainCfg,
    /// bech32 address of the deployed Donex contract
    pub contract_address: String,
    #[serde(default)]
    pub signer: SignerCfg,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainCfg {
    pub denom: String,
    pub prefix: String,
    /// Taken from the node's status when unset.
    #[serde(default)]
    pub chain_id: Option<String>,
    pub rpc_endpoint: String,
    /// Gas is simulated through the rpc endpoint when unset.
    #[serde(default)]
    pub grpc_endpoint: Option<String>,
    pub gas_prices: f64,
    #[serde(default = "default_gas_adjustment")]
    pub gas_adjustment: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SignerCfg {
    #[serde(default = "default_signer_name")]
    pub name: String,
    #[serde(default)]
    pub mnemonic: MnemonicSource,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    pub amount: u64,
}

fn default_gas_adjustment() -> f64 {
    1.3
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_signer_name() -> String {
    "donex".to_string()
}

impl Default for SignerCfg {
    fn default() -> Self {
        Self {
            name: default_signer_name(),
            mnemonic: MnemonicSource::default(),
        }
    }
}

impl Config {
    /// Reads `file` and overlays `DONEX_` prefixed environment variables,
    /// using `__` between nested keys, ie. `DONEX_CHAIN_CFG__RPC_ENDPOINT`.
    pub fn from_yaml(file: &str) -> Result<Config, ConfigError> {
        let settings = _Config::builder()
            .add_source(config::File::with_name(file))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize::<Config>()?.validated()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Config, ConfigError> {
        let settings = _Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()?;

        settings.try_deserialize::<Config>()?.validated()
    }

    fn validated(mut self) -> Result<Config, ConfigError> {
        self.chain_cfg.rpc_endpoint = parse_url(&self.chain_cfg.rpc_endpoint)?;
        if let Some(grpc) = &self.chain_cfg.grpc_endpoint {
            self.chain_cfg.grpc_endpoint = Some(parse_url(grpc)?);
        }
        Ok(self)
    }
}

impl ChainCfg {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SignerCfg {
    pub fn signing_key(&self) -> Result<SigningKey, ConfigError> {
        Ok(SigningKey {
            name: self.name.clone(),
            key: self.mnemonic.load()?,
        })
    }
}

impl Coin {
    pub fn new<S: Into<String>>(amount: u64, denom: S) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl TryFrom<Coin> for cosmrs::Coin {
    type Error = ClientError;

    fn try_from(coin: Coin) -> Result<cosmrs::Coin, ClientError> {
        Ok(cosmrs::Coin {
            denom: coin
                .denom
                .parse()
                .map_err(|_| ClientError::Denom { name: coin.denom })?,
            amount: coin.amount.into(),
        })
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Attempt to parse the configured url to ensure that it is valid.
// If url is missing the scheme then default to https.
pub(crate) fn parse_url(url: &str) -> Result<String, Error> {
    if !url.contains("://") {
        return Ok(Url::from_str(&format!("https://{}", url))?.to_string());
    }

    Ok(Url::from_str(url)?.to_string())
}
