use config::ConfigError as _ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("mnemonic environment variable is not set: {var:?}")]
    MissingMnemonic { var: String },

    #[error("error reading mnemonic file")]
    MnemonicFile { source: std::io::Error },

    #[error("Error parsing url")]
    UrlParse(#[from] tendermint_rpc::Error),

    #[error(transparent)]
    Config(#[from] _ConfigError),
}

impl ConfigError {
    pub fn mnemonic_file(e: std::io::Error) -> ConfigError {
        ConfigError::MnemonicFile { source: e }
    }
}
