use cosmrs::{bip32, crypto::secp256k1, AccountId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::fs;
use std::path::PathBuf;

use super::error::ConfigError;
use crate::client::error::ClientError;

// https://github.com/confio/cosmos-hd-key-derivation-spec#the-cosmos-hub-path
const DERIVATION_PATH: &str = "m/44'/118'/0'/0/0";

const DEFAULT_MNEMONIC_VAR: &str = "DONEX_MNEMONIC";

#[derive(Clone)]
pub struct SigningKey {
    /// human readable key name
    pub name: String,
    /// private key associated with `name`
    pub key: Key,
}

#[derive(Clone)]
pub enum Key {
    /// Mnemonic allows you to pass the private key mnemonic words
    /// for configuring a transaction signing key.
    /// Only 24 word english mnemonics are supported.
    Mnemonic(String),
}

/// Where the signing mnemonic is read from at startup.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MnemonicSource {
    /// name of the environment variable holding the phrase
    Env(String),
    /// file containing the phrase
    File(PathBuf),
}

impl Default for MnemonicSource {
    fn default() -> Self {
        MnemonicSource::Env(DEFAULT_MNEMONIC_VAR.to_string())
    }
}

impl MnemonicSource {
    pub fn load(&self) -> Result<Key, ConfigError> {
        let phrase = match self {
            MnemonicSource::Env(var) => std::env::var(var)
                .map_err(|_| ConfigError::MissingMnemonic { var: var.clone() })?,
            MnemonicSource::File(path) => {
                fs::read_to_string(path).map_err(ConfigError::mnemonic_file)?
            }
        };

        Ok(Key::Mnemonic(phrase.trim().to_string()))
    }
}

impl SigningKey {
    pub fn from_mnemonic<S: Into<String>>(name: S, phrase: S) -> Self {
        Self {
            name: name.into(),
            key: Key::Mnemonic(phrase.into()),
        }
    }

    /// Address of the first account derived from this key.
    pub fn to_account(&self, prefix: &str) -> Result<AccountId, ClientError> {
        let key: secp256k1::SigningKey = self.try_into()?;
        key.public_key()
            .account_id(prefix)
            .map_err(ClientError::crypto)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Mnemonic(_) => write!(f, "Mnemonic(..)"),
        }
    }
}

impl TryFrom<&SigningKey> for secp256k1::SigningKey {
    type Error = ClientError;

    fn try_from(signer: &SigningKey) -> Result<secp256k1::SigningKey, ClientError> {
        match &signer.key {
            Key::Mnemonic(phrase) => {
                let seed = bip32::Mnemonic::new(phrase, bip32::Language::English)
                    .map_err(|_| ClientError::Mnemonic)?
                    .to_seed("");
                let path: bip32::DerivationPath = DERIVATION_PATH
                    .parse()
                    .map_err(|_| ClientError::DerivationPath)?;

                Ok(bip32::XPrv::derive_from_path(seed, &path)
                    .map_err(|_| ClientError::DerivationPath)?
                    .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // bip39 test vector for all zero entropy
    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon art";

    #[test]
    fn derives_prefixed_account() {
        let key = SigningKey::from_mnemonic("test", PHRASE);

        let comdex = key.to_account("comdex").unwrap();
        assert!(comdex.to_string().starts_with("comdex1"));

        // deterministic across derivations
        assert_eq!(comdex, key.to_account("comdex").unwrap());

        let cosmos = key.to_account("cosmos").unwrap();
        assert!(cosmos.to_string().starts_with("cosmos1"));
    }

    #[test]
    fn malformed_mnemonic_fails() {
        let key = SigningKey::from_mnemonic("test", "hover oyster chief");
        assert_matches!(key.to_account("comdex"), Err(ClientError::Mnemonic));
    }

    #[test]
    fn debug_hides_mnemonic() {
        let key = SigningKey::from_mnemonic("test", PHRASE);
        let out = format!("{:?}", key);
        assert!(out.contains("test"));
        assert!(!out.contains("abandon"));
    }

    #[test]
    fn loads_mnemonic_from_file() {
        let path = std::env::temp_dir().join("donex-client-mnemonic-test");
        fs::write(&path, format!("  {}\n", PHRASE)).unwrap();

        let key = MnemonicSource::File(path.clone()).load().unwrap();
        fs::remove_file(&path).unwrap();

        assert_matches!(key, Key::Mnemonic(phrase) if phrase == PHRASE);
    }

    #[test]
    fn missing_mnemonic_var_fails() {
        let source = MnemonicSource::Env("DONEX_TEST_UNSET_MNEMONIC_VAR".to_string());
        assert_matches!(
            source.load(),
            Err(ConfigError::MissingMnemonic { var }) if var == "DONEX_TEST_UNSET_MNEMONIC_VAR"
        );
    }
}
