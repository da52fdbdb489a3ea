use thiserror::Error;

use crate::client::chain_res::ChainResponse;
use crate::client::error::{ClientError, DeserializeError};
use crate::config::error::ConfigError;

// Display string of the contract's authorization error
const UNAUTHORIZED: &str = "Unauthorized";

#[derive(Error, Debug)]
pub enum DonexError {
    #[error("serde json serialization error")]
    JsonSerialize { source: serde_json::Error },

    #[error("error decoding contract response")]
    Deserialize(#[from] DeserializeError),

    #[error("sender is not authorized by the contract: {}", .res.log)]
    Unauthorized { res: ChainResponse },

    #[error(transparent)]
    Client(ClientError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DonexError {
    pub fn json(e: serde_json::Error) -> DonexError {
        DonexError::JsonSerialize { source: e }
    }
}

impl From<ClientError> for DonexError {
    fn from(e: ClientError) -> DonexError {
        match e {
            ClientError::CosmosSdk { res } if is_unauthorized(&res.log) => {
                DonexError::Unauthorized { res }
            }
            e => DonexError::Client(e),
        }
    }
}

// wasm failures are logged as `...: message index: 0: <contract error>: execute wasm contract failed`
fn is_unauthorized(log: &str) -> bool {
    log.split(": ").any(|part| part.trim() == UNAUTHORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Code;
    use assert_matches::assert_matches;

    fn sdk_err(log: &str) -> ClientError {
        ClientError::CosmosSdk {
            res: ChainResponse {
                code: Code::from(5u32),
                log: log.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn contract_unauthorized_is_distinct() {
        let e: DonexError = sdk_err(
            "failed to execute message; message index: 0: Unauthorized: execute wasm contract failed",
        )
        .into();
        assert_matches!(e, DonexError::Unauthorized { .. });
    }

    #[test]
    fn other_rejections_stay_client_errors() {
        let e: DonexError = sdk_err(
            "0ucmdx is smaller than 1000ucmdx: insufficient funds: insufficient funds",
        )
        .into();
        assert_matches!(e, DonexError::Client(ClientError::CosmosSdk { .. }));

        // sdk signature failures use the lowercase codespace message
        let e: DonexError = sdk_err("signature verification failed; please verify account number (0): unauthorized").into();
        assert_matches!(e, DonexError::Client(ClientError::CosmosSdk { .. }));

        let e: DonexError = ClientError::Mnemonic.into();
        assert_matches!(e, DonexError::Client(ClientError::Mnemonic));
    }
}
