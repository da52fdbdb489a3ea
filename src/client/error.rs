use cosmrs::ErrorReport;
use prost::{DecodeError, EncodeError};
use std::time::Duration;
use thiserror::Error;

use super::chain_res::ChainResponse;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid account ID: {id:?}")]
    AccountId { id: String },

    #[error("cryptographic error")]
    Crypto { source: ErrorReport },

    #[error("invalid denomination: {name:?}")]
    Denom { name: String },

    #[error("invalid chainId: {chain_id:?}")]
    ChainId { chain_id: String },

    #[error("configured chainId {configured:?} does not match node chainId {node:?}")]
    ChainIdMismatch { configured: String, node: String },

    #[error("invalid mnemonic")]
    Mnemonic,

    #[error("invalid derivation path")]
    DerivationPath,

    #[error("invalid abci query path: {path:?}")]
    AbciPath { path: String },

    #[error("proto encoding error")]
    ProtoEncoding { source: ErrorReport },

    #[error("proto decoding error")]
    ProtoDecoding { source: ErrorReport },

    #[error("gas simulation returned no gas info")]
    GasInfo,

    #[error("chain node did not respond within {timeout:?}")]
    Connection { timeout: Duration },

    #[error("CosmosSDK error: {}", .res.log)]
    CosmosSdk { res: ChainResponse },

    #[error(transparent)]
    RPC(#[from] tendermint_rpc::Error),

    #[error(transparent)]
    GRPC(#[from] tonic::transport::Error),
}

impl ClientError {
    pub fn crypto(e: ErrorReport) -> ClientError {
        ClientError::Crypto { source: e }
    }

    pub fn proto_encoding(e: ErrorReport) -> ClientError {
        ClientError::ProtoEncoding { source: e }
    }

    pub fn prost_proto_en(e: EncodeError) -> ClientError {
        ClientError::ProtoEncoding { source: e.into() }
    }

    pub fn prost_proto_de(e: DecodeError) -> ClientError {
        ClientError::ProtoDecoding { source: e.into() }
    }

    pub fn connection(timeout: Duration) -> ClientError {
        ClientError::Connection { timeout }
    }
}

#[derive(Error, Debug)]
pub enum DeserializeError {
    #[error("Raw chain response is empty")]
    EmptyResponse,

    #[error("Deserializing json from chain response failed")]
    JSON(#[from] serde_json::Error),
}
