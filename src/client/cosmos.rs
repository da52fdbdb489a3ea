use cosmos_sdk_proto::cosmos::auth::v1beta1::{
    BaseAccount, QueryAccountRequest, QueryAccountResponse,
};
use cosmos_sdk_proto::cosmos::base::abci::v1beta1::GasInfo;
use cosmos_sdk_proto::cosmos::tx::v1beta1::service_client::ServiceClient;
use cosmos_sdk_proto::cosmos::tx::v1beta1::{SimulateRequest, SimulateResponse};
use cosmrs::crypto::secp256k1;
use cosmrs::rpc::endpoint::broadcast::tx_commit::Response;
use cosmrs::rpc::Client;
use cosmrs::tendermint::abci::Code;
use cosmrs::tendermint::chain;
use cosmrs::tx::{Fee, SignDoc, SignerInfo};
use cosmrs::{
    rpc::HttpClient,
    tx::{self},
};
use cosmrs::{AccountId, Any, Coin, Denom};
use log::{debug, info};
use prost::Message;
use tendermint_rpc::endpoint::abci_query::AbciQuery;

use super::chain_res::ChainResponse;
use super::error::ClientError;
use crate::config::cfg::ChainCfg;

const SIMULATE_PATH: &str = "/cosmos.tx.v1beta1.Service/Simulate";
const ACCOUNT_PATH: &str = "/cosmos.auth.v1beta1.Query/Account";

pub async fn send_tx(
    client: &HttpClient,
    msg: Any,
    key: &secp256k1::SigningKey,
    account_id: AccountId,
    chain_id: &chain::Id,
    cfg: &ChainCfg,
) -> Result<Response, ClientError> {
    let timeout_height = 0u16;
    let account = account(client, account_id).await?;

    let tx_body = tx::Body::new(vec![msg], "", timeout_height);

    let fee = simulate_gas_fee(client, &tx_body, &account, key, chain_id, cfg).await?;

    // NOTE: account.sequence is read fresh for every tx, so txs from the same key must not overlap
    let auth_info =
        SignerInfo::single_direct(Some(key.public_key()), account.sequence).auth_info(fee);

    let sign_doc = SignDoc::new(&tx_body, &auth_info, chain_id, account.account_number)
        .map_err(ClientError::proto_encoding)?;

    let tx_raw = sign_doc.sign(key).map_err(ClientError::crypto)?;

    let tx_commit_response = tx_raw
        .broadcast_commit(client)
        .await
        .map_err(ClientError::proto_encoding)?;

    if tx_commit_response.check_tx.code.is_err() {
        return Err(ClientError::CosmosSdk {
            res: tx_commit_response.check_tx.into(),
        });
    }
    if tx_commit_response.deliver_tx.code.is_err() {
        return Err(ClientError::CosmosSdk {
            res: tx_commit_response.deliver_tx.into(),
        });
    }

    info!(
        "tx {} committed at height {}",
        tx_commit_response.hash, tx_commit_response.height
    );

    Ok(tx_commit_response)
}

pub async fn abci_query<T: Message>(
    client: &HttpClient,
    req: T,
    path: &str,
) -> Result<AbciQuery, ClientError> {
    let mut buf = Vec::with_capacity(req.encoded_len());
    req.encode(&mut buf).map_err(ClientError::prost_proto_en)?;

    let abci_path = path.parse().map_err(|_| ClientError::AbciPath {
        path: path.to_string(),
    })?;

    let res = client.abci_query(Some(abci_path), buf, None, false).await?;

    if res.code != Code::Ok {
        return Err(ClientError::CosmosSdk { res: res.into() });
    }

    Ok(res)
}

async fn account(client: &HttpClient, account_id: AccountId) -> Result<BaseAccount, ClientError> {
    let res = abci_query(
        client,
        QueryAccountRequest {
            address: account_id.as_ref().into(),
        },
        ACCOUNT_PATH,
    )
    .await?;

    let res = QueryAccountResponse::decode(res.value.as_slice())
        .map_err(ClientError::prost_proto_de)?
        .account
        .ok_or(ClientError::AccountId {
            id: account_id.to_string(),
        })?;

    let base_account =
        BaseAccount::decode(res.value.as_slice()).map_err(ClientError::prost_proto_de)?;

    Ok(base_account)
}

#[allow(deprecated)]
async fn simulate_gas_fee(
    client: &HttpClient,
    tx: &tx::Body,
    account: &BaseAccount,
    key: &secp256k1::SigningKey,
    chain_id: &chain::Id,
    cfg: &ChainCfg,
) -> Result<Fee, ClientError> {
    let denom: Denom = cfg.denom.parse().map_err(|_| ClientError::Denom {
        name: cfg.denom.clone(),
    })?;

    let signer_info = SignerInfo::single_direct(Some(key.public_key()), account.sequence);
    let auth_info = signer_info.auth_info(Fee::from_amount_and_gas(
        Coin {
            denom: denom.clone(),
            amount: 0u64.into(),
        },
        0u64,
    ));

    let sign_doc = SignDoc::new(tx, &auth_info, chain_id, account.account_number)
        .map_err(ClientError::proto_encoding)?;

    let tx_raw = sign_doc.sign(key).map_err(ClientError::crypto)?;

    let req = SimulateRequest {
        tx: None,
        tx_bytes: tx_raw.to_bytes().map_err(ClientError::proto_encoding)?,
    };

    let gas_info = match &cfg.grpc_endpoint {
        Some(endpoint) => simulate_grpc(endpoint, req).await?,
        None => simulate_abci(client, req).await?,
    };

    debug!("simulated gas: {:?}", gas_info);

    let (gas_limit, amount) = fee_for_gas(gas_info.gas_used, cfg);

    Ok(Fee::from_amount_and_gas(
        Coin {
            denom,
            amount: amount.into(),
        },
        gas_limit,
    ))
}

async fn simulate_abci(client: &HttpClient, req: SimulateRequest) -> Result<GasInfo, ClientError> {
    let res = abci_query(client, req, SIMULATE_PATH).await?;

    SimulateResponse::decode(res.value.as_slice())
        .map_err(ClientError::prost_proto_de)?
        .gas_info
        .ok_or(ClientError::GasInfo)
}

async fn simulate_grpc(endpoint: &str, req: SimulateRequest) -> Result<GasInfo, ClientError> {
    let mut client = ServiceClient::connect(endpoint.to_string()).await?;

    client
        .simulate(req)
        .await
        .map_err(|e| ClientError::CosmosSdk {
            res: ChainResponse {
                code: Code::from(e.code() as u32),
                log: e.message().to_string(),
                ..Default::default()
            },
        })?
        .into_inner()
        .gas_info
        .ok_or(ClientError::GasInfo)
}

/// Gas limit and fee amount for a simulated gas usage.
pub(crate) fn fee_for_gas(gas_used: u64, cfg: &ChainCfg) -> (u64, u64) {
    let gas_limit = (gas_used as f64 * cfg.gas_adjustment).ceil();
    let amount = (gas_limit * cfg.gas_prices).ceil();

    (gas_limit as u64, amount as u64)
}
