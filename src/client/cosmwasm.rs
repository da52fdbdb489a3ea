use cosmos_sdk_proto::cosmwasm::wasm::v1::{
    QuerySmartContractStateRequest, QuerySmartContractStateResponse,
};
use cosmrs::cosmwasm::MsgExecuteContract;
use cosmrs::crypto::secp256k1;
use cosmrs::rpc::HttpClient;
use cosmrs::tendermint::chain;
use cosmrs::tx::Msg;
use prost::Message;
use std::future::Future;
use std::time::Duration;
use tokio::time;

#[cfg(not(test))]
use cosmrs::rpc::Client;
#[cfg(not(test))]
use log::info;

use super::chain_res::{ExecResponse, QueryResponse};
use super::cosmos::{abci_query, send_tx};
use super::error::ClientError;
use crate::config::cfg::{ChainCfg, Coin};
use crate::config::key::SigningKey;

const SMART_QUERY_PATH: &str = "/cosmwasm.wasm.v1.Query/SmartContractState";

/// Signing connection to a single chain node.
#[cfg_attr(test, faux::create)]
#[derive(Clone, Debug)]
pub struct CosmWasmClient {
    // http tendermint RPC client
    rpc_client: HttpClient,
    cfg: ChainCfg,
    chain_id: chain::Id,
    key: SigningKey,
}

#[cfg_attr(test, faux::methods)]
impl CosmWasmClient {
    /// Opens the rpc session and checks that the node answers within the configured timeout.
    /// The chain id is taken from the node when it is not configured.
    // HACK: faux doesn't support mocking a struct wrapped in a Result
    // so we are just ignoring the constructor for this crate's tests
    #[cfg(not(test))]
    pub async fn connect(cfg: ChainCfg, key: SigningKey) -> Result<Self, ClientError> {
        let rpc_client = HttpClient::new(cfg.rpc_endpoint.as_str())?;

        let status = bounded(cfg.timeout(), async {
            rpc_client.status().await.map_err(ClientError::from)
        })
        .await?;
        let network = status.node_info.network;

        let chain_id = resolve_chain_id(cfg.chain_id.as_deref(), network)?;

        info!("connected to {} ({})", cfg.rpc_endpoint, chain_id);

        Ok(Self {
            rpc_client,
            cfg,
            chain_id,
            key,
        })
    }

    pub async fn execute(
        &self,
        contract: String,
        payload: Vec<u8>,
        funds: Vec<Coin>,
    ) -> Result<ExecResponse, ClientError> {
        let signing_key: secp256k1::SigningKey = (&self.key).try_into()?;
        let account_id = self.key.to_account(&self.cfg.prefix)?;

        let mut cosm_funds = vec![];
        for fund in funds {
            cosm_funds.push(fund.try_into()?);
        }

        let msg = MsgExecuteContract {
            sender: account_id.clone(),
            contract: contract
                .parse()
                .map_err(|_| ClientError::AccountId { id: contract.clone() })?,
            msg: payload,
            funds: cosm_funds,
        }
        .to_any()
        .map_err(ClientError::proto_encoding)?;

        let tx_res = bounded(
            self.cfg.timeout(),
            send_tx(
                &self.rpc_client,
                msg,
                &signing_key,
                account_id,
                &self.chain_id,
                &self.cfg,
            ),
        )
        .await?;

        Ok(ExecResponse {
            tx_hash: tx_res.hash.to_string(),
            height: tx_res.height.value(),
            res: tx_res.deliver_tx.into(),
        })
    }

    pub async fn query(
        &self,
        contract: String,
        payload: Vec<u8>,
    ) -> Result<QueryResponse, ClientError> {
        let res = bounded(
            self.cfg.timeout(),
            abci_query(
                &self.rpc_client,
                QuerySmartContractStateRequest {
                    address: contract,
                    query_data: payload,
                },
                SMART_QUERY_PATH,
            ),
        )
        .await?;

        let res = QuerySmartContractStateResponse::decode(res.value.as_slice())
            .map_err(ClientError::prost_proto_de)?;

        Ok(QueryResponse { res: res.into() })
    }
}

async fn bounded<F, T>(timeout: Duration, f: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    time::timeout(timeout, f)
        .await
        .map_err(|_| ClientError::connection(timeout))?
}

/// A configured chain id must name the node's network; without one the node's id is adopted.
fn resolve_chain_id(
    configured: Option<&str>,
    network: chain::Id,
) -> Result<chain::Id, ClientError> {
    let configured = match configured {
        Some(id) => id,
        None => return Ok(network),
    };

    let id: chain::Id = configured.parse().map_err(|_| ClientError::ChainId {
        chain_id: configured.to_string(),
    })?;
    if id != network {
        return Err(ClientError::ChainIdMismatch {
            configured: id.to_string(),
            node: network.to_string(),
        });
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn bounded_times_out() {
        let res: Result<(), ClientError> = bounded(Duration::from_millis(10), async {
            time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert_matches!(
            res,
            Err(ClientError::Connection { timeout }) if timeout == Duration::from_millis(10)
        );
    }

    #[tokio::test]
    async fn bounded_passes_through_result() {
        let res = bounded(Duration::from_secs(1), async { Ok(7u64) }).await;
        assert_eq!(res.unwrap(), 7);

        let res: Result<(), ClientError> =
            bounded(Duration::from_secs(1), async { Err(ClientError::GasInfo) }).await;
        assert_matches!(res, Err(ClientError::GasInfo));
    }

    fn network() -> chain::Id {
        "comdex-1".parse().unwrap()
    }

    #[test]
    fn configured_chain_id_matching_node() {
        let id = resolve_chain_id(Some("comdex-1"), network()).unwrap();
        assert_eq!(id, network());
    }

    #[test]
    fn configured_chain_id_differing_from_node() {
        let res = resolve_chain_id(Some("comdex-testnet-2"), network());
        assert_matches!(
            res,
            Err(ClientError::ChainIdMismatch { configured, node })
                if configured == "comdex-testnet-2" && node == "comdex-1"
        );
    }

    #[test]
    fn unset_chain_id_adopts_node() {
        let id = resolve_chain_id(None, network()).unwrap();
        assert_eq!(id.to_string(), "comdex-1");
    }

    #[test]
    fn unparsable_chain_id() {
        let res = resolve_chain_id(Some(""), network());
        assert_matches!(res, Err(ClientError::ChainId { chain_id }) if chain_id.is_empty());
    }
}
