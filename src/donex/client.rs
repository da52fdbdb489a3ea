use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Debug};

use super::error::DonexError;
use super::msg::{
    ExecuteMsg, GetAddressesBySocialResponse, GetSocialsByAddressResponse, QueryMsg, SocialInfo,
};
use crate::client::chain_res::ExecResponse;
use crate::client::cosmwasm::CosmWasmClient;
use crate::config::cfg::Coin;

#[cfg(not(test))]
use crate::client::error::ClientError;
#[cfg(not(test))]
use crate::config::cfg::Config;
#[cfg(not(test))]
use cosmrs::AccountId;
#[cfg(not(test))]
use log::info;

/// Client bound to one deployed Donex contract, signing as the configured wallet.
#[derive(Clone)]
pub struct DonexClient {
    client: CosmWasmClient,
    sender: String,
    contract: String,
}

impl Debug for DonexClient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DonexClient({} -> {})", self.sender, self.contract)
    }
}

impl DonexClient {
    /// Derives the signing wallet, connects to the configured node
    /// and binds the wallet's first account to `cfg.contract_address`.
    ///
    /// # Errors
    /// * A malformed mnemonic fails with `ClientError::Mnemonic` before any network access.
    /// * An unreachable or unresponsive node fails with `ClientError::RPC` or `ClientError::Connection`.
    #[cfg(not(test))]
    pub async fn connect(cfg: Config) -> Result<Self, DonexError> {
        let key = cfg.signer.signing_key()?;
        let sender = key.to_account(&cfg.chain_cfg.prefix)?.to_string();

        cfg.contract_address
            .parse::<AccountId>()
            .map_err(|_| ClientError::AccountId {
                id: cfg.contract_address.clone(),
            })?;

        let client = CosmWasmClient::connect(cfg.chain_cfg, key).await?;

        info!("signing as {} for contract {}", sender, cfg.contract_address);

        Ok(Self::new(client, sender, cfg.contract_address))
    }

    pub fn new<S: Into<String>>(client: CosmWasmClient, sender: S, contract: S) -> Self {
        Self {
            client,
            sender: sender.into(),
            contract: contract.into(),
        }
    }

    /// Address transactions are signed with.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Links `address` to a social identity.
    ///
    /// The contract only accepts this from its owner, other senders
    /// fail with `DonexError::Unauthorized`.
    pub async fn submit_social<S: Into<String>>(
        &self,
        address: S,
        social_info: SocialInfo,
    ) -> Result<ExecResponse, DonexError> {
        let msg = ExecuteMsg::SubmitSocial {
            address: address.into(),
            social_info,
        };

        self.execute(&msg, vec![]).await
    }

    /// Social identities linked to `address`, empty if there are none.
    pub async fn get_socials_by_address<S: Into<String>>(
        &self,
        address: S,
    ) -> Result<Vec<SocialInfo>, DonexError> {
        let res: GetSocialsByAddressResponse = self
            .query(&QueryMsg::GetSocialsByAddress {
                address: address.into(),
            })
            .await?;

        Ok(res.social_infos)
    }

    /// Addresses linked to a social identity, empty if there are none.
    pub async fn get_addresses_by_social<S: Into<String>>(
        &self,
        platform: S,
        profile_id: S,
    ) -> Result<Vec<String>, DonexError> {
        let res: GetAddressesBySocialResponse = self
            .query(&QueryMsg::GetAddressesBySocial {
                platform: platform.into(),
                profile_id: profile_id.into(),
            })
            .await?;

        Ok(res.address)
    }

    /// Sends `amount` of `denom` through the contract to `recipient`.
    pub async fn donate<S: Into<String>>(
        &self,
        recipient: S,
        amount: u64,
        denom: S,
    ) -> Result<ExecResponse, DonexError> {
        let msg = ExecuteMsg::Donate {
            recipient: recipient.into(),
        };

        self.execute(&msg, vec![Coin::new(amount, denom)]).await
    }

    /// Donates to the first address linked to a social identity.
    /// Returns `None` without sending anything if the identity is not linked.
    pub async fn donate_to_social<S: Into<String>>(
        &self,
        platform: S,
        profile_id: S,
        amount: u64,
        denom: S,
    ) -> Result<Option<ExecResponse>, DonexError> {
        let addresses = self.get_addresses_by_social(platform, profile_id).await?;

        match addresses.into_iter().next() {
            Some(recipient) => Ok(Some(self.donate(recipient, amount, denom.into()).await?)),
            None => Ok(None),
        }
    }

    async fn execute<T: Serialize>(
        &self,
        msg: &T,
        funds: Vec<Coin>,
    ) -> Result<ExecResponse, DonexError> {
        let payload = serde_json::to_vec(msg).map_err(DonexError::json)?;

        let res = self
            .client
            .execute(self.contract.clone(), payload, funds)
            .await?;

        debug!("{:?}", res.res);

        Ok(res)
    }

    async fn query<T: Serialize, R: DeserializeOwned>(&self, msg: &T) -> Result<R, DonexError> {
        let payload = serde_json::to_vec(msg).map_err(DonexError::json)?;

        let res = self.client.query(self.contract.clone(), payload).await?;

        debug!("{:?}", res.res);

        Ok(res.data()?)
    }
}
