//! JSON messages understood by the Donex contract.

use serde::{Deserialize, Serialize};

pub type Platform = String;
pub type ProfileId = String;

/// `(platform, profile_id)`, encoded as a two element json array.
pub type SocialInfo = (Platform, ProfileId);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Only accepted from the contract owner.
    SubmitSocial {
        address: String,
        social_info: SocialInfo,
    },
    Donate {
        recipient: String,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    GetSocialsByAddress {
        address: String,
    },
    GetAddressesBySocial {
        platform: Platform,
        profile_id: ProfileId,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct GetSocialsByAddressResponse {
    pub social_infos: Vec<SocialInfo>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct GetAddressesBySocialResponse {
    pub address: Vec<String>,
}
