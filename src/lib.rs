//! Signing client for the Donex CosmWasm contract
//!
//! Donex links chain addresses to social media identities (`(platform, profile_id)` pairs)
//! and forwards token donations to linked addresses. This crate signs and broadcasts
//! Donex transactions and runs its smart queries against a configured [Cosmos] based chain.
//!
//! [Cosmos]: https://github.com/cosmos/cosmos-sdk
//!
//! # Quick Start
//!
//! ```no_run
//! use donex_client::config::cfg::Config;
//! use donex_client::donex::{error::DonexError, DonexClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DonexError> {
//!     // the signing mnemonic is read from $DONEX_MNEMONIC unless configured otherwise
//!     let cfg = Config::from_yaml("donex.yaml")?;
//!     let donex = DonexClient::connect(cfg).await?;
//!
//!     let recipients = donex.get_addresses_by_social("facebook", "123").await?;
//!     if let Some(recipient) = recipients.first() {
//!         donex.donate(recipient.as_str(), 1_000_000, "ucmst").await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;

pub mod config;

pub mod donex;
