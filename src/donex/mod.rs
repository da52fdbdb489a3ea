pub mod client;

pub mod error;

pub mod msg;

pub use self::client::DonexClient;
pub use self::msg::SocialInfo;
