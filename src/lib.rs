//! Client SDK for the Azore testnet faucet.
//!
//! - [`rpc`]: domain and wire types shared with the wallet and the faucet API.
//! - [`client`]: wallet session tracking, network registration and the faucet
//!   HTTP client, tied together by [`client::Faucet`].

#[cfg(feature = "client")]
pub use faucet_client as client;
#[cfg(feature = "rpc")]
pub use faucet_rpc as rpc;
