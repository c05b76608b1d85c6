//! This crate provides domain interfaces and wire types shared by the faucet
//! client: wallet addresses and chain IDs, the network descriptor handed to
//! the wallet, the wallet provider RPC surface and the faucet HTTP API bodies.

pub mod domain;
pub mod faucet;
pub mod macros;
pub mod network;
pub mod provider;
pub mod serde_helpers;
