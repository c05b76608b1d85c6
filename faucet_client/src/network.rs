//! Registration of the testnet with the wallet.

use {
    crate::{
        error::Error,
        notification::{
            Notification,
            INSTRUCTIONS_DURATION,
            MSG_NETWORK_FAILED,
            MSG_NETWORK_INVALID_PARAMS,
            MSG_NETWORK_REJECTED,
        },
        provider::WalletProvider,
    },
    faucet_rpc::{
        network::NetworkDescriptor,
        provider::{ProviderErrorKind, RequestArguments},
    },
    tracing::error,
};

/// Sends `wallet_addEthereumChain` for `network`.
pub async fn add_network<P: WalletProvider>(
    provider: &P,
    network: &NetworkDescriptor,
) -> Result<(), Error> {
    let args = RequestArguments::add_ethereum_chain(network).map_err(Error::Serialization)?;

    provider.request(args).await?;

    Ok(())
}

/// Notification for the result of [`add_network`].
pub fn add_network_notification(
    network: &NetworkDescriptor,
    result: &Result<(), Error>,
) -> Notification {
    let err = match result {
        Ok(()) => return Notification::success(format!("{} added to MetaMask!", network.chain_name)),
        Err(err) => err,
    };

    match err.provider_error().map(|err| err.kind()) {
        Some(ProviderErrorKind::UserRejected) => Notification::error(MSG_NETWORK_REJECTED),
        Some(ProviderErrorKind::InvalidParams) => Notification::error(MSG_NETWORK_INVALID_PARAMS),
        _ => {
            error!("Failed to add network: {err}");
            Notification::error(MSG_NETWORK_FAILED)
        }
    }
}

/// Copyable network details for wallets without `wallet_addEthereumChain`.
pub fn manual_instructions(network: &NetworkDescriptor) -> Notification {
    Notification::info(network.manual_instructions()).with_duration(INSTRUCTIONS_DURATION)
}
