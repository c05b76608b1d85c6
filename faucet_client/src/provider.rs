use {
    faucet_rpc::provider::{ProviderError, ProviderEvent, ProviderEventKind, RequestArguments},
    serde_json::Value,
    std::rc::Rc,
};

/// Callback registered for provider events.
pub type Listener = Box<dyn Fn(ProviderEvent)>;

/// Handle returned by [`WalletProvider::on`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The injected wallet capability (EIP-1193).
///
/// Calls may stay pending indefinitely while the wallet waits for the user.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Sends an RPC request to the wallet.
    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError>;

    /// Registers an event listener.
    fn on(&self, event: ProviderEventKind, listener: Listener) -> ListenerId;

    /// Removes a listener registered with [`WalletProvider::on`].
    fn remove_listener(&self, event: ProviderEventKind, id: ListenerId);
}

impl<P> WalletProvider for Rc<P>
where
    P: WalletProvider,
{
    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError> {
        (**self).request(args).await
    }

    fn on(&self, event: ProviderEventKind, listener: Listener) -> ListenerId {
        (**self).on(event, listener)
    }

    fn remove_listener(&self, event: ProviderEventKind, id: ListenerId) {
        (**self).remove_listener(event, id)
    }
}
