//! Wallet session tracking: the connected address and its reconciliation with
//! provider events.

use {
    crate::{
        error::Error,
        provider::{ListenerId, WalletProvider},
    },
    faucet_rpc::{
        domain::Address,
        provider::{parse_accounts, ProviderEvent, ProviderEventKind, RequestArguments},
    },
    futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender},
    futures_util::{FutureExt, StreamExt},
    std::rc::Rc,
    tracing::{debug, warn},
};

/// Stream of provider events delivered to the session tracker.
pub type EventStream = UnboundedReceiver<ProviderEvent>;

/// Ephemeral wallet session. Connected iff an address is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    address: Option<Address>,
}

impl WalletSession {
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    #[inline]
    pub fn connected(&self) -> bool {
        self.address.is_some()
    }
}

/// Result of applying a provider event to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The event matched the current state.
    Unchanged,

    /// The wallet exposes a different account now.
    Switched(Address),

    /// The wallet no longer exposes any account.
    Disconnected,

    /// The chain changed. All local state must be discarded and the client
    /// restarted.
    ReloadRequired,
}

/// Listener registrations on a provider. Removed from the provider on drop.
pub struct Subscription<P: WalletProvider> {
    provider: Rc<P>,
    listeners: Vec<(ProviderEventKind, ListenerId)>,
}

impl<P: WalletProvider> Subscription<P> {
    /// Forwards `accountsChanged` and `chainChanged` events into `tx`.
    pub fn new(provider: Rc<P>, tx: UnboundedSender<ProviderEvent>) -> Self {
        let listeners = [
            ProviderEventKind::AccountsChanged,
            ProviderEventKind::ChainChanged,
        ]
        .into_iter()
        .map(|kind| {
            let tx = tx.clone();
            let id = provider.on(
                kind,
                Box::new(move |event| {
                    tx.unbounded_send(event).ok();
                }),
            );

            (kind, id)
        })
        .collect();

        Self {
            provider,
            listeners,
        }
    }
}

impl<P: WalletProvider> Drop for Subscription<P> {
    fn drop(&mut self) {
        for (kind, id) in self.listeners.drain(..) {
            self.provider.remove_listener(kind, id);
        }
    }
}

/// Owns the wallet session and keeps it in sync with the provider.
///
/// Event subscriptions are established on construction and torn down when
/// the tracker is dropped. Without a provider the session stays empty.
pub struct SessionTracker<P: WalletProvider> {
    provider: Option<Rc<P>>,
    session: WalletSession,
    events: Option<EventStream>,
    _subscription: Option<Subscription<P>>,
}

impl<P: WalletProvider> SessionTracker<P> {
    pub fn new(provider: Option<P>) -> Self {
        let provider = provider.map(Rc::new);
        let (tx, rx) = mpsc::unbounded();
        let subscription = provider
            .as_ref()
            .map(|provider| Subscription::new(provider.clone(), tx));

        Self {
            provider,
            session: WalletSession::default(),
            events: Some(rx),
            _subscription: subscription,
        }
    }

    pub fn provider(&self) -> Option<&Rc<P>> {
        self.provider.as_ref()
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    /// Hands the event stream over to the caller, e.g. a UI loop that must not
    /// keep the tracker borrowed while waiting for events.
    pub fn take_event_stream(&mut self) -> Option<EventStream> {
        self.events.take()
    }

    /// Waits for the next provider event. Returns `None` once the stream was
    /// taken or closed.
    pub async fn next_event(&mut self) -> Option<ProviderEvent> {
        self.events.as_mut()?.next().await
    }

    /// Returns an already delivered event without waiting.
    pub fn try_next_event(&mut self) -> Option<ProviderEvent> {
        self.events.as_mut()?.next().now_or_never().flatten()
    }

    /// Silently checks for already authorized accounts.
    pub async fn check_existing_connection(&mut self) -> &WalletSession {
        if let Some(provider) = self.provider.clone() {
            let result = existing_accounts(provider.as_ref()).await;
            self.apply_existing(result);
        }

        &self.session
    }

    /// Applies the result of [`existing_accounts`]. Errors clear the session.
    pub fn apply_existing(&mut self, result: Result<Vec<Address>, Error>) {
        match result {
            Ok(accounts) => self.session.address = accounts.into_iter().next(),

            Err(err) => {
                warn!("Error checking wallet connection: {err}");
                self.session.address = None;
            }
        }
    }

    /// Applies the accounts granted by [`request_accounts`]. An empty grant
    /// leaves the session untouched.
    pub fn apply_connection(&mut self, accounts: Vec<Address>) -> Option<&Address> {
        let address = accounts.into_iter().next()?;

        debug!(address = %address, "wallet connected");
        self.session.address = Some(address);
        self.session.address.as_ref()
    }

    /// Local-only logout. The provider keeps its authorization.
    pub fn disconnect(&mut self) {
        self.session.address = None;
    }

    /// Reconciles the session with a provider event.
    pub fn handle_event(&mut self, event: ProviderEvent) -> Reconciliation {
        match event {
            ProviderEvent::AccountsChanged(accounts) => match accounts.into_iter().next() {
                None => {
                    self.session.address = None;
                    Reconciliation::Disconnected
                }

                Some(address) if self.session.address.as_ref() == Some(&address) => {
                    Reconciliation::Unchanged
                }

                Some(address) => {
                    self.session.address = Some(address.clone());
                    Reconciliation::Switched(address)
                }
            },

            ProviderEvent::ChainChanged(chain_id) => {
                debug!(%chain_id, "chain changed");
                self.session.address = None;
                Reconciliation::ReloadRequired
            }
        }
    }
}

/// Queries `eth_accounts`. Never prompts the user.
pub async fn existing_accounts<P: WalletProvider>(provider: &P) -> Result<Vec<Address>, Error> {
    accounts(provider, RequestArguments::accounts()).await
}

/// Queries `eth_requestAccounts`, prompting the user for authorization.
pub async fn request_accounts<P: WalletProvider>(provider: &P) -> Result<Vec<Address>, Error> {
    accounts(provider, RequestArguments::request_accounts()).await
}

async fn accounts<P: WalletProvider>(
    provider: &P,
    args: RequestArguments,
) -> Result<Vec<Address>, Error> {
    let result = provider.request(args).await?;

    parse_accounts(result).map_err(Error::Deserialization)
}
