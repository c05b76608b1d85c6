//! The faucet page state: wallet session, loading flag, notifications and the
//! request outcome overlay, driven by user intents and provider events.
//!
//! Every wallet or HTTP interaction is available in two forms. The `async`
//! methods run the whole interaction on `&mut self`. The `begin_*` /
//! `complete_*` pairs split it around the external call, for hosts that share
//! the controller (e.g. behind `Rc<RefCell<_>>`) and must not keep it
//! borrowed while a wallet prompt is pending.

use {
    crate::{
        error::Error,
        http::FaucetClient,
        network::{self, add_network_notification, manual_instructions},
        notification::{
            Notification,
            MSG_CONNECTED,
            MSG_CONNECT_FAILED,
            MSG_CONNECT_REJECTED,
            MSG_DISCONNECTED,
            MSG_NETWORK_NOT_INSTALLED,
            MSG_NOT_INSTALLED,
        },
        outcome::{OutcomeSlot, OutcomeToken},
        provider::WalletProvider,
        session::{self, EventStream, Reconciliation, SessionTracker, WalletSession},
        Config,
    },
    faucet_rpc::{
        domain::Address,
        faucet::{Drip, FaucetError, RequestOutcome},
        network::NetworkDescriptor,
        provider::ProviderEvent,
    },
    std::{collections::VecDeque, rc::Rc, time::Duration},
    tracing::{info, warn},
    web_time::Instant,
};

pub struct Faucet<P: WalletProvider> {
    tracker: SessionTracker<P>,
    network: NetworkDescriptor,
    client: FaucetClient,
    loading: bool,
    outcome: OutcomeSlot,
    notifications: VecDeque<Notification>,
}

impl<P: WalletProvider> Faucet<P> {
    /// Mounts the controller. Subscribes to provider events right away;
    /// listeners are removed when the controller is dropped.
    pub fn new(config: &Config, provider: Option<P>) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            tracker: SessionTracker::new(provider),
            network: config.network(),
            client: FaucetClient::new(config)?,
            loading: false,
            outcome: OutcomeSlot::default(),
            notifications: VecDeque::new(),
        })
    }

    pub fn session(&self) -> &WalletSession {
        self.tracker.session()
    }

    pub fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    pub fn client(&self) -> &FaucetClient {
        &self.client
    }

    pub fn provider(&self) -> Option<Rc<P>> {
        self.tracker.provider().cloned()
    }

    pub fn has_provider(&self) -> bool {
        self.tracker.provider().is_some()
    }

    /// Set while a wallet prompt or faucet request is pending.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The outcome overlay, ignoring its deadline.
    pub fn outcome(&self) -> Option<&RequestOutcome> {
        self.outcome.current()
    }

    pub fn visible_outcome(&self, now: Instant) -> Option<&RequestOutcome> {
        self.outcome.visible_at(now)
    }

    pub fn outcome_display_duration(&self) -> Duration {
        self.outcome.display_for()
    }

    /// Clears the outcome shown under `token`, unless it was replaced since.
    pub fn expire_outcome(&mut self, token: OutcomeToken) -> bool {
        self.outcome.expire(token)
    }

    /// Clears the outcome if its display time has run out at `now`.
    pub fn expire_due_outcome(&mut self, now: Instant) -> bool {
        self.outcome.expire_due(now)
    }

    /// Drains pending notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    pub fn take_event_stream(&mut self) -> Option<EventStream> {
        self.tracker.take_event_stream()
    }

    /// Waits for the next provider event and applies it.
    pub async fn process_next_event(&mut self) -> Option<Reconciliation> {
        let event = self.tracker.next_event().await?;

        Some(self.handle_event(event))
    }

    /// Applies every event delivered so far.
    pub fn poll_events(&mut self) -> Vec<Reconciliation> {
        let mut applied = Vec::new();

        while let Some(event) = self.tracker.try_next_event() {
            applied.push(self.handle_event(event));
        }

        applied
    }

    /// Reconciles local state with a provider event.
    ///
    /// On [`Reconciliation::ReloadRequired`] all local state has already been
    /// discarded; browser hosts are expected to reload the page as well.
    pub fn handle_event(&mut self, event: ProviderEvent) -> Reconciliation {
        let reconciliation = self.tracker.handle_event(event);

        match &reconciliation {
            Reconciliation::Unchanged => {}

            Reconciliation::Switched(address) => {
                info!(address = %address, "wallet account switched");
                self.notify(Notification::switched_account(address));
            }

            Reconciliation::Disconnected => {
                info!("wallet disconnected by provider");
                self.outcome.clear();
                self.notify(Notification::error(MSG_DISCONNECTED));
            }

            Reconciliation::ReloadRequired => self.reset(),
        }

        reconciliation
    }

    /// Full reset. Drops the session, the outcome overlay, the loading flag
    /// and queued notifications.
    pub fn reset(&mut self) {
        info!("resetting faucet state");
        self.tracker.disconnect();
        self.outcome.clear();
        self.loading = false;
        self.notifications.clear();
    }

    /// Silent check for an already authorized wallet, run on mount.
    pub async fn check_existing_connection(&mut self) {
        self.tracker.check_existing_connection().await;
    }

    /// Applies the result of [`session::existing_accounts`].
    pub fn complete_existing_check(&mut self, result: Result<Vec<Address>, Error>) {
        self.tracker.apply_existing(result);
    }

    /// Starts a connection request. Returns the provider to call
    /// [`session::request_accounts`] on, or `None` when no provider is
    /// installed or another interaction is pending.
    pub fn begin_connect(&mut self) -> Option<Rc<P>> {
        if self.loading {
            return None;
        }

        let Some(provider) = self.tracker.provider().cloned() else {
            self.notify(Notification::error(MSG_NOT_INSTALLED));
            return None;
        };

        self.loading = true;

        Some(provider)
    }

    pub fn complete_connect(&mut self, result: Result<Vec<Address>, Error>) {
        self.loading = false;

        match result {
            Ok(accounts) => {
                if self.tracker.apply_connection(accounts).is_some() {
                    self.notify(Notification::success(MSG_CONNECTED));
                }
            }

            Err(err) => {
                warn!("Error connecting wallet: {err}");

                let rejected = err
                    .provider_error()
                    .is_some_and(|err| err.is_user_rejection());

                self.notify(Notification::error(if rejected {
                    MSG_CONNECT_REJECTED
                } else {
                    MSG_CONNECT_FAILED
                }));
            }
        }
    }

    /// Prompts the user to authorize the page.
    pub async fn connect(&mut self) {
        let Some(provider) = self.begin_connect() else {
            return;
        };

        let result = session::request_accounts(provider.as_ref()).await;

        self.complete_connect(result);
    }

    /// Local logout. The wallet keeps its permission grant.
    pub fn disconnect(&mut self) {
        self.tracker.disconnect();
        self.outcome.clear();
        self.notify(Notification::success(MSG_DISCONNECTED));
    }

    /// Starts registering the network with the wallet. Returns `None` when no
    /// provider is installed.
    pub fn begin_add_network(&mut self) -> Option<(Rc<P>, NetworkDescriptor)> {
        let Some(provider) = self.tracker.provider().cloned() else {
            self.notify(Notification::error(MSG_NETWORK_NOT_INSTALLED));
            return None;
        };

        Some((provider, self.network.clone()))
    }

    pub fn complete_add_network(&mut self, result: Result<(), Error>) {
        let notification = add_network_notification(&self.network, &result);

        self.notify(notification);
    }

    pub async fn add_network(&mut self) {
        let Some((provider, network)) = self.begin_add_network() else {
            return;
        };

        let result = network::add_network(provider.as_ref(), &network).await;

        self.complete_add_network(result);
    }

    /// Shows the network details for manual setup. Fails fast like
    /// [`Faucet::add_network`] when no wallet extension is installed.
    pub fn show_manual_instructions(&mut self) {
        let notification = if self.has_provider() {
            manual_instructions(&self.network)
        } else {
            Notification::error(MSG_NETWORK_NOT_INSTALLED)
        };

        self.notify(notification);
    }

    /// Starts a faucet request. Returns the address to request tokens for, or
    /// `None` if no wallet is connected or a request is already pending. No
    /// HTTP call may be issued on `None`.
    pub fn begin_token_request(&mut self) -> Option<Address> {
        if self.loading {
            return None;
        }

        let Some(address) = self.tracker.session().address().cloned() else {
            self.notify(Notification::error(FaucetError::NotConnected.message()));
            return None;
        };

        self.loading = true;

        Some(address)
    }

    /// Records the faucet response and shows it. The returned token expires
    /// the overlay once [`Faucet::outcome_display_duration`] has elapsed.
    pub fn complete_token_request(
        &mut self,
        result: Result<Drip, FaucetError>,
        now: Instant,
    ) -> OutcomeToken {
        self.loading = false;

        if let Ok(drip) = &result {
            info!(hash = %drip.hash, amount = %drip.amount, "tokens sent");
            self.notify(Notification::success(drip.message()));
        }

        self.outcome.show(result.into(), now)
    }

    /// Requests a drip for the connected address.
    pub async fn request_tokens(&mut self) -> Option<OutcomeToken> {
        let address = self.begin_token_request()?;
        let result = self.client.request_tokens(&address).await;

        Some(self.complete_token_request(result, Instant::now()))
    }
}
