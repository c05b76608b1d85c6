use {
    crate::{
        provider::{Listener, ListenerId, WalletProvider},
        Config,
    },
    faucet_rpc::{
        domain::Address,
        provider::{ProviderError, ProviderEvent, ProviderEventKind, RequestArguments, WalletMethod},
    },
    serde_json::{json, Value},
    std::{
        cell::{Cell, RefCell},
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
            Mutex,
        },
    },
    warp::{http::StatusCode, Filter},
};

pub fn address(value: &str) -> Address {
    value.parse().unwrap()
}

/// In-memory wallet provider with scripted responses.
pub struct FakeProvider {
    accounts: RefCell<Result<Value, ProviderError>>,
    request_accounts: RefCell<Result<Value, ProviderError>>,
    add_chain: RefCell<Result<Value, ProviderError>>,
    calls: RefCell<Vec<RequestArguments>>,
    listeners: RefCell<Vec<(ProviderEventKind, ListenerId, Listener)>>,
    next_id: Cell<u64>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            accounts: RefCell::new(Ok(json!([]))),
            request_accounts: RefCell::new(Ok(json!([]))),
            add_chain: RefCell::new(Ok(Value::Null)),
            calls: RefCell::default(),
            listeners: RefCell::default(),
            next_id: Cell::new(0),
        }
    }

    /// Accounts returned by both `eth_accounts` and `eth_requestAccounts`.
    pub fn with_accounts<const N: usize>(self, accounts: [&str; N]) -> Self {
        *self.accounts.borrow_mut() = Ok(json!(accounts.to_vec()));
        *self.request_accounts.borrow_mut() = Ok(json!(accounts.to_vec()));
        self
    }

    pub fn fail_accounts(&self, err: ProviderError) {
        *self.accounts.borrow_mut() = Err(err);
    }

    pub fn fail_request_accounts(&self, err: ProviderError) {
        *self.request_accounts.borrow_mut() = Err(err);
    }

    pub fn fail_add_chain(&self, err: ProviderError) {
        *self.add_chain.borrow_mut() = Err(err);
    }

    pub fn calls(&self) -> Vec<RequestArguments> {
        self.calls.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn emit(&self, event: ProviderEvent) {
        for (kind, _, listener) in self.listeners.borrow().iter() {
            if *kind == event.kind() {
                listener(event.clone());
            }
        }
    }
}

impl WalletProvider for FakeProvider {
    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError> {
        let method = args.method;

        self.calls.borrow_mut().push(args);

        match method {
            WalletMethod::Accounts => self.accounts.borrow().clone(),
            WalletMethod::RequestAccounts => self.request_accounts.borrow().clone(),
            WalletMethod::AddEthereumChain => self.add_chain.borrow().clone(),
        }
    }

    fn on(&self, event: ProviderEventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());

        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((event, id, listener));

        id
    }

    fn remove_listener(&self, event: ProviderEventKind, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(kind, listener_id, _)| !(*kind == event && *listener_id == id));
    }
}

/// Local stand-in for the faucet API.
pub struct FaucetServer {
    pub config: Config,
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl FaucetServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

/// Serves `body` with `status` on `POST /api/faucet/request`.
pub fn spawn_faucet(status: u16, body: Value) -> FaucetServer {
    spawn_faucet_raw(status, body.to_string())
}

pub fn spawn_faucet_raw(status: u16, body: String) -> FaucetServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let status = StatusCode::from_u16(status).unwrap();

    let route = warp::post()
        .and(warp::path!("api" / "faucet" / "request"))
        .and(warp::body::json())
        .map({
            let hits = hits.clone();
            let bodies = bodies.clone();

            move |request: Value| {
                hits.fetch_add(1, Ordering::SeqCst);
                bodies.lock().unwrap().push(request);
                warp::reply::with_status(body.clone(), status)
            }
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));

    tokio::spawn(server);

    FaucetServer {
        config: Config::default().with_api_base_url(format!("http://{addr}/api")),
        hits,
        bodies,
    }
}

/// Configuration pointing at a port nothing listens on.
pub fn unreachable_config() -> Config {
    Config::default().with_api_base_url("http://127.0.0.1:1/api")
}
