//! [`WalletProvider`] backed by the provider a browser extension injects as
//! `window.ethereum`.

use {
    crate::provider::{Listener, ListenerId, WalletProvider},
    faucet_rpc::provider::{
        ProviderError,
        ProviderEvent,
        ProviderEventKind,
        RequestArguments,
        CODE_INTERNAL,
        CODE_UNSUPPORTED_METHOD,
    },
    js_sys::{Function, Promise, Reflect, JSON},
    serde_json::Value,
    std::{
        cell::{Cell, RefCell},
        collections::HashMap,
    },
    tracing::warn,
    wasm_bindgen::{closure::Closure, JsCast, JsValue},
    wasm_bindgen_futures::JsFuture,
};

const ETHEREUM_GLOBAL: &str = "ethereum";

type EventClosure = Closure<dyn FnMut(JsValue)>;

pub struct InjectedProvider {
    ethereum: JsValue,
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<ListenerId, EventClosure>>,
}

impl InjectedProvider {
    /// Looks up `window.ethereum`. Returns `None` when no wallet extension is
    /// installed.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str(ETHEREUM_GLOBAL)).ok()?;

        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }

        Some(Self {
            ethereum,
            next_id: Cell::new(0),
            listeners: RefCell::default(),
        })
    }

    fn method(&self, name: &str) -> Result<Function, ProviderError> {
        Reflect::get(&self.ethereum, &JsValue::from_str(name))
            .ok()
            .and_then(|method| method.dyn_into::<Function>().ok())
            .ok_or_else(|| {
                ProviderError::new(
                    CODE_UNSUPPORTED_METHOD,
                    format!("Provider has no `{name}` method"),
                )
            })
    }
}

impl WalletProvider for InjectedProvider {
    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError> {
        let request = self.method("request")?;
        let args = to_js(&args)?;

        let promise = request
            .call1(&self.ethereum, &args)
            .map_err(|err| to_provider_error(&err))?
            .dyn_into::<Promise>()
            .map_err(|_| ProviderError::new(CODE_INTERNAL, "Provider did not return a promise"))?;

        JsFuture::from(promise)
            .await
            .map(|result| from_js(&result))
            .map_err(|err| to_provider_error(&err))
    }

    fn on(&self, event: ProviderEventKind, listener: Listener) -> ListenerId {
        let closure = EventClosure::new(move |payload: JsValue| {
            match ProviderEvent::from_payload(event, from_js(&payload)) {
                Ok(event) => listener(event),
                Err(err) => warn!(%event, "Malformed provider event: {err}"),
            }
        });

        let id = ListenerId(self.next_id.get());

        self.next_id.set(id.0 + 1);

        match self.method("on") {
            Ok(on) => {
                let name = JsValue::from_str(event.into());

                if let Err(err) = on.call2(&self.ethereum, &name, closure.as_ref().unchecked_ref()) {
                    warn!(%event, "Failed to subscribe: {err:?}");
                }
            }

            Err(err) => warn!(%event, "Failed to subscribe: {err}"),
        }

        self.listeners.borrow_mut().insert(id, closure);

        id
    }

    fn remove_listener(&self, event: ProviderEventKind, id: ListenerId) {
        let Some(closure) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };

        if let Ok(remove) = self.method("removeListener") {
            let name = JsValue::from_str(event.into());

            remove
                .call2(&self.ethereum, &name, closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

fn to_js(value: &RequestArguments) -> Result<JsValue, ProviderError> {
    let json = serde_json::to_string(value)
        .map_err(|err| ProviderError::new(CODE_INTERNAL, err.to_string()))?;

    JSON::parse(&json).map_err(|err| to_provider_error(&err))
}

fn from_js(value: &JsValue) -> Value {
    if value.is_undefined() || value.is_null() {
        return Value::Null;
    }

    JSON::stringify(value)
        .ok()
        .and_then(|json| json.as_string())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or(Value::Null)
}

/// Reads `code` and `message` off a rejected request. Wallet errors are JS
/// `Error` objects whose `message` isn't enumerable, so JSON round-tripping
/// would drop it.
fn to_provider_error(err: &JsValue) -> ProviderError {
    let field = |name: &str| Reflect::get(err, &JsValue::from_str(name)).ok();

    let code = field("code")
        .and_then(|code| code.as_f64())
        .map(|code| code as i64)
        .unwrap_or(CODE_INTERNAL);

    let message = field("message")
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{err:?}"));

    let data = field("data")
        .filter(|data| !data.is_undefined())
        .map(|data| from_js(&data));

    ProviderError {
        code,
        message,
        data,
    }
}
