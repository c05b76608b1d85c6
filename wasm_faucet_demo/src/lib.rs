mod utils;

use {
    faucet_sdk::{
        client::{
            network,
            session,
            wasm::InjectedProvider,
            Config,
            EventStream,
            Faucet,
            Reconciliation,
            ENV_API_BASE_URL,
            ENV_BLOCK_EXPLORER_URL,
            ENV_RPC_URL,
        },
        rpc::faucet::{OutcomeKind, DRIP_AMOUNT, TOKEN_SYMBOL},
    },
    futures_util::StreamExt,
    std::{cell::RefCell, future::Future, rc::Rc},
    wasm_bindgen::prelude::*,
    wasm_bindgen_futures::spawn_local,
    web_sys::console,
    web_time::Instant,
};

type App = Rc<RefCell<Faucet<InjectedProvider>>>;

/// Build-time configuration, the browser has no process environment.
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_RPC_URL => option_env!("FAUCET_RPC_URL"),
        ENV_BLOCK_EXPLORER_URL => option_env!("FAUCET_BLOCK_EXPLORER_URL"),
        ENV_API_BASE_URL => option_env!("FAUCET_API_BASE_URL"),
        _ => None,
    };

    value.map(str::to_owned)
}

fn log_error(context: &str, err: JsValue) {
    console::error_2(&JsValue::from_str(context), &err);
}

fn render(app: &App) {
    if let Err(err) = try_render(app) {
        log_error("render failed", err);
    }
}

fn try_render(app: &App) -> Result<(), JsValue> {
    let mut faucet = app.borrow_mut();
    let connected = faucet.session().connected();
    let loading = faucet.is_loading();

    utils::set_visible("add-network", !connected)?;
    utils::set_disabled("connect", loading || connected)?;
    utils::set_text(
        "connect",
        if connected {
            "Wallet Connected"
        } else {
            "Connect Wallet"
        },
    )?;

    utils::set_visible("wallet-info", connected)?;
    utils::set_visible("faucet-section", connected)?;

    if let Some(address) = faucet.session().address() {
        utils::set_text("address", &address.short())?;
    }

    utils::set_disabled("request", loading)?;
    utils::set_text(
        "request",
        &if loading {
            "Requesting...".to_owned()
        } else {
            format!("Request {DRIP_AMOUNT} {TOKEN_SYMBOL}")
        },
    )?;

    match faucet.visible_outcome(Instant::now()) {
        Some(outcome) => {
            let class = match outcome.kind() {
                OutcomeKind::Success => "modal success-modal",
                OutcomeKind::Error => "modal error-modal",
            };

            utils::set_class("outcome", class)?;
            utils::set_text("outcome-message", &outcome.message())?;
            utils::set_visible("outcome", true)?;
        }

        None => utils::set_visible("outcome", false)?,
    }

    for notification in faucet.take_notifications() {
        utils::show_toast(&notification)?;
    }

    Ok(())
}

async fn check_existing_connection(app: App) {
    let Some(provider) = app.borrow().provider() else {
        return;
    };

    let result = session::existing_accounts(provider.as_ref()).await;

    app.borrow_mut().complete_existing_check(result);
    render(&app);
}

async fn connect(app: App) {
    let provider = app.borrow_mut().begin_connect();

    render(&app);

    let Some(provider) = provider else {
        return;
    };

    let result = session::request_accounts(provider.as_ref()).await;

    app.borrow_mut().complete_connect(result);
    render(&app);
}

async fn add_network(app: App) {
    let pending = app.borrow_mut().begin_add_network();

    let Some((provider, network)) = pending else {
        render(&app);
        return;
    };

    let result = network::add_network(provider.as_ref(), &network).await;

    app.borrow_mut().complete_add_network(result);
    render(&app);
}

async fn request_tokens(app: App) {
    let address = app.borrow_mut().begin_token_request();

    render(&app);

    let Some(address) = address else {
        return;
    };

    let client = app.borrow().client().clone();
    let result = client.request_tokens(&address).await;
    let token = app
        .borrow_mut()
        .complete_token_request(result, Instant::now());

    render(&app);

    let delay = app.borrow().outcome_display_duration();

    utils::sleep(delay).await;

    if app.borrow_mut().expire_outcome(token) {
        render(&app);
    }
}

async fn watch_events(app: App, mut events: EventStream) {
    while let Some(event) = events.next().await {
        let reconciliation = app.borrow_mut().handle_event(event);

        if reconciliation == Reconciliation::ReloadRequired {
            if let Err(err) = utils::reload() {
                log_error("reload failed", err);
            }

            return;
        }

        render(&app);
    }
}

fn bind<F, Fut>(app: &App, id: &str, action: F) -> Result<(), JsValue>
where
    F: Fn(App) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let app = app.clone();

    utils::on_click(id, move || spawn_local(action(app.clone())))
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config =
        Config::from_lookup(build_env).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let provider = InjectedProvider::detect();

    if provider.is_none() {
        console::log_1(&"no wallet extension detected".into());
    }

    let faucet =
        Faucet::new(&config, provider).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let app: App = Rc::new(RefCell::new(faucet));

    if let Some(events) = app.borrow_mut().take_event_stream() {
        spawn_local(watch_events(app.clone(), events));
    }

    bind(&app, "connect", connect)?;
    bind(&app, "add-network", add_network)?;
    bind(&app, "request", request_tokens)?;
    bind(&app, "disconnect", |app| async move {
        app.borrow_mut().disconnect();
        render(&app);
    })?;

    for id in ["instructions", "instructions-connected"] {
        bind(&app, id, |app| async move {
            app.borrow_mut().show_manual_instructions();
            render(&app);
        })?;
    }

    render(&app);
    spawn_local(check_existing_connection(app));

    Ok(())
}
