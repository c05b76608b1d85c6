use {
    faucet_sdk::client::{Level, Notification},
    gloo_timers::future::TimeoutFuture,
    std::time::Duration,
    wasm_bindgen::{closure::Closure, JsCast, JsValue},
    wasm_bindgen_futures::spawn_local,
    web_sys::{Document, Element},
};

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document on window"))
}

fn element(id: &str) -> Result<Element, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

fn millis(duration: Duration) -> u32 {
    duration.as_millis().try_into().unwrap_or(u32::MAX)
}

pub fn set_text(id: &str, text: &str) -> Result<(), JsValue> {
    element(id)?.set_text_content(Some(text));
    Ok(())
}

fn toggle_attribute(id: &str, name: &str, on: bool) -> Result<(), JsValue> {
    let element = element(id)?;

    if on {
        element.set_attribute(name, "")
    } else {
        element.remove_attribute(name)
    }
}

pub fn set_visible(id: &str, visible: bool) -> Result<(), JsValue> {
    toggle_attribute(id, "hidden", !visible)
}

pub fn set_disabled(id: &str, disabled: bool) -> Result<(), JsValue> {
    toggle_attribute(id, "disabled", disabled)
}

pub fn set_class(id: &str, class: &str) -> Result<(), JsValue> {
    element(id)?.set_class_name(class);
    Ok(())
}

/// Binds `handler` to clicks on `#id` for the lifetime of the page.
pub fn on_click(id: &str, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut()>::new(handler);

    element(id)?.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

/// Appends a toast to `#toasts` and removes it after its duration.
pub fn show_toast(notification: &Notification) -> Result<(), JsValue> {
    let toast = document()?.create_element("div")?;
    let class = match notification.level {
        Level::Success => "toast toast-success",
        Level::Error => "toast toast-error",
        Level::Info => "toast toast-info",
    };

    toast.set_class_name(class);
    toast.set_text_content(Some(&notification.message));
    element("toasts")?.append_child(&toast)?;

    let timeout = millis(notification.duration);

    spawn_local(async move {
        TimeoutFuture::new(timeout).await;
        toast.remove();
    });

    Ok(())
}

pub async fn sleep(duration: Duration) {
    TimeoutFuture::new(millis(duration)).await;
}

pub fn reload() -> Result<(), JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .location()
        .reload()
}
