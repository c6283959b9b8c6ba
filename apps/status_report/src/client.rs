//! Browser entry point: hydrate the status page and install the enhancements.

use std::cell::RefCell;

use moj::prelude::*;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Event, EventTarget, PageTransitionEvent};

use crate::config::ClientConfig;
use crate::enhance;
use crate::page::{CLIENT_CONFIG_KEY, ROOT_ID, StatusPage};

thread_local! {
    static APP_SCOPE: RefCell<Option<Scope>> = const { RefCell::new(None) };
}

/// Start the client once. Later calls are ignored while the app is mounted.
pub fn run() -> Result<(), JsValue> {
    moj::diagnostics::init_panic_hook();

    if APP_SCOPE.with(|app| app.borrow().as_ref().is_some_and(Scope::is_alive)) {
        return Ok(());
    }

    let scope = Scope::new();
    APP_SCOPE.with(|app| *app.borrow_mut() = Some(scope.clone()));

    let config: ClientConfig = get_typed_init_data(CLIENT_CONFIG_KEY).unwrap_or_default();

    let window = web_sys::window().ok_or("No global window object")?;
    dispose_on_pagehide(&scope, window.unchecked_ref())?;

    let ready_scope = scope.clone();
    client::on_ready(&scope, move || {
        if let Err(err) = start(&config, &ready_scope) {
            moj::diagnostics::log_error("status report", &format!("{err:?}"));
        }
    })
}

/// Dispose `scope` once the page is unloaded for good.
///
/// A `pagehide` that sends the page into the back/forward cache is ignored:
/// the page may be shown again as it is, guards included.
pub fn dispose_on_pagehide(scope: &Scope, target: &EventTarget) -> Result<(), JsValue> {
    let owner = scope.clone();

    client::listen(scope, target, "pagehide", move |event| {
        if is_persisted(&event) {
            return;
        }

        // Disposing tears down this very listener, so leave the handler first.
        let owner = owner.clone();
        client::spawn(async move { owner.dispose() });
    })
}

fn is_persisted(event: &Event) -> bool {
    event
        .dyn_ref::<PageTransitionEvent>()
        .is_some_and(PageTransitionEvent::persisted)
}

fn start(config: &ClientConfig, scope: &Scope) -> Result<(), JsValue> {
    let document = client::document()?;

    enhance::attach(&document, config.title_rule, &scope.child())?;

    if let Some(root) = document.get_element_by_id(ROOT_ID) {
        let page = StatusPage::new(config);
        client::mount(&page, &root, &scope.child())?;
    }

    Ok(())
}

/// Detach listeners, abort requests and stop all bindings.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(scope) = APP_SCOPE.with(|app| app.borrow_mut().take()) {
        scope.dispose();
    }
}

/// Called by the bootstrap module once the wasm instance is initialized.
#[wasm_bindgen]
pub fn start_client() -> Result<(), JsValue> {
    run()
}
