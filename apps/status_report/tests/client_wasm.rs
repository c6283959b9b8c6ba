#![cfg(target_arch = "wasm32")]

use moj::prelude::*;
use status_report::client;
use status_report::enhance::DISABLED_LINKS;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, EventInit, PageTransitionEvent, PageTransitionEventInit, Window};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> Window {
    web_sys::window().unwrap()
}

fn disabled_link() -> Element {
    let document = moj::client::document().unwrap();
    let link = document.create_element("a").unwrap();
    link.set_attribute("href", "#elsewhere").unwrap();
    link.set_class_name("disabled");
    document.body().unwrap().append_child(&link).unwrap();

    assert!(link.matches(DISABLED_LINKS).unwrap());
    link
}

fn click_is_prevented(element: &Element) -> bool {
    let init = EventInit::new();
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("click", &init).unwrap();
    element.dispatch_event(&event).unwrap();
    event.default_prevented()
}

fn hide_page(persisted: bool) {
    let init = PageTransitionEventInit::new();
    init.set_persisted(persisted);
    let event = PageTransitionEvent::new_with_event_init_dict("pagehide", &init).unwrap();
    window().dispatch_event(&event).unwrap();
}

/// Let tasks queued with `spawn_local` run.
async fn next_tick() {
    let promise = moj::js_sys::Promise::new(&mut |resolve, _reject| {
        window().set_timeout_with_callback(&resolve).unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
async fn guards_survive_the_back_forward_cache() {
    let link = disabled_link();

    client::run().unwrap();
    assert!(click_is_prevented(&link));

    hide_page(true);
    next_tick().await;
    assert!(click_is_prevented(&link));

    hide_page(false);
    next_tick().await;
    assert!(!click_is_prevented(&link));

    client::teardown();
    link.remove();
}

#[wasm_bindgen_test]
async fn final_pagehide_disposes_the_scope() {
    let scope = Scope::new();
    let target = moj::client::document().unwrap().create_element("div").unwrap();

    client::dispose_on_pagehide(&scope, target.unchecked_ref()).unwrap();

    let init = PageTransitionEventInit::new();
    init.set_persisted(true);
    let cached = PageTransitionEvent::new_with_event_init_dict("pagehide", &init).unwrap();
    target.dispatch_event(&cached).unwrap();
    next_tick().await;
    assert!(scope.is_alive());

    target.dispatch_event(&Event::new("pagehide").unwrap()).unwrap();
    next_tick().await;
    assert!(!scope.is_alive());
}
