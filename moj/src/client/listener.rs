use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

use crate::scope::Scope;

/// Attach `handler` to `target` for `event_type` until `scope` is disposed.
///
/// The closure is owned by the scope cleanup, so it lives exactly as long as
/// the listener is registered and is never leaked with `forget`.
pub fn listen<F>(scope: &Scope, target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    if !scope.is_alive() {
        return Ok(());
    }

    let handler = Rc::new(RefCell::new(handler));
    let closure = Closure::wrap(Box::new(move |event: Event| {
        // Re-entrant dispatch of the same event type is skipped rather than panicking.
        if let Ok(mut handler) = handler.try_borrow_mut() {
            (handler)(event);
        }
    }) as Box<dyn FnMut(Event)>);

    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;

    let target = target.clone();
    let event_type = event_type.to_owned();
    scope.on_dispose(move || {
        let _ = target
            .remove_event_listener_with_callback(&event_type, closure.as_ref().unchecked_ref());
        drop(closure);
    });

    Ok(())
}

/// Like [`listen`], but the listener removes itself after the first event.
pub fn listen_once<F>(scope: &Scope, target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnOnce(Event) + 'static,
{
    let once = scope.child();
    let mut handler = Some(handler);
    let owner = once.clone();

    listen(&once, target, event_type, move |event| {
        if let Some(handler) = handler.take() {
            handler(event);
        }

        // The closure running right now belongs to `owner`; drop it after it returns.
        let owner = owner.clone();
        wasm_bindgen_futures::spawn_local(async move { owner.dispose() });
    })
}
