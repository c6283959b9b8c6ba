use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use super::listener::listen_once;
use crate::effect;
use crate::scope::Scope;
use crate::signal::Signal;
use crate::view::View;

pub fn document() -> Result<Document, JsValue> {
    let window = web_sys::window().ok_or("No global window object")?;
    window.document().ok_or_else(|| "No document object".into())
}

/// Run `f` once the DOM is parsed.
///
/// Wasm usually finishes loading after `DOMContentLoaded` already fired, so the
/// ready state is checked first and `f` runs synchronously in that case.
pub fn on_ready<F>(scope: &Scope, f: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let document = document()?;
    let state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))?
        .as_string()
        .unwrap_or_default();

    if state == "loading" {
        listen_once(scope, document.unchecked_ref(), "DOMContentLoaded", move |_| f())
    } else {
        f();
        Ok(())
    }
}

/// Keep the text content of `element` equal to `text` while `scope` is alive.
pub fn bind_text(scope: &Scope, element: &Element, text: &Signal<String>) {
    let element = element.clone();
    let text = text.clone();

    let id = effect!({
        let value = text.get();
        if element.text_content().as_deref() != Some(value.as_str()) {
            element.set_text_content(Some(&value));
        }
    });

    scope.own_effect(id);
}

/// Mount `view` into `target`: render it there if the server did not, then hydrate.
pub fn mount<V: View>(view: &V, target: &Element, scope: &Scope) -> Result<(), JsValue> {
    if target.child_element_count() == 0 {
        target.set_inner_html(&view.render());
    }

    view.hydrate(target, scope)
}

/// Find `#id` below `root`, if present.
pub fn find_by_id(root: &Element, id: &str) -> Result<Option<Element>, JsValue> {
    root.query_selector(&format!("#{id}"))
}
