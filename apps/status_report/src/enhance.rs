//! Page-load enhancements: inert `a.disabled` links and the title word limit.

use moj::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlInputElement};

use crate::title_guard::TitleRule;

pub const DISABLED_LINKS: &str = "a.disabled";
pub const TITLE_INPUT_ID: &str = "title";

/// Attach both enhancements to `document`. Everything is removed when `scope` is disposed.
pub fn attach(document: &Document, rule: TitleRule, scope: &Scope) -> Result<(), JsValue> {
    guard_disabled_links(document, scope)?;
    guard_title_words(document, rule, scope)?;

    Ok(())
}

/// Suppress navigation on every anchor carrying the `disabled` class.
pub fn guard_disabled_links(document: &Document, scope: &Scope) -> Result<usize, JsValue> {
    let links = document.query_selector_all(DISABLED_LINKS)?;

    for index in 0..links.length() {
        if let Some(link) = links.item(index) {
            client::listen(scope, link.unchecked_ref(), "click", |event| {
                event.prevent_default();
            })?;
        }
    }

    Ok(links.length() as usize)
}

/// Keep the custom validity of `#title` in line with `rule`. No-op without the input.
pub fn guard_title_words(document: &Document, rule: TitleRule, scope: &Scope) -> Result<bool, JsValue> {
    let Some(input) = document
        .get_element_by_id(TITLE_INPUT_ID)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(false);
    };

    let target = input.clone();
    client::listen(scope, input.unchecked_ref(), "input", move |_event| {
        target.set_custom_validity(&rule.validation_message(&target.value()));
    })?;

    Ok(true)
}
