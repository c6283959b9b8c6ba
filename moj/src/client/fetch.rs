use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestInit, Response};

use crate::error::FetchError;
use crate::scope::Scope;

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// GET `url` and deserialize the JSON body.
///
/// The request is aborted when `scope` is disposed. Once the scope is gone the
/// result is always [`FetchError::Aborted`], whatever the network did.
pub async fn get_json<T: DeserializeOwned>(url: &str, scope: &Scope) -> Result<T, FetchError> {
    if !scope.is_alive() {
        return Err(FetchError::Aborted);
    }

    let network = |err: JsValue| FetchError::Network {
        url: url.to_owned(),
        reason: js_reason(&err),
    };

    let window = web_sys::window().ok_or_else(|| network(JsValue::from_str("no global window")))?;

    let controller = AbortController::new().map_err(network)?;
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_signal(Some(&controller.signal()));

    let request = Request::new_with_str_and_init(url, &init).map_err(network)?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(network)?;

    scope.on_dispose(move || controller.abort());

    let settled = JsFuture::from(window.fetch_with_request(&request)).await;
    if !scope.is_alive() {
        return Err(FetchError::Aborted);
    }

    let response: Response = settled.map_err(network)?.dyn_into().map_err(network)?;

    if !response.ok() {
        return Err(FetchError::Status {
            url: url.to_owned(),
            status: response.status(),
        });
    }

    let text = JsFuture::from(response.text().map_err(network)?).await;
    if !scope.is_alive() {
        return Err(FetchError::Aborted);
    }

    let body = text
        .map_err(network)?
        .as_string()
        .ok_or_else(|| network(JsValue::from_str("response body is not text")))?;

    Ok(serde_json::from_str(&body)?)
}
