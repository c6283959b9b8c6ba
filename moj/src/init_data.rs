//! Data handed from the server-rendered page to the client through `window.INIT_DATA`.

use serde::Serialize;
use std::collections::BTreeMap;

/// Collects values the server wants the client to see at startup.
#[derive(Debug, Default, Clone)]
pub struct InitData {
    entries: BTreeMap<String, serde_json::Value>,
}

impl InitData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Serialize>(&mut self, key: &str, data: &T) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(data)?;
        self.entries.insert(key.to_owned(), value);

        Ok(())
    }

    /// Render the `<script>` tag that assigns `window.INIT_DATA`.
    ///
    /// Returns an empty string when nothing was inserted. `<` is emitted as a
    /// unicode escape so that string values cannot close the script element.
    pub fn to_script(&self) -> Result<String, serde_json::Error> {
        if self.entries.is_empty() {
            return Ok(String::new());
        }

        let json = serde_json::to_string(&self.entries)?.replace('<', "\\u003c");

        Ok(format!(
            r#"<script id="moj-init-data">window.INIT_DATA = {json};</script>"#
        ))
    }
}

/// Read `INIT_DATA[key]` and deserialize it.
#[cfg(target_arch = "wasm32")]
pub fn get_typed_init_data<T>(key: &str) -> Option<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let init_data = js_sys::Reflect::get(&window, &JsValue::from_str("INIT_DATA")).ok()?;

    if init_data.is_undefined() || init_data.is_null() {
        return None;
    }

    let entry = js_sys::Reflect::get(&init_data, &JsValue::from_str(key)).ok()?;

    if entry.is_undefined() || entry.is_null() {
        return None;
    }

    let json = js_sys::JSON::stringify(&entry).ok()?.as_string()?;

    serde_json::from_str(&json).ok()
}
