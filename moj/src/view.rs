use crate::scope::Scope;

/// Trait that defines the view layer for components
///
/// A view renders itself to markup on both targets. In the browser it can also
/// hydrate: find the nodes it rendered under `root` and bind them to signals,
/// listeners and requests owned by `scope`.
pub trait View {
    /// Render the component to an HTML string
    fn render(&self) -> String;

    #[cfg(target_arch = "wasm32")]
    fn hydrate(
        &self,
        root: &web_sys::Element,
        scope: &Scope,
    ) -> Result<(), wasm_bindgen::JsValue> {
        let _ = (root, scope);
        Ok(())
    }

    /// Drop everything the view started. The default disposes `scope`.
    fn unmount(&self, scope: &Scope) {
        scope.dispose();
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
