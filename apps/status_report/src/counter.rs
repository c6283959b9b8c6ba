//! The counter widget: one fetched number with a loading placeholder.

use moj::prelude::*;
use serde::{Deserialize, Serialize};

use crate::metric::Metric;

pub const LOADING: &str = "Loading...";

/// Body returned by the status endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Parse a status endpoint body. Anything but `{"count": <u64>}` is malformed.
pub fn parse_count(body: &str) -> Result<u64, FetchError> {
    let response: CountResponse = serde_json::from_str(body)?;
    Ok(response.count)
}

pub fn display_text(count: Option<u64>) -> String {
    count.map_or_else(|| LOADING.to_owned(), |n| n.to_string())
}

/// Displays one metric. The count stays unset until a response arrives.
#[derive(Debug, Clone)]
pub struct CounterWidget {
    metric: Metric,
    endpoint: String,
    count: Signal<Option<u64>>,
}

impl CounterWidget {
    pub fn new(metric: Metric, api_origin: &str) -> Self {
        Self {
            metric,
            endpoint: metric.endpoint(api_origin),
            count: signal!(None),
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn count(&self) -> Option<u64> {
        self.count.peek()
    }

    pub fn text(&self) -> String {
        display_text(self.count.peek())
    }

    pub fn container_id(&self) -> String {
        format!("counter-{}", self.metric.key())
    }

    pub fn value_id(&self) -> String {
        format!("counter-{}-value", self.metric.key())
    }

    /// Apply the outcome of the mount-time request.
    ///
    /// The value is set at most once, and only while `scope` is alive.
    /// Failures are logged and leave the widget on its placeholder. Returns
    /// whether the displayed value changed.
    pub fn resolve(&self, scope: &Scope, outcome: Result<u64, FetchError>) -> bool {
        if !scope.is_alive() {
            return false;
        }

        match outcome {
            Ok(count) if self.count.with(Option::is_none) => {
                self.count.set(Some(count));
                true
            }
            Ok(_) => false,
            Err(err) if err.is_aborted() => false,
            Err(err) => {
                moj::diagnostics::log_error(
                    &format!("error fetching {} count", self.metric),
                    &err.to_string(),
                );
                false
            }
        }
    }
}

impl View for CounterWidget {
    fn render(&self) -> String {
        format!(
            r#"<div class="counter" id="{id}"><h2>{label}</h2><p id="{value_id}">{text}</p></div>"#,
            id = self.container_id(),
            label = escape_html(self.metric.label()),
            value_id = self.value_id(),
            text = escape_html(&self.text()),
        )
    }

    #[cfg(target_arch = "wasm32")]
    fn hydrate(
        &self,
        root: &web_sys::Element,
        scope: &Scope,
    ) -> Result<(), wasm_bindgen::JsValue> {
        if let Some(value) = client::find_by_id(root, &self.value_id())? {
            let (text, effect_id) = self.count.derive(|count| display_text(*count));
            scope.own_effect(effect_id);
            client::bind_text(scope, &value, &text);
        }

        let widget = self.clone();
        let scope = scope.clone();
        client::spawn(async move {
            let outcome = client::get_json::<CountResponse>(widget.endpoint(), &scope)
                .await
                .map(|response| response.count);
            widget.resolve(&scope, outcome);
        });

        Ok(())
    }
}
