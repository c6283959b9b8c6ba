use moj::prelude::*;

use crate::config::ClientConfig;
use crate::counter::CounterWidget;
use crate::metric::Metric;

pub const TITLE: &str = "Status Report";

/// Id of the element the page is mounted into.
pub const ROOT_ID: &str = "status-report";

/// Key of the client configuration inside `window.INIT_DATA`.
pub const CLIENT_CONFIG_KEY: &str = "client";

/// The composition root: a title over one counter per metric.
#[derive(Debug, Clone)]
pub struct StatusPage {
    users: CounterWidget,
    jokes: CounterWidget,
}

impl StatusPage {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            users: CounterWidget::new(Metric::Users, &config.api_origin),
            jokes: CounterWidget::new(Metric::Jokes, &config.api_origin),
        }
    }

    pub fn widget(&self, metric: Metric) -> &CounterWidget {
        match metric {
            Metric::Users => &self.users,
            Metric::Jokes => &self.jokes,
        }
    }

    pub fn widgets(&self) -> [&CounterWidget; 2] {
        [&self.users, &self.jokes]
    }

    /// Render the complete HTML document served at `/`.
    pub fn render_document(
        &self,
        config: &ClientConfig,
        asset_prefix: &str,
    ) -> Result<String, serde_json::Error> {
        let mut init_data = InitData::new();
        init_data.insert(CLIENT_CONFIG_KEY, config)?;

        let prefix = asset_prefix.trim_end_matches('/');

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{init_script}
</head>
<body>
<div id="{root}">{body}</div>
<script type="module">import init, {{ start_client }} from "{prefix}/status_report.js"; await init(); start_client();</script>
</body>
</html>
"#,
            title = escape_html(TITLE),
            init_script = init_data.to_script()?,
            root = ROOT_ID,
            body = self.render(),
            prefix = escape_html(prefix),
        ))
    }
}

impl View for StatusPage {
    fn render(&self) -> String {
        format!(
            r#"<div class="App"><header class="App-header"><h1>{title}</h1>{users}{jokes}</header></div>"#,
            title = escape_html(TITLE),
            users = self.users.render(),
            jokes = self.jokes.render(),
        )
    }

    #[cfg(target_arch = "wasm32")]
    fn hydrate(
        &self,
        root: &web_sys::Element,
        scope: &Scope,
    ) -> Result<(), wasm_bindgen::JsValue> {
        for widget in self.widgets() {
            widget.hydrate(root, &scope.child())?;
        }

        Ok(())
    }
}
