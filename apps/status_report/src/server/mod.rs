//! The status API server: page rendering, count endpoints and the wasm bundle.

pub mod api;
pub mod assets;
pub mod http;
pub mod store;

use moj_router::{Reply, RouterError, ServerRouter};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ClientConfig, ServerConfig};
use crate::metric::Metric;
use crate::page::StatusPage;
use store::{SqliteStore, StatusStore, StoreError};

pub const ASSET_PREFIX: &str = "/pkg";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("failed to render page: {0}")]
    Render(#[from] serde_json::Error),
}

/// What the router needs besides the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterSettings {
    pub client: ClientConfig,
    pub cors_origin: String,
    pub static_dir: PathBuf,
}

impl From<&ServerConfig> for RouterSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            client: config.client_config(),
            cors_origin: config.cors_origin.clone(),
            static_dir: config.static_dir.clone(),
        }
    }
}

/// Register every route of the status report.
///
/// The page is rendered once here: it only depends on configuration, and the
/// counts are filled in by the client.
pub fn build_router<S: StatusStore>(
    store: Arc<S>,
    settings: RouterSettings,
) -> Result<ServerRouter, ServerError> {
    let page = StatusPage::new(&settings.client).render_document(&settings.client, ASSET_PREFIX)?;
    let page = Arc::new(page);

    let mut router = ServerRouter::new().route("/", move |_| {
        let page = Arc::clone(&page);
        async move { Reply::html(page.as_str()) }
    })?;

    for metric in Metric::ALL {
        let store = Arc::clone(&store);
        let cors_origin = settings.cors_origin.clone();

        router = router.route(metric.path(), move |_| {
            let store = Arc::clone(&store);
            let cors_origin = cors_origin.clone();
            async move { api::count_reply(store.as_ref(), metric, &cors_origin).await }
        })?;
    }

    let static_dir = Arc::new(settings.static_dir);
    let router = router.route(&format!("{ASSET_PREFIX}/{{*file}}"), move |params| {
        let static_dir = Arc::clone(&static_dir);
        async move {
            let file = params.get("file").map(String::as_str).unwrap_or_default();
            assets::serve(&static_dir, file).await
        }
    })?;

    Ok(router)
}

/// Run the server described by `config` until `shutdown` resolves.
pub async fn run<F>(config: ServerConfig, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()>,
{
    let store = SqliteStore::connect(&config.database_url).await?;
    tracing::info!(database = %config.database_url, "connected to database");

    let router = Arc::new(build_router(Arc::new(store), RouterSettings::from(&config))?);
    tracing::debug!(routes = ?router.patterns(), "routes registered");

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(address = %listener.local_addr()?, "status report listening");

    http::serve(listener, router, shutdown).await
}
