//! Configuration for the server binary and the settings it hands to the client.

use serde::{Deserialize, Serialize};

use crate::title_guard::TitleRule;

/// Settings the browser client needs, delivered through `window.INIT_DATA`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin of the status API; empty means the page's own origin.
    #[serde(default)]
    pub api_origin: String,
    #[serde(default)]
    pub title_rule: TitleRule,
}

#[cfg(not(target_arch = "wasm32"))]
pub use server::ServerConfig;

#[cfg(not(target_arch = "wasm32"))]
mod server {
    use clap::Parser;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    use super::ClientConfig;
    use crate::title_guard::{EmptyTitlePolicy, TitleRule};

    /// Serve the Master of Jokes status report.
    #[derive(Debug, Clone, Parser)]
    #[command(name = "status-report-server", version, about)]
    pub struct ServerConfig {
        /// Address to listen on
        #[arg(long, env = "MOJ_BIND", default_value = "127.0.0.1:5000")]
        pub bind: SocketAddr,

        /// SQLite database holding the `user` and `joke` tables
        #[arg(long, env = "DATABASE_URL", default_value = "sqlite://instance/master_of_jokes.sqlite")]
        pub database_url: String,

        /// Directory with the wasm bundle, served under /pkg/
        #[arg(long, env = "MOJ_STATIC_DIR", default_value = "./pkg")]
        pub static_dir: PathBuf,

        /// Origin the client should call for the status API (empty: same origin)
        #[arg(long, env = "MOJ_API_ORIGIN", default_value = "")]
        pub api_origin: String,

        /// Value of Access-Control-Allow-Origin on API responses
        #[arg(long, env = "MOJ_CORS_ORIGIN", default_value = "*")]
        pub cors_origin: String,

        /// Maximum number of words accepted in a joke title
        #[arg(long, env = "MOJ_TITLE_MAX_WORDS", default_value_t = crate::title_guard::DEFAULT_MAX_WORDS)]
        pub title_max_words: usize,

        /// How an empty title is counted
        #[arg(long, env = "MOJ_EMPTY_TITLE", value_enum, default_value_t = EmptyTitlePolicy::CountsAsOne)]
        pub empty_title: EmptyTitlePolicy,

        /// Log filter used when RUST_LOG is not set
        #[arg(long, env = "MOJ_LOG", default_value = "info")]
        pub log: String,
    }

    impl ServerConfig {
        pub fn client_config(&self) -> ClientConfig {
            ClientConfig {
                api_origin: self.api_origin.clone(),
                title_rule: TitleRule {
                    max_words: self.title_max_words,
                    empty: self.empty_title,
                },
            }
        }
    }

}
