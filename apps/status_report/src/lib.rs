//! Master of Jokes status report.
//!
//! This library exposes the counter widgets, the page that composes them and
//! the page-load enhancements for the browser, plus the status API server for
//! native targets.

#![allow(missing_docs)]

pub mod config;
pub mod counter;
pub mod metric;
pub mod page;
pub mod title_guard;

#[cfg(target_arch = "wasm32")]
pub mod client;
#[cfg(target_arch = "wasm32")]
pub mod enhance;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;

pub use config::ClientConfig;
pub use counter::{CountResponse, CounterWidget, parse_count};
pub use metric::Metric;
pub use page::StatusPage;
pub use title_guard::{EmptyTitlePolicy, TitleRule};
