#![allow(missing_docs)]
//! Small reactive view layer shared by the status report server and its wasm client.
//!
//! Signals and effects hold view state, a [`Scope`] bounds the lifetime of
//! whatever a mounted view starts, and [`View`] renders markup on the server
//! and hydrates it in the browser.

pub mod diagnostics;
pub mod error;
pub mod init_data;
pub mod prelude;
pub mod scope;
pub mod signal;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod client;

pub use js_sys;
pub use serde_json;
pub use wasm_bindgen;
pub use web_sys;

pub use error::FetchError;
pub use scope::Scope;
pub use signal::Signal;
pub use view::{View, escape_html};
