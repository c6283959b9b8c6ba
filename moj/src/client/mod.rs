//! Browser-side plumbing: requests, listeners and DOM bindings, all scoped.

mod dom;
mod fetch;
mod listener;

pub use dom::{bind_text, document, find_by_id, mount, on_ready};
pub use fetch::get_json;
pub use listener::{listen, listen_once};

/// Spawn a future on the browser event loop.
pub fn spawn<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}
