//! Diagnostic logging that works the same from shared view code on both targets.
//!
//! In the browser entries go to `console`; natively they go through `tracing`.

#[cfg(target_arch = "wasm32")]
pub fn log_error(context: &str, message: &str) {
    web_sys::console::error_1(&format!("{context}: {message}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_error(context: &str, message: &str) {
    tracing::error!(context, "{message}");
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_directives` when it is set. Calling this twice
/// is harmless: the second install fails and is ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_tracing(default_directives: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Route Rust panics to `console.error` when the feature is enabled.
#[cfg(target_arch = "wasm32")]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
