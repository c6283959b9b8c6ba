#![allow(missing_docs)]

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Err(err) = status_report::client::run() {
            moj::diagnostics::log_error("status report", &format!("{err:?}"));
        }
    }
}
