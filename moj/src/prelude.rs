pub use crate::{
    FetchError, Scope, Signal, View, effect, escape_html, init_data::InitData, signal,
};
pub use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
pub use crate::{client, init_data::get_typed_init_data};
