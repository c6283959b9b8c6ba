#![allow(missing_docs)]
//! Path routing for the status report server.

use thiserror::Error;

mod reply;
mod server_router;

pub use matchit;
pub use reply::Reply;
pub use server_router::{Params, ServerHandler, ServerRouter};

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("failed to insert route '{pattern}': {source}")]
    Insert {
        pattern: String,
        #[source]
        source: matchit::InsertError,
    },
}
