//! Server-side router.
//!
//! Paths are matched with `matchit`, so patterns use its syntax: `{name}` for
//! one segment and `{*rest}` for a catch-all tail.

use matchit::Router;
use std::{collections::HashMap, fmt, future::Future, pin::Pin};

use crate::{Reply, RouterError};

/// Route parameters extracted from the matched path.
pub type Params = HashMap<String, String>;

/// Type alias for server-side route handlers.
///
/// A handler is a boxed closure that takes the route parameters and returns a
/// pinned future resolving to the [`Reply`].
pub type ServerHandler =
    Box<dyn Fn(Params) -> Pin<Box<dyn Future<Output = Reply> + Send>> + Send + Sync>;

struct Route {
    pattern: String,
    handler: ServerHandler,
}

/// Main server-side router.
pub struct ServerRouter {
    router: Router<Route>,
    patterns: Vec<String>,
}

impl fmt::Debug for ServerRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerRouter")
            .field("patterns", &self.patterns)
            .finish()
    }
}

impl Default for ServerRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerRouter {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            patterns: Vec::new(),
        }
    }

    /// Register `handler` for `pattern`.
    ///
    /// # Errors
    ///
    /// Fails when the pattern is malformed or conflicts with a registered one.
    pub fn route<F, Fut>(mut self, pattern: &str, handler: F) -> Result<Self, RouterError>
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Reply> + Send + 'static,
    {
        let route = Route {
            pattern: pattern.to_owned(),
            handler: Box::new(move |params| Box::pin(handler(params))),
        };

        self.router
            .insert(pattern, route)
            .map_err(|source| RouterError::Insert {
                pattern: pattern.to_owned(),
                source,
            })?;

        self.patterns.push(pattern.to_owned());

        Ok(self)
    }

    /// Registered patterns, in registration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Return the pattern that `path` would be dispatched to.
    pub fn matched_pattern(&self, path: &str) -> Option<&str> {
        self.router
            .at(path)
            .ok()
            .map(|matched| matched.value.pattern.as_str())
    }

    /// Dispatch `path` to its handler. `None` when no route matches.
    pub async fn handle_request(&self, path: &str) -> Option<Reply> {
        let matched = self.router.at(path).ok()?;

        let params: Params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();

        Some((matched.value.handler)(params).await)
    }
}
