//! The `/api/status/*` endpoints.

use moj_router::Reply;
use serde_json::json;

use super::store::StatusStore;
use crate::counter::CountResponse;
use crate::metric::Metric;

/// Answer `{"count": N}` for `metric`, or a 500 carrying the store error.
pub async fn count_reply<S: StatusStore>(store: &S, metric: Metric, cors_origin: &str) -> Reply {
    let reply = match store.count(metric).await {
        Ok(count) => {
            tracing::debug!(%metric, count, "status count");
            Reply::json(200, &CountResponse { count })
        }
        Err(err) => {
            tracing::warn!(%metric, error = %err, "status count failed");
            Reply::json(500, &json!({ "error": err.to_string() }))
        }
    };

    reply.with_header("Access-Control-Allow-Origin", cors_origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::store::{FixedCounts, StoreError};

    struct BrokenStore;

    impl StatusStore for BrokenStore {
        async fn count(&self, metric: Metric) -> Result<u64, StoreError> {
            Err(StoreError::NegativeCount { metric, value: -1 })
        }
    }

    #[tokio::test]
    async fn count_body_has_the_expected_shape() {
        let store = FixedCounts { users: 42, jokes: 7 };

        let reply = count_reply(&store, Metric::Jokes, "*").await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, "application/json");
        assert_eq!(reply.body.as_ref(), br#"{"count":7}"#);
        assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));
    }

    #[tokio::test]
    async fn store_failures_become_500() {
        let reply = count_reply(&BrokenStore, Metric::Users, "http://localhost:3000").await;

        assert_eq!(reply.status, 500);
        let body: serde_json::Value = serde_json::from_slice(&reply.body).unwrap();
        assert_eq!(body["error"], "users count is negative: -1");
        assert_eq!(
            reply.header("access-control-allow-origin"),
            Some("http://localhost:3000")
        );
    }
}
