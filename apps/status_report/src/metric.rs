use serde::{Deserialize, Serialize};
use std::fmt;

/// A number shown on the status page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Users,
    Jokes,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Users, Metric::Jokes];

    pub fn key(self) -> &'static str {
        match self {
            Metric::Users => "users",
            Metric::Jokes => "jokes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Users => "Total Users",
            Metric::Jokes => "Total Jokes",
        }
    }

    /// Path of the status endpoint serving this metric.
    pub fn path(self) -> &'static str {
        match self {
            Metric::Users => "/api/status/users",
            Metric::Jokes => "/api/status/jokes",
        }
    }

    /// Full endpoint URL under `api_origin`. An empty origin means same-origin.
    pub fn endpoint(self, api_origin: &str) -> String {
        format!("{}{}", api_origin.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_metric_reads_its_own_endpoint() {
        assert_eq!(Metric::Users.path(), "/api/status/users");
        assert_eq!(Metric::Jokes.path(), "/api/status/jokes");
        assert_eq!(Metric::Users.label(), "Total Users");
        assert_eq!(Metric::Jokes.label(), "Total Jokes");
    }

    #[test]
    fn endpoint_joins_origin() {
        assert_eq!(
            Metric::Jokes.endpoint("http://localhost:5000/"),
            "http://localhost:5000/api/status/jokes"
        );
        assert_eq!(Metric::Users.endpoint(""), "/api/status/users");
    }
}
