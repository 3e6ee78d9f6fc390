use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use ureq::{Agent, http};

use crate::error::{GraphQLErrorEntry, GraphQLErrors, QueryError};

pub const DEFAULT_HOST: &str = "github.com";
const TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("gh-sponsors/", env!("CARGO_PKG_VERSION"));

/// Something that can execute a named GraphQL query and hand back its `data`.
pub trait GraphQL {
    fn query(&self, operation: &str, query: &str, variables: Value) -> Result<Value, QueryError>;
}

impl<T: GraphQL + ?Sized> GraphQL for &T {
    fn query(&self, operation: &str, query: &str, variables: Value) -> Result<Value, QueryError> {
        (**self).query(operation, query, variables)
    }
}

/// GraphQL endpoint for a host: github.com and ghe.com tenancies live on an
/// `api.` subdomain, Enterprise Server under `/api/graphql`.
pub fn graphql_endpoint(host: &str) -> String {
    let host = host.trim().to_ascii_lowercase();
    if host == DEFAULT_HOST {
        "https://api.github.com/graphql".to_string()
    } else if host.ends_with(".ghe.com") {
        format!("https://api.{host}/graphql")
    } else {
        format!("https://{host}/api/graphql")
    }
}

pub struct GithubClient {
    agent: Agent,
    endpoint: String,
    authorization: String,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("endpoint", &self.endpoint)
            .field("authorization", &"[redacted]")
            .finish()
    }
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQLResponse {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    errors: Vec<GraphQLErrorEntry>,
}

impl GithubClient {
    pub fn new(host: &str, token: &str) -> Result<Self> {
        anyhow::ensure!(!token.is_empty(), "GitHub token must not be empty");
        let agent = Agent::config_builder()
            .timeout_global(Some(TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            endpoint: graphql_endpoint(host),
            authorization: format!("token {token}"),
        })
    }
}

impl GraphQL for GithubClient {
    fn query(&self, operation: &str, query: &str, variables: Value) -> Result<Value, QueryError> {
        let bytes = serde_json::to_vec(&GraphQLRequest {
            query,
            operation_name: operation,
            variables,
        })?;
        debug!(operation, endpoint = %self.endpoint, "sending GraphQL query");
        let resp = self
            .agent
            .post(&self.endpoint)
            .header("Authorization", &self.authorization)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json")
            .send(&bytes)?;
        handle_response(&self.endpoint, resp)
    }
}

fn handle_response(url: &str, mut resp: http::Response<ureq::Body>) -> Result<Value, QueryError> {
    let status = resp.status().as_u16();
    let text = resp.body_mut().read_to_string()?;
    debug!(status, bytes = text.len(), "received GraphQL response");
    parse_response(url, status, &text)
}

/// Split a raw reply into `data`, application errors, or an HTTP failure.
pub(crate) fn parse_response(url: &str, status: u16, text: &str) -> Result<Value, QueryError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|body| body.get("message")?.as_str().map(str::to_string))
            .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()));
        return Err(QueryError::Http {
            status,
            message,
            url: url.to_string(),
        });
    }

    let body: GraphQLResponse = serde_json::from_str(text)?;
    if !body.errors.is_empty() {
        return Err(GraphQLErrors(body.errors).into());
    }
    Ok(body.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://api.github.com/graphql";

    #[test]
    fn endpoint_for_github_dot_com() {
        assert_eq!(graphql_endpoint("github.com"), "https://api.github.com/graphql");
        assert_eq!(graphql_endpoint(" GitHub.com "), "https://api.github.com/graphql");
    }

    #[test]
    fn endpoint_for_ghe_tenancy() {
        assert_eq!(
            graphql_endpoint("acme.ghe.com"),
            "https://api.acme.ghe.com/graphql"
        );
    }

    #[test]
    fn endpoint_for_enterprise_server() {
        assert_eq!(
            graphql_endpoint("git.example.org"),
            "https://git.example.org/api/graphql"
        );
    }

    #[test]
    fn new_rejects_empty_token() {
        let err = GithubClient::new("github.com", "").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn debug_redacts_token() {
        let client = GithubClient::new("github.com", "ghp_secret").unwrap();
        let shown = format!("{client:?}");
        assert!(!shown.contains("ghp_secret"));
        assert!(shown.contains("[redacted]"));
    }

    #[test]
    fn request_body_shape() {
        let req = GraphQLRequest {
            query: "query Q { viewer { login } }",
            operation_name: "Q",
            variables: json!({"login": "johndoe"}),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "query": "query Q { viewer { login } }",
                "operationName": "Q",
                "variables": {"login": "johndoe"}
            })
        );
    }

    #[test]
    fn parse_response_returns_data() {
        let data = parse_response(URL, 200, r#"{"data": {"user": null}}"#).unwrap();
        assert_eq!(data, json!({"user": null}));
    }

    #[test]
    fn parse_response_missing_data_is_null() {
        let data = parse_response(URL, 200, "{}").unwrap();
        assert!(data.is_null());
    }

    #[test]
    fn parse_response_graphql_errors_win_over_data() {
        let err = parse_response(
            URL,
            200,
            r#"{"data":{}, "errors": [{"message": "some gql error"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::GraphQL(_)));
        assert_eq!(err.to_string(), "GraphQL: some gql error");
    }

    #[test]
    fn parse_response_http_error_with_message() {
        let err = parse_response(URL, 401, r#"{"message": "Bad credentials"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP 401: Bad credentials (https://api.github.com/graphql)"
        );
    }

    #[test]
    fn parse_response_http_error_non_json() {
        let err = parse_response(URL, 502, "Bad Gateway\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP 502: Bad Gateway (https://api.github.com/graphql)"
        );
    }

    #[test]
    fn parse_response_http_error_empty_body() {
        let err = parse_response(URL, 503, "").unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503 (https://api.github.com/graphql)");
    }

    #[test]
    fn parse_response_success_non_json_is_decode_error() {
        let err = parse_response(URL, 200, "<html>").unwrap_err();
        assert!(matches!(err, QueryError::Decode(_)));
    }
}
