use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::sponsors::JsonField;

/// Bad command-line input, detected before any request is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("too many arguments")]
    TooManyArguments,
    #[error(
        "unknown JSON field: {0:?} (available fields: {available})",
        available = JsonField::available()
    )]
    UnknownJsonField(String),
}

/// Failure of a GraphQL round trip.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    GraphQL(#[from] GraphQLErrors),
    #[error("HTTP {status}{detail} ({url})", detail = http_detail(.message))]
    Http {
        status: u16,
        message: Option<String>,
        url: String,
    },
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn http_detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// One entry of the `errors` array of a GraphQL response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphQLErrorEntry {
    pub message: String,
    #[serde(default)]
    pub path: Vec<Value>,
}

impl GraphQLErrorEntry {
    fn path_string(&self) -> String {
        self.path
            .iter()
            .map(|segment| match segment {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Application-level errors reported by the server alongside (or instead of) data.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQLErrors(pub Vec<GraphQLErrorEntry>);

impl fmt::Display for GraphQLErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|e| {
                let path = e.path_string();
                if path.is_empty() {
                    e.message.clone()
                } else {
                    format!("{} ({path})", e.message)
                }
            })
            .collect();
        write!(f, "GraphQL: {}", messages.join(", "))
    }
}

impl std::error::Error for GraphQLErrors {}
