//! Fetching a sponsor list and the field registry used to project it as JSON.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, trace};

use crate::client::GraphQL;
use crate::error::{QueryError, UsageError};

pub const DEFAULT_LIST_LIMIT: u32 = 30;

const SPONSORS_OPERATION: &str = "UserSponsorList";

const SPONSORS_QUERY: &str = "\
query UserSponsorList($login: String!, $limit: Int!) {
  user(login: $login) {
    sponsors(first: $limit, orderBy: {direction: ASC, field: LOGIN}) {
      edges {
        node {
          __typename
          ... on User { login name }
          ... on Organization { login name }
        }
      }
    }
  }
}";

/// An account sponsoring the queried user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sponsor {
    pub login: String,
    pub name: String,
}

/// Fields accepted by `--json`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JsonField {
    Login,
    Name,
}

impl JsonField {
    pub const ALL: [JsonField; 2] = [Self::Login, Self::Name];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Name => "name",
        }
    }

    /// Comma-separated list of every recognised field, for error messages.
    pub fn available() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }

    fn value(self, sponsor: &Sponsor) -> &str {
        match self {
            Self::Login => &sponsor.login,
            Self::Name => &sponsor.name,
        }
    }
}

impl FromStr for JsonField {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UsageError::UnknownJsonField(s.to_string()))
    }
}

/// Parse the raw `--json` value. Names are taken verbatim, so `"login, name"`
/// is rejected on `" name"`.
pub fn parse_json_fields(raw: &str) -> Result<Vec<JsonField>, UsageError> {
    raw.split(',').map(JsonField::from_str).collect()
}

/// Keep only the requested fields of every sponsor, preserving sponsor order.
pub fn project(sponsors: &[Sponsor], fields: &[JsonField]) -> Value {
    let rows = sponsors
        .iter()
        .map(|sponsor| {
            let object: Map<String, Value> = fields
                .iter()
                .map(|f| (f.as_str().to_string(), Value::from(f.value(sponsor))))
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}

// -- response shape --

#[derive(Deserialize)]
struct SponsorsData {
    user: Option<SponsorsUser>,
}

#[derive(Deserialize)]
struct SponsorsUser {
    sponsors: SponsorConnection,
}

#[derive(Deserialize)]
struct SponsorConnection {
    #[serde(default)]
    edges: Vec<SponsorEdge>,
}

#[derive(Deserialize)]
struct SponsorEdge {
    node: Option<SponsorNode>,
}

#[derive(Deserialize)]
#[serde(tag = "__typename")]
enum SponsorNode {
    User(Account),
    Organization(Account),
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct Account {
    #[serde(default)]
    login: String,
    #[serde(default)]
    name: Option<String>,
}

impl SponsorNode {
    fn into_sponsor(self) -> Option<Sponsor> {
        match self {
            Self::User(account) | Self::Organization(account) => account.into_sponsor(),
            Self::Other => None,
        }
    }
}

impl Account {
    fn into_sponsor(self) -> Option<Sponsor> {
        if self.login.is_empty() {
            return None;
        }
        Some(Sponsor {
            login: self.login,
            name: self.name.unwrap_or_default(),
        })
    }
}

fn normalize(data: Value) -> Result<Vec<Sponsor>, QueryError> {
    let Some(data) = serde_json::from_value::<Option<SponsorsData>>(data)? else {
        return Ok(Vec::new());
    };
    let Some(user) = data.user else {
        return Ok(Vec::new());
    };

    let edges = user.sponsors.edges;
    let total = edges.len();
    let sponsors: Vec<Sponsor> = edges
        .into_iter()
        .filter_map(|edge| edge.node.and_then(SponsorNode::into_sponsor))
        .collect();
    if sponsors.len() != total {
        trace!(
            dropped = total - sponsors.len(),
            "skipped edges without a user or organization login"
        );
    }
    Ok(sponsors)
}

/// Fetch the first `limit` sponsors of `username`, ordered by login.
pub fn fetch_sponsors(
    client: &dyn GraphQL,
    username: &str,
    limit: u32,
) -> Result<Vec<Sponsor>, QueryError> {
    let variables = json!({"login": username, "limit": limit});
    let data = client.query(SPONSORS_OPERATION, SPONSORS_QUERY, variables)?;
    let sponsors = normalize(data)?;
    debug!(username, count = sponsors.len(), "fetched sponsors");
    Ok(sponsors)
}
