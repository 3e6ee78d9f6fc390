use anyhow::{Result, bail};
use tracing::info;

use crate::client::GraphQL;
use crate::error::UsageError;
use crate::output::{OutputCaps, render_sponsors};
use crate::prompt::Prompter;
use crate::sponsors::{DEFAULT_LIST_LIMIT, JsonField, fetch_sponsors, parse_json_fields};
use crate::terminal::Terminal;

const USERNAME_PROMPT: &str = "Which user do you want to target?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub username: Option<String>,
    pub fields: Option<Vec<JsonField>>,
    pub limit: u32,
}

impl ListOptions {
    /// Validate raw arguments. Runs before any request is made.
    pub fn from_args(args: &[String], json: Option<&str>) -> Result<Self, UsageError> {
        let username = match args {
            [] => None,
            [username] => Some(username.clone()),
            _ => return Err(UsageError::TooManyArguments),
        };
        let fields = match json {
            Some(raw) if !raw.is_empty() => Some(parse_json_fields(raw)?),
            _ => None,
        };
        Ok(Self {
            username,
            fields,
            limit: DEFAULT_LIST_LIMIT,
        })
    }
}

fn resolve_username(
    opts: &ListOptions,
    term: &dyn Terminal,
    prompter: &dyn Prompter,
) -> Result<String> {
    if let Some(username) = opts.username.as_deref().filter(|u| !u.is_empty()) {
        return Ok(username.to_string());
    }
    if !term.is_terminal_output() {
        bail!("username not provided");
    }
    prompter.input(USERNAME_PROMPT, "")
}

/// Resolve the target user, then connect, fetch its sponsors and print them.
///
/// `connect` runs only once a username is known, so a missing username is
/// reported before any credential is looked up or `stdin` is read.
pub fn list_run<C, F>(
    opts: &ListOptions,
    term: &mut dyn Terminal,
    prompter: &dyn Prompter,
    connect: F,
) -> Result<()>
where
    C: GraphQL,
    F: FnOnce(&mut dyn Terminal) -> Result<C>,
{
    let username = resolve_username(opts, term, prompter)?;
    let client = connect(term)?;
    info!(username = %username, limit = opts.limit, "listing sponsors");
    let sponsors = fetch_sponsors(&client, &username, opts.limit)?;

    let caps = OutputCaps {
        interactive: term.is_terminal_output(),
        color: term.color_enabled(),
        width: term.size().map(|(width, _)| width),
    };
    let (out, err) = term.out_and_err();
    render_sponsors(&sponsors, opts.fields.as_deref(), caps, out, err)?;
    Ok(())
}
