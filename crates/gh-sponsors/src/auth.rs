use std::io::Read;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::client::DEFAULT_HOST;

const HOST_ENV_VAR: &str = "GH_HOST";
const GITHUB_TOKEN_VARS: &[&str] = &["GH_TOKEN", "GITHUB_TOKEN"];
const ENTERPRISE_TOKEN_VARS: &[&str] = &["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"];

/// Where credentials are looked up when no `--token` is given.
struct Sources<'a> {
    env_var: &'a dyn Fn(&str) -> Option<String>,
    /// Token stored by `gh auth login` for a host.
    gh_login: &'a dyn Fn(&str) -> Option<String>,
}

impl Sources<'_> {
    fn env(&self, key: &str) -> Option<String> {
        (self.env_var)(key).filter(|v| !v.trim().is_empty())
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Ask the gh CLI for the token it stores for `host`. Any failure means "none".
fn gh_auth_token(host: &str) -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token", "--hostname", host])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();
    match output {
        Ok(output) if output.status.success() => String::from_utf8(output.stdout)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty()),
        Ok(output) => {
            debug!(host, status = %output.status, "gh auth token returned no token");
            None
        }
        Err(error) => {
            debug!(host, %error, "gh CLI not available");
            None
        }
    }
}

/// Resolve host: CLI flag, then `GH_HOST`, then github.com.
pub fn resolve_host(cli_host: Option<&str>) -> String {
    host_from(cli_host, &process_env)
}

fn host_from(cli_host: Option<&str>, env_var: &dyn Fn(&str) -> Option<String>) -> String {
    cli_host
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .or_else(|| env_var(HOST_ENV_VAR).filter(|h| !h.is_empty()))
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

/// Resolve the token for `host`: `--token` (`-` reads `stdin`), then the
/// host's env vars, then the gh CLI login.
pub fn resolve_token(cli_token: Option<&str>, host: &str, stdin: impl Read) -> Result<String> {
    let sources = Sources {
        env_var: &process_env,
        gh_login: &gh_auth_token,
    };
    token_for_host(cli_token, host, &sources, stdin)
}

fn token_for_host(
    cli_token: Option<&str>,
    host: &str,
    sources: &Sources<'_>,
    stdin: impl Read,
) -> Result<String> {
    match cli_token {
        Some("-") => piped_token(host, stdin),
        Some(flag) => {
            let token = flag.trim();
            anyhow::ensure!(!token.is_empty(), "--token for {host} must not be empty");
            Ok(token.to_string())
        }
        None => stored_token(host, sources),
    }
}

fn piped_token(host: &str, mut stdin: impl Read) -> Result<String> {
    let mut piped = String::new();
    stdin
        .read_to_string(&mut piped)
        .with_context(|| format!("failed to read the {host} token from stdin"))?;
    let token = piped.trim();
    anyhow::ensure!(!token.is_empty(), "no token for {host} on stdin");
    Ok(token.to_string())
}

fn token_vars(host: &str) -> &'static [&'static str] {
    if host.eq_ignore_ascii_case(DEFAULT_HOST) {
        GITHUB_TOKEN_VARS
    } else {
        ENTERPRISE_TOKEN_VARS
    }
}

fn stored_token(host: &str, sources: &Sources<'_>) -> Result<String> {
    let vars = token_vars(host);
    if let Some(token) = vars.iter().find_map(|var| sources.env(var)) {
        return Ok(token);
    }
    if let Some(token) = (sources.gh_login)(host) {
        debug!(host, "using token from gh CLI login");
        return Ok(token);
    }

    bail!(
        "No GitHub token found for {host}. Set one of: {}, \
         or run `gh auth login --hostname {host}`",
        vars.join(", ")
    )
}
