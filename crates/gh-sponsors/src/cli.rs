use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::auth;
use crate::client::GithubClient;
use crate::list::{ListOptions, list_run};
use crate::logging;
use crate::prompt::{Prompter, TerminalPrompter};
use crate::terminal::{SystemTerminal, Terminal};

#[derive(Parser)]
#[command(name = "gh-sponsors", version, about = "Manage sponsors")]
struct Cli {
    /// API token (overrides GH_TOKEN/GITHUB_TOKEN; use '-' to read from stdin)
    #[arg(long, global = true)]
    token: Option<String>,

    /// GitHub host to query (overrides GH_HOST)
    #[arg(long, global = true)]
    hostname: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sponsors of a given user
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args)]
struct ListArgs {
    /// User or organization whose sponsors to list
    #[arg(value_name = "USERNAME")]
    usernames: Vec<String>,

    /// Output JSON with the given comma-separated fields (login, name)
    #[arg(long, value_name = "FIELDS")]
    json: Option<String>,
}

fn handle_list(args: ListArgs, token: Option<&str>, hostname: Option<&str>) -> Result<()> {
    let mut term = SystemTerminal::from_env();
    list_command(args, token, hostname, &mut term, &TerminalPrompter)
}

fn list_command(
    args: ListArgs,
    token: Option<&str>,
    hostname: Option<&str>,
    term: &mut dyn Terminal,
    prompter: &dyn Prompter,
) -> Result<()> {
    let opts = ListOptions::from_args(&args.usernames, args.json.as_deref())?;
    list_run(&opts, term, prompter, |term| connect(token, hostname, term))
}

fn connect(
    token: Option<&str>,
    hostname: Option<&str>,
    term: &mut dyn Terminal,
) -> Result<GithubClient> {
    let host = auth::resolve_host(hostname);
    let token = auth::resolve_token(token, &host, term.input())?;
    GithubClient::new(&host, &token)
}

/// Parse CLI arguments and execute the corresponding command.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    logging::init(cli.verbose);

    match cli.command {
        Commands::List(args) => handle_list(args, cli.token.as_deref(), cli.hostname.as_deref()),
    }
}
