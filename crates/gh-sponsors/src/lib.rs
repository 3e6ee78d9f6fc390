#![forbid(unsafe_code)]

pub(crate) mod auth;
mod cli;
pub(crate) mod client;
pub(crate) mod error;
mod jsonpretty;
mod list;
mod logging;
mod output;
pub(crate) mod prompt;
pub(crate) mod sponsors;
pub(crate) mod terminal;
#[cfg(test)]
mod testing;

pub use cli::run;
