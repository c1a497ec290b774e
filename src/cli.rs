//! CLI domain: parse, route, and output/presentation only.
//! No domain orchestration; the route table dispatches to builder and
//! verifier.

mod output;
mod parse;
mod route;

pub use output::{format_report, map_error, prompt_command, BANNER};
pub use parse::{Cli, Commands};
pub use route::RunContext;
