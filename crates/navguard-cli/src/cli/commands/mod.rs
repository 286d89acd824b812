//! CLI command handlers, one file per command.

mod classify;
mod completions;
mod config;
mod goto;

pub use classify::run_classify;
pub use completions::{run_completions, run_manpage};
pub use config::run_config;
pub use goto::{run_goto, GotoArgs};
