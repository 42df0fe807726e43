//! CLI argument parsing and headless commands.

mod args;
mod headless;
mod prompts;

pub use args::{Cli, Command, VERSION};
pub use headless::{run_export, run_list};
