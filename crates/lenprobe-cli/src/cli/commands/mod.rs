//! CLI command handlers, one file per command.

mod config;
mod head;
mod probe;

pub use config::run_config;
pub use head::run_head;
pub use probe::run_probe;
