use lenprobe_core::input::InputError;
use lenprobe_core::logging;

mod cli;

use crate::cli::CliCommand;

/// Exit status for a fatal error: 2 for an empty URL set, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<InputError>() {
        Some(InputError::Empty) => 2,
        _ => 1,
    }
}

#[tokio::main]
async fn main() {
    // stdout carries results; logs go to the state file, or stderr if that fails.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("lenprobe error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}
