//! Command line interface for olca_packager.
//!
//! Parses arguments, sets up logging and turns a packaging report into
//! console output and an exit code.

mod args;
pub mod commands;
mod output;

pub use args::{Args, RuntimeConfig};
pub use commands::{EXIT_INVALID_ARGS, execute_command};
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(&args);
    execute_command(args).await
}

/// Initializes `env_logger` with a default filter derived from `args`.
///
/// `RUST_LOG` overrides the default. Calling this twice is harmless.
pub fn init_logging(args: &Args) {
    let env = env_logger::Env::default().default_filter_or(args.log_filter());
    let _ = env_logger::Builder::from_env(env).try_init();
}
