//! Command execution.
//!
//! The packager has a single command; this module validates arguments,
//! maps failures to exit codes and dispatches to [`package`].

mod package;

use crate::cli::{Args, OutputManager, RuntimeConfig};
use crate::error::Result;

use package::execute_package;

/// Exit code for invalid command line arguments, matching clap's usage errors.
pub const EXIT_INVALID_ARGS: i32 = 2;

/// Execute the packaging command for parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        // Never quiet for validation errors
        let output = OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(EXIT_INVALID_ARGS);
    }

    let config = RuntimeConfig::from(&args);
    match execute_package(&args, &config).await {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            config.error_println(&format!("Packaging failed: {}", e));
            if config.is_verbose() {
                let suggestions = e.recovery_suggestions();
                if !suggestions.is_empty() {
                    config.println("\n💡 Recovery suggestions:");
                    for suggestion in suggestions {
                        config.println(&format!("  • {}", suggestion));
                    }
                }
            }
            Ok(1)
        }
    }
}
