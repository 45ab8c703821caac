use fontsnap_core::engine::EngineError;
use fontsnap_core::logging;

mod cli;

use crate::cli::CliCommand;

/// Conventional exit status for a run stopped by SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        let interrupted = err
            .downcast_ref::<EngineError>()
            .is_some_and(EngineError::is_interrupted);
        if interrupted {
            eprintln!("fontsnap: interrupted");
            std::process::exit(EXIT_INTERRUPTED);
        }
        eprintln!("fontsnap error: {:#}", err);
        std::process::exit(1);
    }
}
