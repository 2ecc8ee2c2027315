use ogx_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible; an unusable state dir must not stop the run.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::debug!("file logging unavailable: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = cli::run_from_args() {
        eprintln!("ogx: {:#}", err);
        std::process::exit(1);
    }
}
