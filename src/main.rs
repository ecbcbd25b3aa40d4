//! Scriptorium CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use scriptorium::cli::{report_error, Cli, CommandDispatcher};
use scriptorium::config::ConfigPaths;
use scriptorium::shell::is_ci;
use scriptorium::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("scriptorium=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scriptorium=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Scriptorium starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = create_ui(!is_ci(), output_mode);

    let paths = match ConfigPaths::resolve(cli.config.as_deref()) {
        Ok(paths) => paths,
        Err(e) => return ExitCode::from(report_error(ui.as_mut(), &e) as u8),
    };

    let dispatcher = CommandDispatcher::new(paths);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => ExitCode::from(report_error(ui.as_mut(), &e) as u8),
    }
}
