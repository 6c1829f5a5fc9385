//! cmdrepl - a line-oriented command shell with plugin commands.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use cmdrepl::app::App;
use cmdrepl::calculator;
use cmdrepl::cli::{Cli, CliCommand};
use cmdrepl::config::{self, Settings};
use cmdrepl::error::AppError;
use cmdrepl::logging;
use cmdrepl::repl::SessionEnd;

/// Exit status used when a command ends the session.
const TERMINATED_EXIT_CODE: u8 = 1;

/// Exit status used when the session fails on its input or output.
const SESSION_ERROR_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(CliCommand::Calc {
        number_one,
        number_two,
        operation,
    }) = &cli.command
    {
        println!(
            "{}",
            calculator::calculate_and_format(number_one, number_two, operation)
        );
        return ExitCode::SUCCESS;
    }

    let settings = load_settings(&cli);

    if let Err(e) = logging::init(
        settings.log_dir.as_deref(),
        settings.debug,
        &settings.environment,
    ) {
        eprintln!("warning: logging disabled: {:#}", e);
    }

    let app = App::new(settings);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = app.run(&mut stdin.lock(), &mut stdout.lock());
    logging::shutdown();

    ExitCode::from(exit_status(result))
}

/// Report how the session ended and pick the process exit status.
fn exit_status(result: Result<SessionEnd, AppError>) -> u8 {
    match result {
        Ok(SessionEnd::Terminated { message }) => {
            eprintln!("{}", message);
            TERMINATED_EXIT_CODE
        }
        Ok(SessionEnd::EndOfInput) => 0,
        Err(e) => {
            tracing::error!(error = %e, "Session failed");
            eprintln!("Error: {}", e.user_message());
            SESSION_ERROR_EXIT_CODE
        }
    }
}

/// Build settings from the config file, the environment and the flags.
fn load_settings(cli: &Cli) -> Settings {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => config::default_config_path().ok(),
    };

    let mut settings = match path {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            eprintln!(
                "warning: {} Using default settings.",
                AppError::from(e).user_message()
            );
            Settings::default()
        }),
        None => Settings::default(),
    };

    if let Err(e) = settings.apply_process_env() {
        eprintln!("warning: {}", AppError::from(e).user_message());
    }

    cli.apply(&mut settings);
    settings
}
