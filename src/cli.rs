//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

/// A line-oriented command shell with plugin commands.
#[derive(Debug, Parser)]
#[command(name = "cmdrepl", version, about)]
pub struct Cli {
    /// Configuration file to read instead of the default location.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to scan for plugin units.
    #[arg(long, value_name = "DIR")]
    pub plugin_dir: Option<PathBuf>,

    /// Directory for log files.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum CliCommand {
    /// Run a single calculation and exit.
    #[command(allow_negative_numbers = true)]
    Calc {
        /// First operand.
        #[arg(allow_hyphen_values = true)]
        number_one: String,
        /// Second operand.
        #[arg(allow_hyphen_values = true)]
        number_two: String,
        /// One of add, subtract, multiply, divide.
        operation: String,
    },
}

impl Cli {
    /// Apply flags on top of file and environment settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.plugin_dir {
            settings.plugin_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.log_dir {
            settings.log_dir = Some(dir.clone());
        }
        if self.debug {
            settings.debug = true;
        }
    }
}
