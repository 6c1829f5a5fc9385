//! cmdrepl - a line-oriented command shell with plugin commands.
//!
//! Commands are discovered at startup from plugin units on disk and
//! registered by name; the loop reads a line, looks the first word up and
//! runs the command with the remaining words as arguments.

pub mod app;
pub mod calculator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod plugins;
pub mod repl;
