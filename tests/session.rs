//! End-to-end sessions against the shipped plugin directory.

use std::io::Cursor;
use std::path::PathBuf;

use cmdrepl::app::App;
use cmdrepl::config::Settings;
use cmdrepl::repl::SessionEnd;

fn shipped_plugins() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("plugins")
}

fn new_app() -> App {
    App::new(Settings {
        plugin_dir: Some(shipped_plugins()),
        ..Settings::default()
    })
}

fn run_app(app: &App, lines: &[&str]) -> (SessionEnd, String) {
    let mut input = Cursor::new(lines.join("\n") + "\n");
    let mut output = Vec::new();
    let end = app.run(&mut input, &mut output).unwrap();
    (end, String::from_utf8(output).unwrap())
}

fn run_lines(lines: &[&str]) -> (SessionEnd, String) {
    run_app(&new_app(), lines)
}

fn exited() -> SessionEnd {
    SessionEnd::Terminated {
        message: "Exiting...".to_string(),
    }
}

#[test]
fn test_exit_command() {
    let (end, out) = run_lines(&["exit"]);
    assert_eq!(end, exited());
    assert!(out.starts_with("Type 'exit' to exit.\n>>> "));
}

#[test]
fn test_unknown_command() {
    let (end, out) = run_lines(&["unknown_command", "exit"]);
    assert_eq!(end, exited());
    assert!(out.contains(
        "Command 'unknown_command' not found. Type 'menu' to see available commands.\n"
    ));
}

#[test]
fn test_menu_command() {
    let (_, out) = run_lines(&["menu", "exit"]);
    assert!(out.contains(
        "Available commands:\n - menu\n - calculator\n - exit\n - goodbye\n - greet\n"
    ));
}

#[test]
fn test_greet_command() {
    let (end, out) = run_lines(&["greet", "exit"]);
    assert_eq!(end, exited());
    assert!(out.contains("Hello, World!\n"));
}

#[test]
fn test_goodbye_command() {
    let (_, out) = run_lines(&["goodbye", "exit"]);
    assert!(out.contains("Goodbye\n"));
}

#[test]
fn test_commands_ignore_extra_arguments() {
    let (_, out) = run_lines(&["greet everyone loudly", "exit"]);
    assert!(out.contains("Hello, World!\n"));
}

#[test]
fn test_calculator_addition() {
    let (_, out) = run_lines(&["calculator", "add", "5", "10", "exit"]);
    assert!(out.contains("The result of 5 add 10 is: 15\n"));
}

#[test]
fn test_calculator_subtraction() {
    let (_, out) = run_lines(&["calculator", "subtract", "20", "5", "exit"]);
    assert!(out.contains("The result of 20 subtract 5 is: 15\n"));
}

#[test]
fn test_calculator_multiplication() {
    let (_, out) = run_lines(&["calculator", "multiply", "3", "4", "exit"]);
    assert!(out.contains("The result of 3 multiply 4 is: 12\n"));
}

#[test]
fn test_calculator_division() {
    let (_, out) = run_lines(&["calculator", "divide", "10", "2", "exit"]);
    assert!(out.contains("The result of 10 divide 2 is: 5\n"));
}

#[test]
fn test_calculator_division_by_zero() {
    let (end, out) = run_lines(&["calculator", "divide", "10", "0", "greet", "exit"]);
    assert!(out.contains("Error: Division by zero is not allowed.\n"));
    assert!(out.contains("Hello, World!\n"));
    assert_eq!(end, exited());
}

#[test]
fn test_calculator_invalid_operation_returns_to_main_loop() {
    let (end, out) = run_lines(&["calculator", "modulo", "exit"]);
    assert!(out.contains("Error: 'modulo' is not a valid operation. Exiting to main menu.\n"));
    // "exit" was read by the main loop, not by the calculator.
    assert!(!out.contains("Returning to main menu..."));
    assert_eq!(end, exited());
}

#[test]
fn test_calculator_exit_returns_to_main_loop() {
    let (end, out) = run_lines(&["calculator", "exit", "greet", "exit"]);
    assert!(out.contains("Returning to main menu...\n"));
    assert!(out.contains("Hello, World!\n"));
    assert_eq!(end, exited());
}

#[test]
fn test_calculator_history_across_invocations() {
    let app = new_app();
    let (_, out) = run_app(
        &app,
        &[
            "calculator", "add", "1", "2", "calculator", "multiply", "3", "4", "calculator",
            "history", "exit",
        ],
    );

    assert!(out.contains("\nCalculation History:\n1 add 2 = 3\n3 multiply 4 = 12\n"));

    let history = app.history().borrow();
    assert_eq!(history.len(), 2);
    assert_eq!(history.get_last().unwrap().result().unwrap().to_string(), "12");
}

#[test]
fn test_calculator_clear_history() {
    let app = new_app();
    let (_, out) = run_app(
        &app,
        &[
            "calculator",
            "add",
            "1",
            "2",
            "calculator",
            "clear_history",
            "calculator",
            "clear_history",
            "calculator",
            "history",
            "exit",
        ],
    );

    assert_eq!(out.matches("Calculation history cleared.\n").count(), 2);
    assert!(out.contains("No calculations in history.\n"));
    assert!(app.history().borrow().get_all().is_empty());
}

#[test]
fn test_end_of_input_without_exit() {
    let (end, out) = run_lines(&["greet"]);
    assert_eq!(end, SessionEnd::EndOfInput);
    assert!(out.contains("Hello, World!\n"));
}

#[test]
fn test_shipped_plugins_load_cleanly() {
    let app = new_app();
    assert!(app.load_report().is_clean());
    assert_eq!(app.load_report().skipped, vec!["menu"]);
    assert_eq!(
        app.registry().list_names(),
        vec!["menu", "calculator", "exit", "goodbye", "greet"]
    );
}
