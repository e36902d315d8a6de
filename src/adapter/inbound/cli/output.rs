//! Terminal output for the quizstore CLI.
//!
//! Three modes, picked once from the global flags:
//!
//! - human: colored, indented lines on stdout
//! - `--quiet`: only what a command exists to produce (stored values,
//!   `exists` answers, change events, exported documents)
//! - `--json`: one JSON object per command on stdout, tagged with a
//!   `command` field, and one per event while watching
//!
//! Warnings and errors always go to stderr.

use std::fmt::Display;
use std::sync::OnceLock;

use chrono::Local;
use owo_colors::OwoColorize;
use serde_json::{json, Map, Value};

/// Output flags taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }

    fn mode(self) -> Mode {
        if self.json {
            Mode::Json
        } else if self.quiet {
            Mode::Quiet
        } else {
            Mode::Human
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Human,
    Quiet,
    Json,
}

static SETTINGS: OnceLock<OutputConfig> = OnceLock::new();

/// Install the output flags. Only the first call takes effect.
pub fn configure(config: OutputConfig) {
    let _ = SETTINGS.set(config);
}

fn settings() -> OutputConfig {
    SETTINGS.get().copied().unwrap_or_default()
}

fn mode() -> Mode {
    settings().mode()
}

/// Run `print` in human mode only.
fn decorate(print: impl FnOnce()) {
    if mode() == Mode::Human {
        print();
    }
}

#[must_use]
pub fn is_json() -> bool {
    mode() == Mode::Json
}

#[must_use]
pub fn verbosity() -> u8 {
    settings().verbose
}

/// Print a command result as one JSON object with its `command` tag.
///
/// Non-object payloads are wrapped under `result`.
pub fn json(command: &str, payload: Value) {
    let mut object = match payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("result".to_string(), other);
            map
        }
    };
    object.insert("command".to_string(), Value::String(command.to_string()));
    println!("{}", Value::Object(object));
}

/// Print the outcome of a command that changed stored data.
///
/// JSON mode prints `payload`; human mode prints `message` with a check
/// mark.
pub fn report(command: &str, payload: Value, message: &str) {
    match mode() {
        Mode::Json => json(command, payload),
        Mode::Human => println!("  {} {}", "✓".green(), message),
        Mode::Quiet => {}
    }
}

/// Print the value `get` found under `key`.
///
/// The value is printed as pretty JSON in every non-JSON mode so it can be
/// piped. A missing key only prints a note in human mode.
pub fn value(key: &str, value: Option<&Value>) {
    match (mode(), value) {
        (Mode::Json, _) => json(
            "get",
            json!({ "key": key, "found": value.is_some(), "value": value }),
        ),
        (_, Some(value)) => println!("{value:#}"),
        (Mode::Human, None) => note(&format!("{key} is not set")),
        (Mode::Quiet, None) => {}
    }
}

/// Print the `exists` answer for `key`.
pub fn exists(key: &str, exists: bool) {
    if is_json() {
        json("exists", json!({ "key": key, "exists": exists }));
    } else {
        println!("{exists}");
    }
}

fn describe(value: Option<&Value>) -> String {
    value.map_or_else(|| "(absent)".to_string(), Value::to_string)
}

/// Print one change notification, stamped with the local time.
pub fn change(key: &str, value: Option<&Value>) {
    let now = Local::now();
    if is_json() {
        println!(
            "{}",
            json!({
                "event": "change",
                "key": key,
                "at": now.to_rfc3339(),
                "value": value,
            })
        );
        return;
    }
    println!(
        "  {} {} {}",
        now.format("%H:%M:%S").to_string().dimmed(),
        key.cyan(),
        describe(value)
    );
}

/// Print a document verbatim, whatever the mode.
pub fn document(content: &str) {
    println!("{content}");
}

pub fn header() {
    decorate(|| {
        println!(
            "{} {}",
            "quizstore".bold(),
            env!("CARGO_PKG_VERSION").dimmed()
        );
    });
}

pub fn section(title: &str) {
    decorate(|| {
        println!();
        println!("{}", title.bold());
    });
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    decorate(|| println!("  {:<14} {}", label.dimmed(), value));
}

pub fn success(message: &str) {
    decorate(|| println!("  {} {}", "✓".green(), message));
}

pub fn note(message: &str) {
    decorate(|| println!("  {}", message.dimmed()));
}

pub fn hint(message: &str) {
    decorate(|| println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed()));
}

/// Print a rendered table, indented.
pub fn table(rendered: &str) {
    decorate(|| {
        for line in rendered.lines() {
            println!("  {line}");
        }
    });
}

pub fn warning(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "warning": message }));
    } else {
        eprintln!("  {} {}", "⚠".yellow(), message);
    }
}

pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "error": message }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

/// Color `value` for human output; plain text otherwise.
pub fn highlight(value: impl Display) -> String {
    if mode() == Mode::Human {
        value.to_string().cyan().to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_pick_mode() {
        assert_eq!(OutputConfig::new(false, false, 0).mode(), Mode::Human);
        assert_eq!(OutputConfig::new(false, true, 0).mode(), Mode::Quiet);
        assert_eq!(OutputConfig::new(true, true, 2).mode(), Mode::Json);
    }

    #[test]
    fn absent_values_are_labelled() {
        assert_eq!(describe(None), "(absent)");
        assert_eq!(describe(Some(&json!([1, 2]))), "[1,2]");
    }
}
