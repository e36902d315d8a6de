//! Command-line interface definitions.
//!
//! Defines the CLI structure for the quizstore application using `clap`:
//! raw key access, change watching, the quiz collections, and configuration
//! management.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "quizstore.toml";

/// Quiz admin persistence CLI with remote and local storage
#[derive(Parser, Debug)]
#[command(name = "quizstore")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults apply when it does not exist)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the quizstore CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value stored under a key
    Get(KeyArgs),

    /// Store a JSON value under a key
    Set(SetArgs),

    /// Remove a key
    Remove(KeyArgs),

    /// Report whether a key holds a value
    Exists(KeyArgs),

    /// Print every change to a key until interrupted
    Watch(KeyArgs),

    /// Manage class names
    #[command(subcommand)]
    Classes(ClassesCommand),

    /// Manage quiz topics
    #[command(subcommand)]
    Topics(TopicsCommand),

    /// Manage the question bank
    #[command(subcommand)]
    Questions(QuestionsCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// A storage key.
///
/// `questions`, `topics` and `classes` are accepted as aliases for the
/// collection keys.
#[derive(Args, Debug)]
pub struct KeyArgs {
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    pub key: String,
    /// JSON text to store
    pub value: String,
}

/// Subcommands for `quizstore classes`.
#[derive(Subcommand, Debug)]
pub enum ClassesCommand {
    /// List class names.
    List,
    /// Add a class.
    Add { name: String },
    /// Remove a class.
    Remove { name: String },
}

/// Subcommands for `quizstore topics`.
#[derive(Subcommand, Debug)]
pub enum TopicsCommand {
    /// List topics, seeding the defaults on first use.
    List,
    /// Add a topic.
    Add {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
}

/// Subcommands for `quizstore questions`.
#[derive(Subcommand, Debug)]
pub enum QuestionsCommand {
    /// List questions with their index.
    List,
    /// Delete the question at an index.
    Delete { index: usize },
    /// Order questions by topic.
    Sort,
    /// Replace all questions with the built-in bank.
    Reset,
    /// Remove all questions.
    Clear,
    /// Export questions as JSON.
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all questions with those in a JSON file.
    Import { file: PathBuf },
}

/// Subcommands for `quizstore config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("quizstore").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn config_path_defaults() {
        let cli = parse(&["get", "mathMillionaireClasses"]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.json);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = parse(&["classes", "list", "--json", "-c", "other.toml"]);
        assert!(cli.json);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(
            cli.command,
            Commands::Classes(ClassesCommand::List)
        ));
    }

    #[test]
    fn set_takes_key_and_value() {
        let cli = parse(&["set", "k", r#"{"a":1}"#]);
        match cli.command {
            Commands::Set(args) => {
                assert_eq!(args.key, "k");
                assert_eq!(args.value, r#"{"a":1}"#);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn topic_description_is_optional() {
        let cli = parse(&["topics", "add", "Trigonometry"]);
        assert!(matches!(
            cli.command,
            Commands::Topics(TopicsCommand::Add { ref description, .. }) if description.is_empty()
        ));
    }

    #[test]
    fn question_index_must_be_numeric() {
        let result = Cli::try_parse_from(["quizstore", "questions", "delete", "first"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_counts() {
        let cli = parse(&["-vv", "config", "show"]);
        assert_eq!(cli.verbose, 2);
    }
}
