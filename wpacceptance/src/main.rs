use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use wpacceptance::core::assertion::{PageSourceContains, Polarity};
use wpacceptance::exit_codes;
use wpacceptance::io::config::{ConfigError, ConfigStore};
use wpacceptance::io::page_source::{AssertionError, SavedPage, assert_page_source};
use wpacceptance::logging::{self, Log, TracingLog};

#[derive(Parser)]
#[command(
    name = "wpacceptance",
    version,
    about = "Suite config and page-source checks for WordPress acceptance tests"
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read or edit `wpacceptance.json`.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Assert that a saved page source contains NEEDLE.
    See(CheckArgs),
    /// Assert that a saved page source does not contain NEEDLE.
    DontSee(CheckArgs),
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved config as JSON.
    Show(SuiteArgs),
    /// Print one config value.
    Get {
        key: String,
        #[command(flatten)]
        suite: SuiteArgs,
    },
    /// Set a value (parsed as JSON, else taken as a string) and write.
    Set {
        key: String,
        value: String,
        #[command(flatten)]
        suite: SuiteArgs,
    },
    /// Remove a value from memory and write; keys on disk are kept.
    Unset {
        key: String,
        #[command(flatten)]
        suite: SuiteArgs,
    },
}

#[derive(Args)]
struct SuiteArgs {
    /// Suite directory or `wpacceptance.json` path (defaults to cwd).
    #[arg(long)]
    path: Option<PathBuf>,
}

#[derive(Args)]
struct CheckArgs {
    /// Text or delimited pattern (e.g. `/hello/i`) to look for.
    needle: String,
    /// Saved page source to check.
    #[arg(long)]
    source: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let log: Arc<dyn Log> = Arc::new(TracingLog::new(cli.verbose));

    let code = match run(cli.command, log) {
        Ok(code) => code,
        Err(err) => {
            // Config failures have already been reported through the log.
            if err.downcast_ref::<ConfigError>().is_none() {
                eprintln!("{err:#}");
            }
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run(command: Command, log: Arc<dyn Log>) -> Result<i32> {
    match command {
        Command::Config { action } => cmd_config(action, log),
        Command::See(args) => cmd_check(Polarity::See, args, log),
        Command::DontSee(args) => cmd_check(Polarity::DontSee, args, log),
    }
}

fn cmd_config(action: ConfigAction, log: Arc<dyn Log>) -> Result<i32> {
    match action {
        ConfigAction::Show(suite) => {
            let store = load(suite.path.as_deref(), log)?;
            print_json(&Value::Object(store.to_map()))?;
        }
        ConfigAction::Get { key, suite } => {
            let store = load(suite.path.as_deref(), log)?;
            let Some(value) = store.get(&key) else {
                eprintln!("`{key}` not set");
                return Ok(exit_codes::INVALID);
            };
            match value {
                Value::String(text) => println!("{text}"),
                other => print_json(other)?,
            }
        }
        ConfigAction::Set { key, value, suite } => {
            let mut store = load(suite.path.as_deref(), log)?;
            store.set(key, parse_value(&value));
            store.write().context("write wpacceptance.json")?;
        }
        ConfigAction::Unset { key, suite } => {
            let mut store = load(suite.path.as_deref(), log)?;
            store.delete(&key);
            store.write().context("write wpacceptance.json")?;
        }
    }
    Ok(exit_codes::OK)
}

fn cmd_check(polarity: Polarity, args: CheckArgs, log: Arc<dyn Log>) -> Result<i32> {
    let constraint = PageSourceContains::new(polarity, args.needle, log);
    match assert_page_source(&SavedPage::new(args.source), &constraint) {
        Ok(()) => Ok(exit_codes::OK),
        Err(AssertionError::Failed { message }) => {
            eprintln!("{message}");
            Ok(exit_codes::ASSERTION_FAILED)
        }
        Err(err) => Err(anyhow::Error::new(err).context("page source check")),
    }
}

fn load(path: Option<&Path>, log: Arc<dyn Log>) -> Result<ConfigStore> {
    ConfigStore::load(path, log).context("load wpacceptance.json")
}

/// Interpret a CLI value as JSON when it parses, otherwise as a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{rendered}");
    Ok(())
}
