//! schemer: migration scripts to SQL DDL
//!
//! # Usage
//!
//! ```bash
//! # Translate a script for PostgreSQL
//! schemer migrations/001_users.mig --dialect postgres
//!
//! # Read from stdin, write to a file
//! cat 001_users.mig | schemer - -d mysql -o schema.sql
//!
//! # Show what a script does without translating it
//! schemer explain migrations/001_users.mig --format json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use schemer::config::Config;
use schemer::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemer")]
#[command(version)]
#[command(about = "Translate migration scripts into dialect-specific SQL DDL", long_about = None)]
#[command(after_help = "EXAMPLES:
    schemer 001_create_users.mig --dialect postgres
    cat 001_create_users.mig | schemer - -d sqlite
    schemer explain 001_create_users.mig --format json")]
struct Cli {
    /// Migration script path, '-' for stdin
    script: Option<PathBuf>,

    /// Target dialect: postgres, mysql or sqlite
    #[arg(short, long, env = "SCHEMER_DIALECT")]
    dialect: Option<String>,

    /// Write DDL to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (default: ./schemer.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExplainFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a script and list its operations
    Explain {
        /// Migration script path, '-' for stdin
        script: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: ExplainFormat,
    },
    /// List supported dialects
    Dialects,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, config.log_level.as_deref())?;

    match &cli.command {
        Some(Commands::Explain { script, format }) => explain(script, *format),
        Some(Commands::Dialects) => {
            show_dialects();
            Ok(())
        }
        None => match &cli.script {
            Some(script) => translate(script, cli, &config),
            None => {
                println!("{}", "schemer: migration scripts to SQL DDL".cyan().bold());
                println!();
                println!("Usage: schemer <SCRIPT> --dialect <DIALECT>");
                println!();
                println!("Try: schemer --help");
                Ok(())
            }
        },
    }
}

/// `-v` wins, then `RUST_LOG`, then the config `log_level`, then warnings only.
fn init_tracing(verbose: bool, config_level: Option<&str>) -> Result<()> {
    let filter = if verbose {
        EnvFilter::try_new("schemer=debug")?
    } else if let Ok(filter) = EnvFilter::try_from_default_env() {
        filter
    } else if let Some(level) = config_level {
        EnvFilter::try_new(level).with_context(|| format!("invalid log_level '{}'", level))?
    } else {
        EnvFilter::try_new("schemer=warn")?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("cannot read script from stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn translate(script: &Path, cli: &Cli, config: &Config) -> Result<()> {
    let dialect = config.resolve_dialect(cli.dialect.as_deref())?;
    let source = read_script(script)?;
    tracing::debug!(%dialect, script = %script.display(), "translating");

    let translator = dialect.translator();
    let sql = match schemer::engine::run(&source, translator.as_ref()) {
        Ok(sql) => sql,
        Err(partial) => {
            if !partial.sql.is_empty() {
                eprintln!("{}", "Partial DDL:".yellow().bold());
                eprintln!("{}", partial.sql);
            }
            return Err(partial.error.into());
        }
    };

    match cli.output.as_ref().or(config.output.as_ref()) {
        Some(path) => {
            std::fs::write(path, format!("{}\n", sql))
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!(
                "{} Wrote {} DDL to {}",
                "✓".green(),
                dialect,
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", sql),
    }
    Ok(())
}

fn explain(script: &Path, format: ExplainFormat) -> Result<()> {
    let source = read_script(script)?;
    let operations = evaluate_str(&source)?;

    match format {
        ExplainFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&operations)?);
        }
        ExplainFormat::Text => {
            if operations.is_empty() {
                println!("{}", "(no operations)".dimmed());
                return Ok(());
            }
            println!("{}", "Operations:".green().bold());
            for (i, op) in operations.iter().enumerate() {
                println!("  {}. {}", i + 1, op.summary().white());
                if let Operation::CreateTable(table) = op {
                    for column in &table.columns {
                        println!("       • {}", describe_column(column).dimmed());
                    }
                }
            }
        }
    }
    Ok(())
}

fn describe_column(column: &Column) -> String {
    let mut text = format!("{} {}", column.name, column.col_type);
    if let Some(size) = column.size {
        text.push_str(&format!("({})", size));
    }
    if column.primary {
        text.push_str(" primary");
    } else if column.nullable {
        text.push_str(" null");
    }
    if let Some(default) = &column.default {
        text.push_str(&format!(" default {}", default));
    }
    text
}

fn show_dialects() {
    println!("{}", "Supported dialects".cyan().bold());
    println!();
    for dialect in Dialect::ALL {
        let notes = match dialect {
            Dialect::Postgres => "full support",
            Dialect::MySQL => "no drop_index/rename_index; no literal defaults on text, blob or json",
            Dialect::SQLite => "no rename_index; add_column NOT NULL needs a default",
        };
        println!("  {:10} {}", dialect.name().yellow().bold(), notes.dimmed());
    }
}

