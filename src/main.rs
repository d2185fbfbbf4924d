//! trie-router CLI
//!
//! Compiles a route table described in TOML and inspects it.
//!
//! ```text
//! trie-router check --config routes.toml
//! trie-router tree  --config routes.toml
//! trie-router match --config routes.toml GET /api/user/42
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use trie_router::config::load_config;
use trie_router::lifecycle::{build_table, StartupError};
use trie_router::observability::init_logging;

#[derive(Parser)]
#[command(name = "trie-router")]
#[command(about = "Compile and inspect HTTP route tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, validate and compile a route table
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the compiled prefix trees
    Tree {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Match a request against the table and print the result as JSON
    Match {
        #[arg(short, long)]
        config: PathBuf,
        method: String,
        path: String,
    },
}

impl Commands {
    fn config(&self) -> &PathBuf {
        match self {
            Commands::Check { config } | Commands::Tree { config } | Commands::Match { config, .. } => config,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Commands) -> Result<ExitCode, StartupError> {
    let config = load_config(command.config())?;
    if let Err(e) = init_logging(config.router.env, config.observability.log_level.as_deref()) {
        eprintln!("Warning: logging not initialized: {e}");
    }
    let table = build_table(&config)?;

    match command {
        Commands::Check { .. } => {
            let methods: Vec<&str> = table.methods().collect();
            println!(
                "ok: env={} middleware={} routes={} methods=[{}]",
                config.router.env,
                config.middleware.len(),
                config.routes.len(),
                methods.join(", ")
            );
        }
        Commands::Tree { .. } => {
            print!("{table}");
        }
        Commands::Match { method, path, .. } => match table.match_route(method, path) {
            Some(found) => match serde_json::to_string_pretty(&found) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => {
                    eprintln!("Error: cannot render match: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            },
            None => {
                let allowed = table.allowed(path);
                if allowed.is_empty() {
                    eprintln!("404 not found: {method} {path}");
                } else {
                    eprintln!("405 method not allowed: {method} {path} (allowed: {})", allowed.join(", "));
                }
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
