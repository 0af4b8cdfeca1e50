//! NoteClaw CLI: inspect vault agents from the terminal.
//!
//! Commands:
//! - `init`   : write the default config and an example agent
//! - `agents` : list agent definitions and the documents that failed to load
//! - `check`  : show the permission decision for one operation
//! - `tools`  : list the tools an agent is offered
//! - `run`    : execute one tool call as an agent against the vault

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "noteclaw",
    about = "NoteClaw: permission-gated agents for a note vault",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of ~/.noteclaw/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration and an example agent
    Init,

    /// List agent definitions
    Agents,

    /// Show whether an agent may perform an operation
    Check {
        /// Agent name (case-insensitive)
        agent: String,

        /// One of read, write, create, move, delete
        operation: String,

        /// Vault-relative path; omit to check the capability only
        path: Option<String>,
    },

    /// List the tools an agent is offered
    Tools {
        /// Agent name (case-insensitive)
        agent: String,

        /// Print the JSON parameter schema of each tool
        #[arg(long)]
        schema: bool,
    },

    /// Execute a single tool call as an agent
    Run {
        /// Agent name (case-insensitive)
        agent: String,

        /// Tool name, e.g. read_file
        tool: String,

        /// JSON arguments, e.g. '{"path": "Inbox/todo.md"}'
        #[arg(default_value = "{}")]
        args: String,

        /// Answer yes to destructive confirmations
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Init => commands::init::run(config_path)?,
        Commands::Agents => commands::agents::run(config_path)?,
        Commands::Check {
            agent,
            operation,
            path,
        } => commands::check::run(config_path, &agent, &operation, path.as_deref())?,
        Commands::Tools { agent, schema } => commands::tools::run(config_path, &agent, schema)?,
        Commands::Run {
            agent,
            tool,
            args,
            yes,
        } => commands::run::run(config_path, &agent, &tool, &args, yes).await?,
    }

    Ok(())
}
