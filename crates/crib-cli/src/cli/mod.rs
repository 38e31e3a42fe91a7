//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use crib_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "crib")]
#[command(version)]
#[command(about = "Sign in and verify your account from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Enter the emailed one-time code for an account
    Verify {
        /// Account id the code was issued for (defaults to the staged user)
        #[arg(long, value_name = "ID", requires = "email")]
        user_id: Option<String>,

        /// Email the code was sent to (defaults to the staged user)
        #[arg(long, requires = "user_id")]
        email: Option<String>,
    },

    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long, env = "CRIB_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Remove stored credentials
    Logout,

    /// Record a signed-up user awaiting verification
    Stage {
        #[arg(long, value_name = "ID")]
        user_id: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        name: Option<String>,
    },

    /// Show the stored credentials
    Whoami,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write a commented default config file
    Init,
    /// Set the backend base URL
    SetBaseUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // Logging is best effort; the guard flushes the file writer on exit.
    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    match cli.command {
        Commands::Verify { user_id, email } => {
            commands::session::verify(&config, user_id, email).await
        }
        Commands::Login { email, password } => {
            commands::auth::login(&config, &email, password).await
        }
        Commands::Logout => commands::auth::logout(),
        Commands::Stage {
            user_id,
            email,
            name,
        } => commands::session::stage(&user_id, &email, name),
        Commands::Whoami => commands::session::whoami(),

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetBaseUrl { url } => commands::config::set_base_url(&url),
        },
    }
}
