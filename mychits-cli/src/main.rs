//! MyChits CLI - chit funds in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{enrolled, format, groups, login, register, status};
use mychits_core::logging::{LogFormat, LoggingConfig};

/// MyChits - chit funds in your terminal
#[derive(Parser)]
#[command(name = "mychits", version, about, long_about = None)]
struct Cli {
    /// Log output format (text, json, pretty)
    #[arg(long, global = true, default_value = "text", env = "MYCHITS_LOG_FORMAT")]
    log_format: LogFormat,

    /// Minimum log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", env = "MYCHITS_LOG_LEVEL")]
    log_level: String,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// User id of an existing session
    #[arg(long, global = true, env = "MYCHITS_USER_ID")]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with phone number and password
    Login {
        /// 10-digit mobile number
        #[arg(long)]
        phone: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new account
    Register {
        /// Full name
        #[arg(long)]
        name: Option<String>,
        /// 10-digit mobile number
        #[arg(long)]
        phone: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List chit groups open for enrollment
    Groups {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List groups you are enrolled in, with amount paid
    Enrolled {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show connectivity and session status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Format amounts and dates
    Format {
        #[command(subcommand)]
        command: format::FormatCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    LoggingConfig::new(cli.log_format, cli.log_level.clone(), cli.verbose).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.downcast_ref::<output::Reported>().is_none() {
                match e.downcast_ref::<mychits_core::Error>() {
                    Some(err) => output::notice(&err.notice()),
                    None => output::error(&format!("{:#}", e)),
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let user = cli.user.as_deref();
    match cli.command {
        Commands::Login {
            phone,
            password,
            json,
        } => login::run(phone, password, json),
        Commands::Register {
            name,
            phone,
            password,
            json,
        } => register::run(name, phone, password, json),
        Commands::Groups { json } => groups::run(user, json),
        Commands::Enrolled { json } => enrolled::run(user, json),
        Commands::Status { json } => status::run(user, json),
        Commands::Format { command } => format::run(command),
    }
}
