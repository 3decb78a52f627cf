// CLI module for operations that need direct server access

pub mod bootstrap;
pub mod migrate;

use clap::{Parser, Subcommand};

/// ticketdesk server and administrative commands
#[derive(Parser, Debug)]
#[command(name = "ticketdesk")]
#[command(about = "Role-gated ticket tracking backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run migrations and start the HTTP server (default)
    Serve,

    /// Run database migrations and exit
    Migrate,

    /// Create an admin account with a generated password
    CreateAdmin {
        /// Username for the new admin
        #[arg(long)]
        username: String,
    },
}

impl Cli {
    /// The subcommand to run, `serve` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
