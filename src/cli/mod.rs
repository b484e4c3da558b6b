// CLI module for operations run outside the HTTP server

pub mod admin;
pub mod migrate;

use clap::{Parser, Subcommand};

/// Reservation backend CLI
#[derive(Parser)]
#[command(name = "booking-backend")]
#[command(about = "Reservation platform backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run migrations and start the HTTP server
    Serve,

    /// Run database migrations only
    Migrate,

    /// Register an administrator account
    CreateAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: Option<String>,
    },
}
