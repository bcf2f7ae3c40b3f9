pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Catalog CLI - Migrations, tokens and product calls against a running Catalog API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply database migrations using DATABASE_URL")]
    Migrate,

    #[command(about = "Mint a bearer token for a user with the configured JWT secret")]
    Token {
        #[arg(long, help = "User id the token identifies")]
        user: uuid::Uuid,

        #[arg(long, help = "Hours until expiry (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },

    #[command(about = "Product operations on a store")]
    Products {
        #[command(flatten)]
        server: client::ServerArgs,

        #[command(subcommand)]
        cmd: commands::products::ProductCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::Token { user, hours } => commands::token::handle(user, hours, output_format),
        Commands::Products { server, cmd } => commands::products::handle(server, cmd, output_format).await,
    }
}
