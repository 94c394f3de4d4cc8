use anyhow::Context;
use cas_bot::{config::{require_token, TOKEN_VAR}, transport, EngineConfig, MathBot};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};
use tracing::error;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Parser)]
#[command(name = "cas-bot", version, about)]
struct Cli {
    /// The Telegram bot token.
    #[arg(long, env = TOKEN_VAR, hide_env_values = true, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Connect to Telegram and answer messages (the default).
    Run,

    /// Answer lines typed into the console instead of Telegram messages.
    Repl {
        /// Write graphs into this directory.
        #[arg(long)]
        save_images: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let engine = MathBot::new(EngineConfig::default());

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let token = require_token(cli.token).inspect_err(|_| error!("{TOKEN_VAR} not set!"))?;
            transport::telegram::run(Arc::new(engine), token).await;
        },
        Command::Repl { save_images } => {
            transport::console::run(&engine, save_images).context("console session failed")?;
        },
    }

    Ok(())
}
