//! Main entry point for the Ollama translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ollama_translator::cli::commands::{self, Commands};
use ollama_translator::{ClientConfig, TranslationClient};

/// Ollama translator - conversational translation through a local model
#[derive(Parser, Debug)]
#[command(name = "ollama-translator", version, about, long_about = None)]
struct Args {
    /// Ollama address (defaults to OLLAMA_BASE_URL or http://127.0.0.1:11434)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model name (defaults to OLLAMA_MODEL)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Request timeout in seconds (defaults to OLLAMA_TIMEOUT_SECS or 300)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ollama_translator={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // CLI flags win over the environment
    let env_config = ClientConfig::from_env()?;
    let config = ClientConfig::new(
        Some(args.base_url.unwrap_or(env_config.base_url)),
        Some(args.model.unwrap_or(env_config.model)),
        Some(args.timeout.unwrap_or(env_config.timeout_secs)),
    );
    let client = TranslationClient::new(config)?;

    match args.command {
        Some(Commands::Translate {
            text,
            target_lang,
            context,
            options,
        }) => {
            commands::handle_translate(&client, text, target_lang, context, options).await?;
        }
        Some(Commands::Chat {
            target_lang,
            context,
        }) => {
            commands::handle_chat(&client, target_lang, context).await?;
        }
        Some(Commands::Models) => {
            commands::handle_models(&client).await?;
        }
        Some(Commands::Health) => {
            commands::handle_health(&client).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
