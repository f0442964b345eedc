//! pixchat CLI: interactive chat with image generation, balance management,
//! and session cleanup. Config from env (.env supported) and CLI args.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use asset_store::LocalDirAssetStore;
use chat_handlers::{ChatHandler, ChatHandlerConfig, ImageHandler, SessionManager};
use credit_ledger::{CreditLedger, SqliteCreditLedger};
use image_generation_client::ImageGenerationClient;
use llm_client::{EnvLlmConfig, LlmConfig, OpenAILlmClient};
use message_store::SqliteMessageStore;

#[derive(Parser)]
#[command(name = "pixchat")]
#[command(about = "Chat with an image-generating assistant: chat, balance, topup, delete-session", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive chat session. Lines starting with "/image " are
    /// image generation requests; "exit" quits.
    Chat {
        #[arg(short, long)]
        user: String,
        /// Session to continue; a fresh one is created when omitted.
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Show a user's credit balance.
    Balance {
        #[arg(short, long)]
        user: String,
    },
    /// Add credits to a user's balance.
    Topup {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        amount: i64,
    },
    /// Delete a session's turns and generated images.
    DeleteSession {
        #[arg(short, long)]
        session: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    pixchat_core::logger::init_tracing(
        &std::env::var("LOG_FILE").unwrap_or_else(|_| "pixchat.log".to_string()),
    )?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { user, session } => handle_chat(user, session).await,
        Commands::Balance { user } => handle_balance(user).await,
        Commands::Topup { user, amount } => handle_topup(user, amount).await,
        Commands::DeleteSession { session } => handle_delete_session(session).await,
    }
}

fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "pixchat.db".to_string())
}

fn assets_root() -> String {
    std::env::var("ASSETS_DIR").unwrap_or_else(|_| "generated-images".to_string())
}

async fn open_ledger() -> Result<SqliteCreditLedger> {
    SqliteCreditLedger::new(&database_path())
        .await
        .context("Failed to open credit ledger database")
}

async fn handle_chat(user: String, session: Option<String>) -> Result<()> {
    let llm_config = EnvLlmConfig::from_env()?;
    let handler_config = ChatHandlerConfig::from_env();

    let store = Arc::new(
        SqliteMessageStore::new(&database_path())
            .await
            .context("Failed to open message store database")?,
    );
    let ledger = Arc::new(open_ledger().await?);
    let assets = Arc::new(LocalDirAssetStore::new(assets_root()));

    let llm = Arc::new(OpenAILlmClient::from_config(&llm_config));
    let images = Arc::new(
        ImageGenerationClient::with_base_url(
            llm_config.api_key().to_string(),
            llm_config.base_url().to_string(),
        )
        .with_model(
            std::env::var("IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".to_string()),
        ),
    );

    let chat = ChatHandler::new(llm, store.clone(), ledger.clone(), handler_config.clone());
    let image = ImageHandler::new(images, store, ledger, assets, handler_config);

    let session_id = session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    info!(user = %user, session_id = %session_id, "Starting interactive chat");
    println!("Session {session_id} ready. Type a message, \"/image <prompt>\" to generate, \"exit\" to quit.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        if let Some(prompt) = line.strip_prefix("/image ") {
            match image.handle_generate(&user, &session_id, prompt).await {
                Ok(reply) => println!("[image] {}", reply.url),
                Err(e) => eprintln!("Image generation failed: {e}"),
            }
        } else {
            match chat.handle_chat(&user, &session_id, line).await {
                Ok(reply) => println!("{reply}"),
                Err(e) => eprintln!("Chat failed: {e}"),
            }
        }
    }

    Ok(())
}

async fn handle_balance(user: String) -> Result<()> {
    let ledger = open_ledger().await?;
    let balance = ledger.balance(&user).await?;
    println!("{user}: {balance} credits");
    Ok(())
}

async fn handle_topup(user: String, amount: i64) -> Result<()> {
    let ledger = open_ledger().await?;
    let balance = ledger.credit(&user, amount).await?;
    println!("{user}: {balance} credits");
    Ok(())
}

async fn handle_delete_session(session: String) -> Result<()> {
    let store = Arc::new(
        SqliteMessageStore::new(&database_path())
            .await
            .context("Failed to open message store database")?,
    );
    let assets = Arc::new(LocalDirAssetStore::new(assets_root()));

    let sessions = SessionManager::new(store, assets);
    let (turns, images) = sessions.delete_session(&session).await?;
    println!("Deleted session {session}: {turns} turns, {images} images");
    Ok(())
}
