//! Currency & Crypto Rates Telegram Bot
//!
//! Scrapes regional exchange rates and crypto prices and reports them
//! over Telegram.

use clap::{Parser, Subcommand};
use rates_bot::{
    config::Config,
    notify::Notifier,
    report, scheduler,
    telegram::TelegramBot,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rates-bot")]
#[command(about = "Telegram bot reporting currency exchange and crypto rates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (command listener + daily schedule)
    Run,
    /// Fetch all sources once and print the report to stdout
    Report,
    /// Test Telegram notification
    TestNotify,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration; a missing bot token is fatal here.
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run => run_bot(config).await,
        Commands::Report => print_report(config).await,
        Commands::TestNotify => test_notify(config).await,
    }
}

async fn run_bot(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting rates bot");

    let http = config.scrape_client()?;
    let notifier = Notifier::new(
        config.telegram.bot_token.clone(),
        config.telegram.chat_id.clone(),
    );

    // Daily scheduled report to the fixed chat.
    {
        let telegram = config.telegram.clone();
        let notifier = notifier.clone();
        let http = http.clone();
        let sources = config.sources.clone();
        tokio::spawn(async move {
            if let Err(e) = scheduler::run_daily(&telegram, notifier, http, sources).await {
                tracing::error!("Scheduler error: {}", e);
            }
        });
    }

    // Command listener runs in the foreground.
    let bot = Arc::new(TelegramBot::new(
        config.telegram.bot_token.clone(),
        notifier,
        http,
        config.sources.clone(),
    ));
    bot.start_polling().await;

    Ok(())
}

async fn print_report(config: Config) -> anyhow::Result<()> {
    let http = config.scrape_client()?;
    let text = report::build(&http, &config.sources).await;
    println!("{}", text);
    Ok(())
}

async fn test_notify(config: Config) -> anyhow::Result<()> {
    let notifier = Notifier::new(
        config.telegram.bot_token.clone(),
        config.telegram.chat_id.clone(),
    );

    notifier
        .send("🧪 <b>Test Notification</b>\n\nIf you see this, Telegram integration is working!")
        .await?;

    println!("✅ Test notification sent!");
    Ok(())
}
