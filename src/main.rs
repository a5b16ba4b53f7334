use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hotel_delivery_bot::assets::AssetStore;
use hotel_delivery_bot::bot::{self, ResponseSender};
use hotel_delivery_bot::config::BotConfig;
use hotel_delivery_bot::health;
use hotel_delivery_bot::localization::Catalog;
use hotel_delivery_bot::responses::ResponseTable;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging; teloxide's `log` records are bridged by the subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting hotel delivery bot");

    let config = BotConfig::from_env()?;
    info!(config = ?config, "Configuration loaded");

    // Texts and the response table are built once and only read afterwards
    let catalog = Arc::new(Catalog::load()?);
    let table = Arc::new(ResponseTable::new(&catalog));

    health::spawn(config.port, catalog.text("liveness"));

    let bot = Bot::new(config.telegram_token.clone());
    let sender = Arc::new(ResponseSender::new(
        bot.clone(),
        AssetStore::new(&config.assets_dir),
        Arc::clone(&catalog),
    ));

    info!("Bot initialized, starting dispatcher");

    // Updates of one chat are handled in arrival order by the dispatcher
    let handler = dptree::entry().branch(Update::filter_message().endpoint({
        let table = Arc::clone(&table);
        let sender = Arc::clone(&sender);
        move |msg: Message| {
            let table = Arc::clone(&table);
            let sender = Arc::clone(&sender);
            async move { bot::message_handler(msg, table, sender).await }
        }
    }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
