use dotenvy::dotenv;
use galangan_monitor::{
    bot::{self, BotData},
    config::{database, seed},
    core::{EntityKind, cache::QueryCache, list},
    errors::{Error, Result},
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Connect and create tables
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connected."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 4. Seed projects from config.toml into an empty store
    let seed_config = seed::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {e}"))?;
    let seeded = seed::seed_if_empty(&db, &seed_config)
        .await
        .inspect_err(|e| error!("Failed to seed galangan projects: {e}"))?;
    if seeded > 0 {
        info!("Seeded {seeded} galangan projects from config.toml.");
    }

    // 5. Keep every list warm after each insert
    let cache = Arc::new(QueryCache::new());
    for kind in EntityKind::ALL {
        tokio::spawn(list::refresh_on_invalidate(
            db.clone(),
            Arc::downgrade(&cache),
            cache.subscribe(kind),
        ));
    }

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(db, cache)).await
}
