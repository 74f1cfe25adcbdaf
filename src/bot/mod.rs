//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the galangan monitor: slash commands
//! for each menu section, the galangan picker autocomplete, per-user navigation state,
//! and the embeds that render core view models.

/// Discord command implementations (navigation, dashboard, galangan, setor, lunas, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Embeds built from list, form and dashboard view models
pub mod render;
/// Per-user navigation shells
pub mod session;
/// Shared reply helpers used by several commands
pub mod views;

use crate::{
    core::{cache::QueryCache, list::Listing},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub use session::Sessions;

/// Shared data available to all bot commands.
/// Holds the database connection, the list cache shared with the refresh tasks,
/// and every user's navigation state.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Cached list queries, one slot per entity
    pub cache: Arc<QueryCache<Listing>>,
    /// Navigation state keyed by Discord user
    pub sessions: Sessions,
}

impl BotData {
    /// Creates a new `BotData` with empty sessions.
    #[must_use]
    pub fn new(database: DatabaseConnection, cache: Arc<QueryCache<Listing>>) -> Self {
        Self {
            database,
            cache,
            sessions: Sessions::default(),
        }
    }
}

/// Poise context with this bot's data and error types
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let message = if error.is_validation() {
                warn!("Rejected input in command `{}`: {error}", ctx.command().name);
                format!("⚠️ {error}")
            } else {
                error!("Error in command `{}`: {error}", ctx.command().name);
                format!("❌ An error occurred: {error}")
            };
            if let Err(e) = ctx.say(message).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Registers all commands globally and runs the Discord client until it stops.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    // Slash commands need no privileged intents
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e}"))?;
    Ok(())
}
