//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are generated
//! from the entity definitions with `Schema::create_table_from_entity`, so the schema
//! (including the `galangan_id` foreign keys) always matches the Rust models. Creation
//! is idempotent and safe to run on every start.

use crate::entities::{Galangan, Lunas, Setor};
use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::debug;

/// Used when `DATABASE_URL` is not set. `mode=rwc` creates the file on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/galangan.sqlite?mode=rwc";

const DEFAULT_DATA_DIR: &str = "data";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// With the default URL the `data/` directory is created first.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all(DEFAULT_DATA_DIR).map_err(|e| Error::Config {
            message: format!("Failed to create {DEFAULT_DATA_DIR}/: {e}"),
        })?;
    }
    debug!(%database_url, "connecting");
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = Schema::new(builder).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates the `galangan`, `setor` and `lunas` tables if they do not exist yet.
///
/// `galangan` goes first since both other tables reference it.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<()> {
    create_table(db, Galangan).await?;
    create_table(db, Setor).await?;
    create_table(db, Lunas).await?;
    Ok(())
}
