/// Database configuration and connection management
pub mod database;

/// Seed projects loaded from config.toml
pub mod seed;
