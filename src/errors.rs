//! Unified error types for the galangan monitor.
//!
//! Validation errors are raised before any store call is made. Store errors wrap the
//! underlying `SeaORM` error together with the entity and the operation that failed, so
//! the layer presenting them can name what went wrong without re-wrapping.

use crate::core::EntityKind;
use std::fmt;
use thiserror::Error;

/// The store operation that produced a [`Error::Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    /// Reading a list of rows
    List,
    /// Inserting a single row
    Insert,
}

impl fmt::Display for StoreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("load"),
            Self::Insert => f.write_str("add"),
        }
    }
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Direct database failure outside the list/insert contract
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Failure reported by the store while listing or inserting
    #[error("Failed to {action} {entity}: {source}")]
    Store {
        /// Entity the operation targeted
        entity: EntityKind,
        /// Operation that failed
        action: StoreAction,
        /// Underlying store error
        #[source]
        source: sea_orm::DbErr,
    },

    /// A required field was empty at submit time
    #[error("{entity}: `{field}` is required")]
    MissingField {
        /// Entity of the form
        entity: EntityKind,
        /// Name of the empty field
        field: &'static str,
    },

    /// A field value could not be accepted
    #[error("{entity}: `{field}` is invalid ({reason})")]
    InvalidField {
        /// Entity of the form
        entity: EntityKind,
        /// Name of the offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// String formatting error
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Whether this error was raised by client-side validation rather than the store.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidField { .. })
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_names_entity_and_action() {
        let error = Error::Store {
            entity: EntityKind::Lunas,
            action: StoreAction::Insert,
            source: sea_orm::DbErr::Custom("constraint".to_string()),
        };
        assert!(error.to_string().starts_with("Failed to add lunas"));
        assert!(!error.is_validation());
    }

    #[test]
    fn test_missing_field_is_validation() {
        let error = Error::MissingField {
            entity: EntityKind::Galangan,
            field: "nama_kapal",
        };
        assert!(error.is_validation());
        assert_eq!(error.to_string(), "galangan: `nama_kapal` is required");
    }
}
