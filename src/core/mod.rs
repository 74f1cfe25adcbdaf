//! Core business logic - framework-agnostic data access, forms, lists and dashboard.
//!
//! Nothing in here knows about Discord. The bot layer drives these types and renders
//! the view models they produce.

use std::fmt;

/// Query cache keyed by entity, with invalidation notifications
pub mod cache;
/// Read-only aggregate summary
pub mod dashboard;
/// Add forms: drafts, coercion and submission
pub mod form;
/// Currency, date and status badge formatting
pub mod format;
/// List views and their render models
pub mod list;
/// Navigation shell state machine
pub mod shell;
/// Data access layer over the three tables
pub mod store;

/// The three tracked entities. Also the key of the query cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Shipyard project
    Galangan,
    /// Installment payment
    Setor,
    /// Settlement record
    Lunas,
}

impl EntityKind {
    /// All entities, in menu order.
    pub const ALL: [Self; 3] = [Self::Galangan, Self::Setor, Self::Lunas];

    /// Table name, also used in user-facing messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Galangan => "galangan",
            Self::Setor => "setor",
            Self::Lunas => "lunas",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Galangan => 0,
            Self::Setor => 1,
            Self::Lunas => 2,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
