//! Discord interaction handlers
//!
//! Handlers for interactions other than commands, such as autocomplete.

/// Autocomplete handler for the galangan picker
pub mod autocomplete;
