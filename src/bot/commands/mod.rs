//! Discord command implementations organized by menu section.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Dashboard command
pub mod dashboard;

/// Shipyard project commands
pub mod galangan;

/// General utility commands
pub mod general;

/// Settlement commands
pub mod lunas;

/// Menu, retry and cancel
pub mod navigation;

/// Installment payment commands
pub mod setor;

use crate::{bot::BotData, errors::Error};

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        dashboard::dashboard(),
        navigation::menu(),
        navigation::retry(),
        navigation::cancel(),
        galangan::galangan(),
        setor::setor(),
        lunas::lunas(),
        general::ping(),
        general::help(),
    ]
}
