//! Dashboard command.

mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, views},
        core::shell::Section,
        errors::{Error, Result},
    };

    /// Shows total projects, total payments, unsettled projects and the newest projects.
    #[poise::command(slash_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        views::show_section(ctx, Section::Dashboard).await
    }
}

pub use inner::*;
