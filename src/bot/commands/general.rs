//! General Discord commands - ping and help.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Galangan Monitor Help**\n\
        Track shipyard projects, installment payments and settlements.\n\n\
        **Navigation**\n\
        • `/dashboard` - Totals and the most recent projects.\n\
        • `/menu <section>` - Switch to Dashboard, Galangan, Setor or Lunas.\n\n\
        **Sections**\n\
        • `/galangan list` / `/galangan add` - Shipyard projects.\n\
        • `/setor list` / `/setor add` - Installment payments.\n\
        • `/lunas list` / `/lunas add` - Settlement records.\n\n\
        **Forms**\n\
        • `add` with no options opens the form; options fill it in and save.\n\
        • `/retry` - Save the open form again, or reload the current view.\n\
        • `/cancel` - Discard the open form.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
