//! Navigation commands - menu, retry and cancel.
//!
//! These drive the caller's shell directly; the section commands share the same shell.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, views},
        core::shell::{Section, View},
        errors::{Error, Result},
    };

    /// Menu entries offered by `/menu`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
    pub enum MenuSection {
        Dashboard,
        Galangan,
        Setor,
        Lunas,
    }

    impl From<MenuSection> for Section {
        fn from(choice: MenuSection) -> Self {
            match choice {
                MenuSection::Dashboard => Self::Dashboard,
                MenuSection::Galangan => Self::Galangan,
                MenuSection::Setor => Self::Setor,
                MenuSection::Lunas => Self::Lunas,
            }
        }
    }

    /// Switches to a menu section. Any open form is discarded.
    #[poise::command(slash_command)]
    pub async fn menu(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Section to open"] section: MenuSection,
    ) -> Result<()> {
        views::show_section(ctx, section.into()).await
    }

    /// Saves the open form again, or reloads the current view when no form is open.
    #[poise::command(slash_command)]
    pub async fn retry(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let handle = ctx.data().sessions.shell(ctx.author().id).await;
        let mut shell = handle.lock().await;

        match shell.view() {
            View::Form(_) => views::submit_form(ctx, &mut shell).await,
            view => views::send_view(ctx, view, &shell).await,
        }
    }

    /// Discards the open form and returns to its list.
    #[poise::command(slash_command)]
    pub async fn cancel(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let handle = ctx.data().sessions.shell(ctx.author().id).await;
        let mut shell = handle.lock().await;

        if !shell.form_open() {
            ctx.say("ℹ️ No form is open.").await?;
            return Ok(());
        }
        ctx.defer().await?;
        shell.close_form();
        views::send_view(ctx, shell.view(), &shell).await
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_menu_sections_map_in_order() {
            let choices = [
                MenuSection::Dashboard,
                MenuSection::Galangan,
                MenuSection::Setor,
                MenuSection::Lunas,
            ];
            let sections: Vec<Section> = choices.into_iter().map(Section::from).collect();
            assert_eq!(sections, Section::ALL);
        }
    }
}

pub use inner::*;
