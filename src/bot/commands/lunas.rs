//! Lunas Discord commands - list and add settlement records.

mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, views},
        core::{EntityKind, shell::Section},
        errors::{Error, Result},
    };

    /// Parent command for settlement records.
    #[poise::command(slash_command, subcommands("lunas_list", "lunas_add"))]
    pub async fn lunas(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Use `/lunas list` or `/lunas add`.").await?;
        Ok(())
    }

    /// Lists all settlement records with their project, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn lunas_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        views::show_section(ctx, Section::Lunas).await
    }

    /// Opens the new settlement form, filling in and saving any values given.
    #[poise::command(slash_command, rename = "add")]
    pub async fn lunas_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Shipyard project"]
        #[autocomplete = "autocomplete::autocomplete_galangan"]
        galangan: Option<String>,
        #[description = "Total paid in rupiah"] total_bayar: Option<String>,
        #[description = "Settlement date (YYYY-MM-DD, default today)"] tanggal_lunas: Option<
            String,
        >,
        #[description = "Remaining balance in rupiah"] sisa_bayar: Option<String>,
        #[description = "Note"] keterangan: Option<String>,
    ) -> Result<()> {
        views::fill_and_submit(
            ctx,
            EntityKind::Lunas,
            vec![
                ("galangan_id", galangan),
                ("tanggal_lunas", tanggal_lunas),
                ("total_bayar", total_bayar),
                ("sisa_bayar", sisa_bayar),
                ("keterangan", keterangan),
            ],
        )
        .await
    }
}

pub use inner::*;
