//! Setor Discord commands - list and add installment payments.

mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, views},
        core::{EntityKind, shell::Section},
        errors::{Error, Result},
    };

    /// Parent command for installment payments.
    #[poise::command(slash_command, subcommands("setor_list", "setor_add"))]
    pub async fn setor(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Use `/setor list` or `/setor add`.").await?;
        Ok(())
    }

    /// Lists all installment payments with their project, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn setor_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        views::show_section(ctx, Section::Setor).await
    }

    /// Opens the new payment form, filling in and saving any values given.
    #[poise::command(slash_command, rename = "add")]
    pub async fn setor_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Shipyard project"]
        #[autocomplete = "autocomplete::autocomplete_galangan"]
        galangan: Option<String>,
        #[description = "Amount in rupiah (e.g. 1500000)"] jumlah: Option<String>,
        #[description = "Payment date (YYYY-MM-DD, default today)"] tanggal_setor: Option<String>,
        #[description = "Note"] keterangan: Option<String>,
    ) -> Result<()> {
        views::fill_and_submit(
            ctx,
            EntityKind::Setor,
            vec![
                ("galangan_id", galangan),
                ("jumlah", jumlah),
                ("tanggal_setor", tanggal_setor),
                ("keterangan", keterangan),
            ],
        )
        .await
    }
}

pub use inner::*;
