//! Reply helpers shared by the section commands.
//!
//! Every command that shows a list, the dashboard or a form goes through here so the
//! same view always renders the same way.

use crate::{
    bot::{Context, render},
    core::{
        EntityKind, dashboard,
        form::{AddForm, SubmitOutcome},
        list::ListView,
        shell::{Section, Shell, View},
    },
    errors::Result,
};
use chrono::NaiveDate;
use poise::{CreateReply, serenity_prelude as serenity};
use tracing::{debug, error};

/// The local calendar date, used to prefill date fields.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Loads `kind` through the cache and replies with its list.
pub async fn send_list(ctx: Context<'_>, kind: EntityKind) -> Result<()> {
    let data = ctx.data();
    let mut view = ListView::new(kind);
    let state = view.load(&data.database, &data.cache).await;
    ctx.send(CreateReply::default().embed(render::list_embed(kind, state)))
        .await?;
    Ok(())
}

/// Computes the dashboard from live queries and replies with it.
pub async fn send_dashboard(ctx: Context<'_>) -> Result<()> {
    let embed = match dashboard::load_summary(&ctx.data().database).await {
        Ok(summary) => render::dashboard_embed(&summary),
        Err(e) => {
            error!("Failed to load dashboard: {e}");
            serenity::CreateEmbed::default()
                .title("Dashboard")
                .field(
                    "❌ Could not load summary",
                    render::truncate(&e.to_string(), render::MAX_VALUE_CHARS),
                    false,
                )
                .footer(serenity::CreateEmbedFooter::new("Use /retry to try again"))
        }
    };
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Replies with the open form.
pub async fn send_form(ctx: Context<'_>, form: &AddForm) -> Result<()> {
    ctx.send(CreateReply::default().embed(render::form_embed(form, None)))
        .await?;
    Ok(())
}

/// Replies with whatever `view` shows.
pub async fn send_view(ctx: Context<'_>, view: View, shell: &Shell) -> Result<()> {
    match (view, shell.form()) {
        (View::Dashboard, _) => send_dashboard(ctx).await,
        (View::Form(_), Some(form)) => send_form(ctx, form).await,
        (View::List(kind) | View::Form(kind), _) => send_list(ctx, kind).await,
    }
}

/// Switches the caller to `section` and shows it.
pub async fn show_section(ctx: Context<'_>, section: Section) -> Result<()> {
    ctx.defer().await?;
    let handle = ctx.data().sessions.shell(ctx.author().id).await;
    let mut shell = handle.lock().await;
    shell.select(section);
    debug!(user = %ctx.author().id, section = section.label(), "section selected");
    send_view(ctx, shell.view(), &shell).await
}

/// Saves the caller's open form and replies with the outcome.
///
/// On success the form closes and the refreshed list is shown. Otherwise the form stays
/// open with its draft intact.
pub async fn submit_form(ctx: Context<'_>, shell: &mut Shell) -> Result<()> {
    let Some(form) = shell.form() else {
        ctx.say("ℹ️ No form is open. Use `/galangan add`, `/setor add` or `/lunas add`.")
            .await?;
        return Ok(());
    };
    let kind = form.entity();
    let data = ctx.data();

    let outcome = form.submit(&data.database, data.cache.as_ref()).await;
    let mut reply = match &outcome {
        SubmitOutcome::Saved { notice, .. } => {
            CreateReply::default().embed(render::notice_embed(notice, None))
        }
        SubmitOutcome::Invalid(error) => {
            CreateReply::default().embed(render::form_embed(form, Some(error)))
        }
        SubmitOutcome::Failed { notice, error } => CreateReply::default()
            .embed(render::notice_embed(notice, Some(error)))
            .embed(render::form_embed(form, None)),
    };

    if outcome.closes_form() {
        shell.close_form();
        let mut view = ListView::new(kind);
        let state = view.load(&data.database, &data.cache).await;
        reply = reply.embed(render::list_embed(kind, state));
    }
    ctx.send(reply).await?;
    Ok(())
}

/// Opens the add form of `kind` for the caller and applies the given values.
///
/// With no values this only shows the form. Otherwise the form is saved, which either
/// closes it or shows why it could not be saved. Values given on a later call are
/// merged into the same draft.
pub async fn fill_and_submit(
    ctx: Context<'_>,
    kind: EntityKind,
    values: Vec<(&'static str, Option<String>)>,
) -> Result<()> {
    ctx.defer().await?;
    let handle = ctx.data().sessions.shell(ctx.author().id).await;
    let mut shell = handle.lock().await;

    let section = Section::from(kind);
    if shell.active() != section {
        shell.select(section);
    }
    let Some(form) = shell.open_form(today()) else {
        return Ok(());
    };

    let mut provided = false;
    for (field, value) in values {
        if let Some(value) = value {
            form.set(field, value)?;
            provided = true;
        }
    }

    if provided {
        submit_form(ctx, &mut shell).await
    } else {
        send_form(ctx, form).await
    }
}
