//! Embeds built from core view models.
//!
//! Field text is assembled by plain functions so it can be checked without Discord;
//! the `*_embed` functions only wrap it in serenity builders.

use crate::{
    core::{
        EntityKind,
        dashboard::DashboardSummary,
        form::{AddForm, Notice, NoticeLevel},
        format::BadgeColor,
        list::{EmptyState, ListHeader, ListItem, ListPage, ListState},
    },
    errors::Error,
};
use poise::serenity_prelude as serenity;
use std::fmt::Write;

/// Discord allows at most 25 fields per embed.
pub const MAX_FIELDS: usize = 25;
/// Longest field name or embed title Discord accepts.
pub const MAX_NAME_CHARS: usize = 256;
/// Longest field value Discord accepts.
pub const MAX_VALUE_CHARS: usize = 1024;
/// Longest embed description Discord accepts.
pub const MAX_DESCRIPTION_CHARS: usize = 4096;
/// Discord rejects embeds whose text adds up to more than 6000 characters. Row fields
/// stop well short of that so titles, descriptions and footers still fit.
pub const MAX_FIELDS_CHARS: usize = 5000;

const NEUTRAL_COLOR: u32 = 0x0034_98DB;
/// Per-field cap in the form preview; a draft has at most seven fields.
const FORM_VALUE_CHARS: usize = 500;

/// Cuts `text` to at most `max` characters, ending in `…` when anything was dropped.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Name and value of the embed field for one list row, within Discord's field limits.
#[must_use]
pub fn item_field(item: &ListItem) -> (String, String) {
    let name = match &item.badge {
        Some(badge) => format!("{} {}", badge.color.emoji(), item.title),
        None => item.title.clone(),
    };

    let mut value = String::new();
    if let Some(subtitle) = &item.subtitle {
        let _ = writeln!(value, "_{subtitle}_");
    }
    if let Some(badge) = &item.badge {
        let _ = writeln!(value, "**Status:** {}", badge.label);
    }
    for (label, text) in &item.fields {
        let _ = writeln!(value, "**{label}:** {text}");
    }
    (
        truncate(&name, MAX_NAME_CHARS),
        truncate(&value, MAX_VALUE_CHARS),
    )
}

/// Fields for the leading rows of `page`, stopping at [`MAX_FIELDS`] rows or once
/// their text would pass [`MAX_FIELDS_CHARS`].
#[must_use]
pub fn page_fields(page: &ListPage) -> Vec<(String, String)> {
    let mut total = 0;
    page.items
        .iter()
        .take(MAX_FIELDS)
        .map(item_field)
        .take_while(|(name, value)| {
            total += name.chars().count() + value.chars().count();
            total <= MAX_FIELDS_CHARS
        })
        .collect()
}

fn header_embed(header: &ListHeader) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .title(header.title)
        .description(header.subtitle)
        .color(NEUTRAL_COLOR)
}

fn page_embed(page: &ListPage) -> serenity::CreateEmbed {
    let fields = page_fields(page);
    let shown = fields.len();
    header_embed(&page.header)
        .fields(fields.into_iter().map(|(name, value)| (name, value, false)))
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Showing {shown} of {} | {}",
            page.items.len(),
            page.header.add_label
        )))
}

fn empty_embed(empty: &EmptyState) -> serenity::CreateEmbed {
    header_embed(&empty.header).field(empty.heading, empty.hint, false)
}

/// Embed for a list in any state.
#[must_use]
pub fn list_embed(kind: EntityKind, state: &ListState) -> serenity::CreateEmbed {
    match state {
        ListState::Loading => header_embed(&ListHeader::for_kind(kind)).field("⏳", "Loading...", false),
        ListState::Empty(empty) => empty_embed(empty),
        ListState::Ready(page) => page_embed(page),
        ListState::Failed {
            message,
            stale: Some(page),
        } => page_embed(page)
            .description(format!(
                "⚠️ Showing previously loaded data. Refresh failed: {}\nUse `/retry` to try again.",
                truncate(message, MAX_NAME_CHARS)
            ))
            .color(BadgeColor::Red.rgb()),
        ListState::Failed {
            message,
            stale: None,
        } => header_embed(&ListHeader::for_kind(kind))
            .field(
                "❌ Could not load data",
                truncate(message, MAX_VALUE_CHARS),
                false,
            )
            .footer(serenity::CreateEmbedFooter::new("Use /retry to try again"))
            .color(BadgeColor::Red.rgb()),
    }
}

/// Lines of the dashboard body.
#[must_use]
pub fn dashboard_text(summary: &DashboardSummary) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "🚢 **Total galangan:** {}", summary.total_galangan);
    let _ = writeln!(text, "💰 **Total setor:** {}", summary.total_setor);
    let _ = writeln!(text, "⏳ **Belum lunas:** {}", summary.belum_lunas);
    text
}

/// Embed for the dashboard summary.
#[must_use]
pub fn dashboard_embed(summary: &DashboardSummary) -> serenity::CreateEmbed {
    let recent = if summary.recent.is_empty() {
        "_No projects yet_".to_string()
    } else {
        summary
            .recent
            .iter()
            .map(|project| {
                format!(
                    "{} **{}** - {} ({}) · {}",
                    project.badge.color.emoji(),
                    project.nama_kapal,
                    project.jenis_kapal,
                    project.pemilik,
                    project.badge.label
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let recent = truncate(&recent, MAX_VALUE_CHARS);
    serenity::CreateEmbed::default()
        .title("Dashboard")
        .description(dashboard_text(summary))
        .field("Recent projects", recent, false)
        .color(NEUTRAL_COLOR)
}

/// Embed for a notice, optionally with the underlying error.
#[must_use]
pub fn notice_embed(notice: &Notice, detail: Option<&Error>) -> serenity::CreateEmbed {
    let color = match notice.level {
        NoticeLevel::Success => BadgeColor::Green.rgb(),
        NoticeLevel::Error => BadgeColor::Red.rgb(),
    };
    let mut description = notice.message.clone();
    if let Some(error) = detail {
        let _ = write!(description, "\n`{error}`");
    }
    serenity::CreateEmbed::default()
        .title(notice.title)
        .description(truncate(&description, MAX_DESCRIPTION_CHARS))
        .color(color)
}

/// Lines describing each field of an open form.
#[must_use]
pub fn form_text(form: &AddForm) -> String {
    let draft = form.draft();
    let mut text = String::new();
    for spec in draft.schema().fields {
        let value = draft
            .get(spec.name)
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| "-".to_string(), |v| truncate(v, FORM_VALUE_CHARS));
        let marker = if spec.required { " *" } else { "" };
        let _ = writeln!(text, "**{}{marker}:** {value}", spec.label);
    }
    text
}

/// Embed for an open form, with the reason the last save was blocked if any.
#[must_use]
pub fn form_embed(form: &AddForm, problem: Option<&Error>) -> serenity::CreateEmbed {
    let entity = form.entity();
    let mut embed = serenity::CreateEmbed::default()
        .title(form.draft().schema().title)
        .description(truncate(&form_text(form), MAX_DESCRIPTION_CHARS))
        .footer(serenity::CreateEmbedFooter::new(format!(
            "* required | /{entity} add fills more fields, /retry saves, /cancel discards"
        )))
        .color(NEUTRAL_COLOR);
    if let Some(error) = problem {
        embed = embed
            .field(
                "⚠️ Not saved",
                truncate(&error.to_string(), MAX_VALUE_CHARS),
                false,
            )
            .color(BadgeColor::Red.rgb());
    }
    embed
}
