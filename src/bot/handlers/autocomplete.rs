//! Autocomplete handler for the galangan picker.
//!
//! The setor and lunas add commands take a project through this picker. Each choice
//! shows `nama - jenis (pemilik)` and submits the project id. Options are read straight
//! from the store on every keystroke rather than through the list cache.

use crate::{
    bot::BotData,
    core::store,
    entities::galangan,
    errors::Error,
};
use poise::serenity_prelude as serenity;
use tracing::warn;

/// Discord autocomplete limit
const MAX_CHOICES: usize = 25;
/// Discord limit on a choice's display name
const MAX_LABEL_CHARS: usize = 100;

/// Display label of a project in the picker.
#[must_use]
pub fn galangan_label(project: &galangan::Model) -> String {
    let label = format!(
        "{} - {} ({})",
        project.nama_kapal, project.jenis_kapal, project.pemilik
    );
    label.chars().take(MAX_LABEL_CHARS).collect()
}

/// Projects whose label contains `partial`, case-insensitively, in store order.
#[must_use]
pub fn matching_options(projects: &[galangan::Model], partial: &str) -> Vec<(String, i64)> {
    let partial_lower = partial.to_lowercase();
    projects
        .iter()
        .map(|project| (galangan_label(project), project.id))
        .filter(|(label, _)| label.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .collect()
}

/// Suggests projects ordered by ship name; the submitted value is the project id.
pub async fn autocomplete_galangan(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let projects = match store::list_galangan_options(&ctx.data().database).await {
        Ok(projects) => projects,
        Err(e) => {
            warn!("Failed to load galangan options: {e}");
            return Vec::new();
        }
    };

    matching_options(&projects, partial)
        .into_iter()
        .map(|(label, id)| serenity::AutocompleteChoice::new(label, id.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Result, test_utils::*};

    #[tokio::test]
    async fn test_options_are_labelled_and_ordered_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        let zeta = create_test_galangan(&db, "KM Zeta").await?;
        let alpha = create_test_galangan(&db, "KM Alpha").await?;

        let projects = store::list_galangan_options(&db).await?;
        let options = matching_options(&projects, "");
        assert_eq!(
            options,
            vec![
                ("KM Alpha - Kapal Cargo (PT Test)".to_string(), alpha.id),
                ("KM Zeta - Kapal Cargo (PT Test)".to_string(), zeta.id),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_options_filter_case_insensitively() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_galangan(&db, "KM Alpha").await?;
        let zeta = create_test_galangan(&db, "KM Zeta").await?;

        let projects = store::list_galangan_options(&db).await?;
        let options = matching_options(&projects, "zET");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].1, zeta.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_long_labels_are_truncated() -> Result<()> {
        let db = setup_test_db().await?;
        let long_name = "K".repeat(150);
        create_test_galangan(&db, &long_name).await?;

        let projects = store::list_galangan_options(&db).await?;
        assert_eq!(galangan_label(&projects[0]).chars().count(), MAX_LABEL_CHARS);
        Ok(())
    }
}
