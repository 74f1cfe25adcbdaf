//! Galangan Discord commands - list and add shipyard projects.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, views},
        core::{EntityKind, shell::Section},
        entities::galangan::ProjectStatus,
        errors::{Error, Result},
    };

    /// Ship types offered in the add command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
    pub enum ShipType {
        #[name = "Kapal Cargo"]
        Cargo,
        #[name = "Kapal Penumpang"]
        Penumpang,
        #[name = "Kapal Ikan"]
        Ikan,
        #[name = "Kapal Tanker"]
        Tanker,
        #[name = "Kapal Tug Boat"]
        TugBoat,
        #[name = "Kapal Patroli"]
        Patroli,
        #[name = "Lainnya"]
        Lainnya,
    }

    impl ShipType {
        /// Stored value of the ship type.
        pub const fn as_str(self) -> &'static str {
            match self {
                Self::Cargo => "Kapal Cargo",
                Self::Penumpang => "Kapal Penumpang",
                Self::Ikan => "Kapal Ikan",
                Self::Tanker => "Kapal Tanker",
                Self::TugBoat => "Kapal Tug Boat",
                Self::Patroli => "Kapal Patroli",
                Self::Lainnya => "Lainnya",
            }
        }
    }

    /// Status choices, shown with their badge labels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
    pub enum StatusChoice {
        #[name = "In progress"]
        Ongoing,
        #[name = "Done"]
        Completed,
        #[name = "Cancelled"]
        Cancelled,
    }

    impl From<StatusChoice> for ProjectStatus {
        fn from(choice: StatusChoice) -> Self {
            match choice {
                StatusChoice::Ongoing => Self::Ongoing,
                StatusChoice::Completed => Self::Completed,
                StatusChoice::Cancelled => Self::Cancelled,
            }
        }
    }

    /// Parent command for shipyard projects.
    #[poise::command(slash_command, subcommands("galangan_list", "galangan_add"))]
    pub async fn galangan(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Use `/galangan list` or `/galangan add`.").await?;
        Ok(())
    }

    /// Lists all shipyard projects, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn galangan_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        views::show_section(ctx, Section::Galangan).await
    }

    /// Opens the new project form, filling in and saving any values given.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn galangan_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Ship name"] nama_kapal: Option<String>,
        #[description = "Ship type"] jenis_kapal: Option<ShipType>,
        #[description = "Owner"] pemilik: Option<String>,
        #[description = "Contract value in rupiah (e.g. 1500000)"] nilai_kontrak: Option<String>,
        #[description = "Start date (YYYY-MM-DD)"] tanggal_mulai: Option<String>,
        #[description = "Target date (YYYY-MM-DD)"] tanggal_target: Option<String>,
        #[description = "Status (default: In progress)"] status: Option<StatusChoice>,
    ) -> Result<()> {
        views::fill_and_submit(
            ctx,
            EntityKind::Galangan,
            vec![
                ("nama_kapal", nama_kapal),
                ("jenis_kapal", jenis_kapal.map(|t| t.as_str().to_string())),
                ("pemilik", pemilik),
                ("nilai_kontrak", nilai_kontrak),
                ("tanggal_mulai", tanggal_mulai),
                ("tanggal_target", tanggal_target),
                (
                    "status",
                    status.map(|s| ProjectStatus::from(s).as_str().to_string()),
                ),
            ],
        )
        .await
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::entities::galangan::{SHIP_TYPES, is_known_ship_type};

        #[test]
        fn test_ship_type_choices_match_vocabulary() {
            let choices = [
                ShipType::Cargo,
                ShipType::Penumpang,
                ShipType::Ikan,
                ShipType::Tanker,
                ShipType::TugBoat,
                ShipType::Patroli,
                ShipType::Lainnya,
            ];
            assert_eq!(choices.len(), SHIP_TYPES.len());
            assert!(choices.iter().all(|c| is_known_ship_type(c.as_str())));
        }

        #[test]
        fn test_status_choice_maps_to_stored_value() {
            assert_eq!(ProjectStatus::from(StatusChoice::Completed).as_str(), "completed");
            assert_eq!(ProjectStatus::from(StatusChoice::Ongoing), ProjectStatus::default());
        }
    }
}

pub use inner::*;
