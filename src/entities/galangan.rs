//! Galangan entity - A shipyard construction or repair project for one vessel.
//!
//! Galangan is the owning parent of both installment payments (`setor`) and settlement
//! records (`lunas`). The module also holds the fixed vocabularies used by the add form:
//! project status values and ship types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Galangan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galangan")]
pub struct Model {
    /// Unique identifier assigned by the store
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ship name (e.g., "KM Bahari Jaya")
    pub nama_kapal: String,
    /// Ship type, one of [`SHIP_TYPES`]
    pub jenis_kapal: String,
    /// Owner of the vessel
    pub pemilik: String,
    /// Contract value in rupiah
    pub nilai_kontrak: f64,
    /// Project status as stored; see [`ProjectStatus`]
    pub status: String,
    /// Start date of the project
    pub tanggal_mulai: Date,
    /// Optional target completion date
    pub tanggal_target: Option<Date>,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last written
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Galangan and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One project has many installment payments
    #[sea_orm(has_many = "super::setor::Entity")]
    Setor,
    /// One project has many settlement records
    #[sea_orm(has_many = "super::lunas::Entity")]
    Lunas,
}

impl Related<super::setor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Setor.def()
    }
}

impl Related<super::lunas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lunas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Ship types offered by the add form. `Lainnya` is the catch-all "Other".
pub const SHIP_TYPES: [&str; 7] = [
    "Kapal Cargo",
    "Kapal Penumpang",
    "Kapal Ikan",
    "Kapal Tanker",
    "Kapal Tug Boat",
    "Kapal Patroli",
    "Lainnya",
];

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Work in progress (default for new projects)
    #[default]
    Ongoing,
    /// Delivered
    Completed,
    /// Abandoned
    Cancelled,
}

impl ProjectStatus {
    /// Every status value accepted on insert.
    pub const ALL: [Self; 3] = [Self::Ongoing, Self::Completed, Self::Cancelled];

    /// Stored representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a stored status value; unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `value` is one of the known ship types.
#[must_use]
pub fn is_known_ship_type(value: &str) -> bool {
    SHIP_TYPES.contains(&value)
}
