//! Lunas entity - A full or partial settlement record for a Galangan project.
//!
//! `sisa_bayar` is entered by hand and is informational only; nothing reconciles it
//! against the project's contract value or its installment payments.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lunas database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lunas")]
pub struct Model {
    /// Unique identifier assigned by the store
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project this settlement belongs to
    pub galangan_id: Option<i64>,
    /// Settlement date
    pub tanggal_lunas: Date,
    /// Total amount paid in rupiah
    pub total_bayar: f64,
    /// Remaining balance as entered, if any
    pub sisa_bayar: Option<f64>,
    /// Optional free-text note
    pub keterangan: Option<String>,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Lunas and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each settlement belongs to at most one project
    #[sea_orm(
        belongs_to = "super::galangan::Entity",
        from = "Column::GalanganId",
        to = "super::galangan::Column::Id"
    )]
    Galangan,
}

impl Related<super::galangan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Galangan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
