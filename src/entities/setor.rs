//! Setor entity - An installment payment recorded against a Galangan project.
//!
//! `galangan_id` is nullable in the store; when it is set, the connection's foreign key
//! enforcement guarantees it references an existing project.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Setor database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "setor")]
pub struct Model {
    /// Unique identifier assigned by the store
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project this payment belongs to
    pub galangan_id: Option<i64>,
    /// Amount paid in rupiah
    pub jumlah: f64,
    /// Date the payment was made
    pub tanggal_setor: Date,
    /// Optional free-text note
    pub keterangan: Option<String>,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Setor and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to at most one project
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
