//! Data access layer - typed list and insert operations over the three tables.
//!
//! Reads are full-table scans with a single ordering column; child tables can be read
//! joined with the summary fields of their parent project. Inserts go through validated
//! record types so a row is never written with a required field missing. Any failure
//! reported by the store comes back as [`Error::Store`].

use crate::{
    core::EntityKind,
    entities::{Galangan, galangan, lunas, setor},
    errors::{Error, Result, StoreAction},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Iterable, Order, PrimaryKeyToColumn, QueryOrder, Select, Set, prelude::*};
use serde::Serialize;

/// Entities served by the data access layer.
pub trait StoreEntity: EntityTrait {
    /// Cache key and display name of the entity
    const KIND: EntityKind;
}

impl StoreEntity for galangan::Entity {
    const KIND: EntityKind = EntityKind::Galangan;
}

impl StoreEntity for setor::Entity {
    const KIND: EntityKind = EntityKind::Setor;
}

impl StoreEntity for lunas::Entity {
    const KIND: EntityKind = EntityKind::Lunas;
}

pub(crate) fn store_error(entity: EntityKind, action: StoreAction) -> impl Fn(DbErr) -> Error {
    move |source| Error::Store {
        entity,
        action,
        source,
    }
}

/// Parent fields embedded in each `setor`/`lunas` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentSummary {
    /// Ship name
    pub nama_kapal: String,
    /// Ship type
    pub jenis_kapal: String,
    /// Owner
    pub pemilik: String,
}

impl From<galangan::Model> for ParentSummary {
    fn from(model: galangan::Model) -> Self {
        Self {
            nama_kapal: model.nama_kapal,
            jenis_kapal: model.jenis_kapal,
            pemilik: model.pemilik,
        }
    }
}

/// A child row together with its parent project, if the project exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Joined<M> {
    /// The child row
    pub row: M,
    /// Parent summary; `None` when `galangan_id` is unset or dangling
    pub parent: Option<ParentSummary>,
}

const fn order(descending: bool) -> Order {
    if descending { Order::Desc } else { Order::Asc }
}

/// Orders by `column`, then by primary key so rows written in the same instant keep
/// their insertion order.
fn ordered<E: EntityTrait>(query: Select<E>, column: E::Column, descending: bool) -> Select<E> {
    E::PrimaryKey::iter().fold(
        query.order_by(column, order(descending)),
        |query, key| query.order_by(key.into_column(), order(descending)),
    )
}

/// Reads every row of `E` ordered by one column.
///
/// An empty table is a valid, empty result.
pub async fn list<E, C>(db: &C, order_by: E::Column, descending: bool) -> Result<Vec<E::Model>>
where
    E: StoreEntity,
    C: ConnectionTrait,
{
    ordered(E::find(), order_by, descending)
        .all(db)
        .await
        .map_err(store_error(E::KIND, StoreAction::List))
}

/// Reads every row of a child entity joined with its parent project's summary fields.
///
/// Rows whose parent is missing are still returned, with `parent` set to `None`.
pub async fn list_with_parent<E, C>(
    db: &C,
    order_by: E::Column,
    descending: bool,
) -> Result<Vec<Joined<E::Model>>>
where
    E: StoreEntity + Related<galangan::Entity>,
    C: ConnectionTrait,
{
    let rows = ordered(E::find(), order_by, descending)
        .find_also_related(Galangan)
        .all(db)
        .await
        .map_err(store_error(E::KIND, StoreAction::List))?;

    Ok(rows
        .into_iter()
        .map(|(row, parent)| Joined {
            row,
            parent: parent.map(ParentSummary::from),
        })
        .collect())
}

/// Projects for the add-form picker, ordered by ship name.
pub async fn list_galangan_options<C: ConnectionTrait>(db: &C) -> Result<Vec<galangan::Model>> {
    list::<galangan::Entity, C>(db, galangan::Column::NamaKapal, false).await
}

fn required_text(entity: EntityKind, field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingField { entity, field });
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Clamps an amount into the stored domain: finite and non-negative, otherwise 0.
#[must_use]
pub fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// A validated project ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGalangan {
    nama_kapal: String,
    jenis_kapal: String,
    pemilik: String,
    nilai_kontrak: f64,
    status: galangan::ProjectStatus,
    tanggal_mulai: NaiveDate,
    tanggal_target: Option<NaiveDate>,
}

impl NewGalangan {
    /// Validates the required fields. The ship type must come from
    /// [`galangan::SHIP_TYPES`].
    pub fn new(
        nama_kapal: String,
        jenis_kapal: String,
        pemilik: String,
        tanggal_mulai: NaiveDate,
    ) -> Result<Self> {
        let entity = EntityKind::Galangan;
        let nama_kapal = required_text(entity, "nama_kapal", nama_kapal)?;
        let jenis_kapal = required_text(entity, "jenis_kapal", jenis_kapal)?;
        let pemilik = required_text(entity, "pemilik", pemilik)?;

        if !galangan::is_known_ship_type(&jenis_kapal) {
            return Err(Error::InvalidField {
                entity,
                field: "jenis_kapal".to_string(),
                reason: format!("unknown ship type '{jenis_kapal}'"),
            });
        }

        Ok(Self {
            nama_kapal,
            jenis_kapal,
            pemilik,
            nilai_kontrak: 0.0,
            status: galangan::ProjectStatus::default(),
            tanggal_mulai,
            tanggal_target: None,
        })
    }

    /// Sets the contract value; see [`sanitize_amount`].
    #[must_use]
    pub fn with_nilai_kontrak(mut self, nilai_kontrak: f64) -> Self {
        self.nilai_kontrak = sanitize_amount(nilai_kontrak);
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: galangan::ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the optional target date.
    #[must_use]
    pub const fn with_tanggal_target(mut self, tanggal_target: Option<NaiveDate>) -> Self {
        self.tanggal_target = tanggal_target;
        self
    }
}

/// A validated installment payment ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSetor {
    galangan_id: Option<i64>,
    jumlah: f64,
    tanggal_setor: NaiveDate,
    keterangan: Option<String>,
}

impl NewSetor {
    /// Builds a payment; the amount is sanitized.
    #[must_use]
    pub fn new(galangan_id: Option<i64>, jumlah: f64, tanggal_setor: NaiveDate) -> Self {
        Self {
            galangan_id,
            jumlah: sanitize_amount(jumlah),
            tanggal_setor,
            keterangan: None,
        }
    }

    /// Sets the note; blank notes are stored as null.
    #[must_use]
    pub fn with_keterangan(mut self, keterangan: Option<String>) -> Self {
        self.keterangan = optional_text(keterangan);
        self
    }
}

/// A validated settlement record ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLunas {
    galangan_id: Option<i64>,
    tanggal_lunas: NaiveDate,
    total_bayar: f64,
    sisa_bayar: Option<f64>,
    keterangan: Option<String>,
}

impl NewLunas {
    /// Builds a settlement; the total is sanitized.
    #[must_use]
    pub fn new(galangan_id: Option<i64>, total_bayar: f64, tanggal_lunas: NaiveDate) -> Self {
        Self {
            galangan_id,
            tanggal_lunas,
            total_bayar: sanitize_amount(total_bayar),
            sisa_bayar: None,
            keterangan: None,
        }
    }

    /// Sets the remaining balance as entered.
    #[must_use]
    pub fn with_sisa_bayar(mut self, sisa_bayar: Option<f64>) -> Self {
        self.sisa_bayar = sisa_bayar.map(sanitize_amount);
        self
    }

    /// Sets the note; blank notes are stored as null.
    #[must_use]
    pub fn with_keterangan(mut self, keterangan: Option<String>) -> Self {
        self.keterangan = optional_text(keterangan);
        self
    }
}

/// Any record the add forms can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum NewRecord {
    /// New project
    Galangan(NewGalangan),
    /// New installment payment
    Setor(NewSetor),
    /// New settlement record
    Lunas(NewLunas),
}

impl NewRecord {
    /// Entity the record belongs to.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Galangan(_) => EntityKind::Galangan,
            Self::Setor(_) => EntityKind::Setor,
            Self::Lunas(_) => EntityKind::Lunas,
        }
    }
}

/// Inserts a project. `id`, `created_at` and `updated_at` are assigned here.
pub async fn insert_galangan<C: ConnectionTrait>(
    db: &C,
    record: NewGalangan,
) -> Result<galangan::Model> {
    let now = Utc::now();
    let model = galangan::ActiveModel {
        nama_kapal: Set(record.nama_kapal),
        jenis_kapal: Set(record.jenis_kapal),
        pemilik: Set(record.pemilik),
        nilai_kontrak: Set(record.nilai_kontrak),
        status: Set(record.status.as_str().to_string()),
        tanggal_mulai: Set(record.tanggal_mulai),
        tanggal_target: Set(record.tanggal_target),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(store_error(EntityKind::Galangan, StoreAction::Insert))
}

/// Inserts an installment payment. Fails if `galangan_id` references no project.
pub async fn insert_setor<C: ConnectionTrait>(db: &C, record: NewSetor) -> Result<setor::Model> {
    let model = setor::ActiveModel {
        galangan_id: Set(record.galangan_id),
        jumlah: Set(record.jumlah),
        tanggal_setor: Set(record.tanggal_setor),
        keterangan: Set(record.keterangan),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(store_error(EntityKind::Setor, StoreAction::Insert))
}

/// Inserts a settlement record. Fails if `galangan_id` references no project.
pub async fn insert_lunas<C: ConnectionTrait>(db: &C, record: NewLunas) -> Result<lunas::Model> {
    let model = lunas::ActiveModel {
        galangan_id: Set(record.galangan_id),
        tanggal_lunas: Set(record.tanggal_lunas),
        total_bayar: Set(record.total_bayar),
        sisa_bayar: Set(record.sisa_bayar),
        keterangan: Set(record.keterangan),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(store_error(EntityKind::Lunas, StoreAction::Insert))
}

/// Inserts any record and returns the id the store assigned.
pub async fn insert<C: ConnectionTrait>(db: &C, record: NewRecord) -> Result<i64> {
    match record {
        NewRecord::Galangan(record) => insert_galangan(db, record).await.map(|model| model.id),
        NewRecord::Setor(record) => insert_setor(db, record).await.map(|model| model.id),
        NewRecord::Lunas(record) => insert_lunas(db, record).await.map(|model| model.id),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_list_empty_table_is_not_an_error() -> Result<()> {
        let db = setup_test_db().await?;
        let rows = list::<galangan::Entity, _>(&db, galangan::Column::CreatedAt, true).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_galangan_assigns_defaults() -> Result<()> {
        let db = setup_test_db().await?;
        let record = NewGalangan::new(
            "KM Test".to_string(),
            "Kapal Cargo".to_string(),
            "PT X".to_string(),
            date(2024, 1, 10),
        )?;
        let stored = insert_galangan(&db, record).await?;

        assert!(stored.id > 0);
        assert_eq!(stored.status, "ongoing");
        assert_eq!(stored.nilai_kontrak, 0.0);
        assert_eq!(stored.tanggal_target, None);
        assert_eq!(stored.created_at, stored.updated_at);
        Ok(())
    }

    #[test]
    fn test_new_galangan_rejects_blank_required_fields() {
        let result = NewGalangan::new(
            "   ".to_string(),
            "Kapal Cargo".to_string(),
            "PT X".to_string(),
            date(2024, 1, 10),
        );
        assert!(matches!(
            result,
            Err(Error::MissingField {
                field: "nama_kapal",
                ..
            })
        ));
    }

    #[test]
    fn test_new_galangan_rejects_unknown_ship_type() {
        let result = NewGalangan::new(
            "KM Test".to_string(),
            "Kapal Selam".to_string(),
            "PT X".to_string(),
            date(2024, 1, 10),
        );
        assert!(matches!(result, Err(Error::InvalidField { .. })));
    }

    #[test]
    fn test_sanitize_amount() {
        assert_eq!(sanitize_amount(1500.5), 1500.5);
        assert_eq!(sanitize_amount(-10.0), 0.0);
        assert_eq!(sanitize_amount(f64::NAN), 0.0);
        assert_eq!(sanitize_amount(f64::INFINITY), 0.0);
    }

    #[tokio::test]
    async fn test_list_orders_by_requested_column() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_galangan(&db, "KM Zamrud").await?;
        create_test_galangan(&db, "KM Bahari").await?;
        create_test_galangan(&db, "KM Mutiara").await?;

        let by_name = list_galangan_options(&db).await?;
        let names: Vec<_> = by_name.iter().map(|g| g.nama_kapal.as_str()).collect();
        assert_eq!(names, ["KM Bahari", "KM Mutiara", "KM Zamrud"]);

        let newest_first =
            list::<galangan::Entity, _>(&db, galangan::Column::CreatedAt, true).await?;
        assert_eq!(newest_first[0].nama_kapal, "KM Mutiara");
        assert_eq!(newest_first[2].nama_kapal, "KM Zamrud");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_with_parent_embeds_project_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_galangan(&db, "KM Test").await?;
        create_test_setor(&db, Some(project.id), 500_000.0).await?;

        let rows = list_with_parent::<setor::Entity, _>(&db, setor::Column::CreatedAt, true).await?;
        assert_eq!(rows.len(), 1);
        let parent = rows[0].parent.as_ref().unwrap();
        assert_eq!(parent.nama_kapal, "KM Test");
        assert_eq!(parent.jenis_kapal, "Kapal Cargo");
        assert_eq!(parent.pemilik, "PT Test");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_with_parent_keeps_orphan_rows() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_lunas(&db, None, 100.0).await?;

        let rows = list_with_parent::<lunas::Entity, _>(&db, lunas::Column::CreatedAt, true).await?;
        assert_eq!(rows.len(), 1);
        assert!(rows[0].parent.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_child_with_unknown_parent_is_store_error() -> Result<()> {
        let db = setup_test_db().await?;
        let result = insert_setor(&db, NewSetor::new(Some(9999), 10.0, date(2024, 2, 1))).await;
        assert!(matches!(
            result,
            Err(Error::Store {
                entity: EntityKind::Setor,
                action: StoreAction::Insert,
                ..
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_note_is_stored_as_null() -> Result<()> {
        let db = setup_test_db().await?;
        let record = NewLunas::new(None, 10.0, date(2024, 3, 1))
            .with_keterangan(Some("  ".to_string()))
            .with_sisa_bayar(Some(-5.0));
        let stored = insert_lunas(&db, record).await?;
        assert_eq!(stored.keterangan, None);
        assert_eq!(stored.sisa_bayar, Some(0.0));
        Ok(())
    }
}
