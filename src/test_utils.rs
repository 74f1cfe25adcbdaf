//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and inserting rows with sensible
//! defaults through the regular store functions.

#![allow(clippy::unwrap_used)]

use crate::{
    core::store::{self, NewGalangan, NewLunas, NewSetor},
    entities::{galangan, lunas, setor},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for a valid calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates a test project with sensible defaults.
///
/// # Defaults
/// * `jenis_kapal`: "Kapal Cargo"
/// * `pemilik`: "PT Test"
/// * `nilai_kontrak`: 0
/// * `status`: ongoing
/// * `tanggal_mulai`: 2024-01-10
pub async fn create_test_galangan(
    db: &DatabaseConnection,
    nama_kapal: &str,
) -> Result<galangan::Model> {
    let record = NewGalangan::new(
        nama_kapal.to_string(),
        "Kapal Cargo".to_string(),
        "PT Test".to_string(),
        date(2024, 1, 10),
    )?;
    store::insert_galangan(db, record).await
}

/// Creates a test project with a custom contract value and status.
///
/// `status` must be a known status value.
pub async fn create_custom_galangan(
    db: &DatabaseConnection,
    nama_kapal: &str,
    nilai_kontrak: f64,
    status: &str,
) -> Result<galangan::Model> {
    let record = NewGalangan::new(
        nama_kapal.to_string(),
        "Kapal Cargo".to_string(),
        "PT Test".to_string(),
        date(2024, 1, 10),
    )?
    .with_nilai_kontrak(nilai_kontrak)
    .with_status(galangan::ProjectStatus::parse(status).unwrap());
    store::insert_galangan(db, record).await
}

/// Creates a test installment payment dated 2024-02-01.
pub async fn create_test_setor(
    db: &DatabaseConnection,
    galangan_id: Option<i64>,
    jumlah: f64,
) -> Result<setor::Model> {
    store::insert_setor(db, NewSetor::new(galangan_id, jumlah, date(2024, 2, 1))).await
}

/// Creates a test settlement dated 2024-06-01 with no remaining balance.
pub async fn create_test_lunas(
    db: &DatabaseConnection,
    galangan_id: Option<i64>,
    total_bayar: f64,
) -> Result<lunas::Model> {
    store::insert_lunas(db, NewLunas::new(galangan_id, total_bayar, date(2024, 6, 1))).await
}
