//! Seed projects loaded from config.toml
//!
//! The `[[galangan]]` tables of config.toml describe projects to insert on first run.
//! They are only written when the `galangan` table is empty, so editing the file later
//! never duplicates or overwrites rows.
//!
//! Dates are quoted `YYYY-MM-DD` strings.

use crate::{
    core::store::{NewGalangan, insert_galangan},
    entities::{Galangan, galangan::ProjectStatus},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the seed file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct SeedConfig {
    /// Projects to insert into an empty store
    #[serde(default)]
    pub galangan: Vec<SeedGalangan>,
}

/// One seeded project
#[derive(Debug, Deserialize, Clone)]
pub struct SeedGalangan {
    /// Ship name
    pub nama_kapal: String,
    /// Ship type, one of the known ship types
    pub jenis_kapal: String,
    /// Owner
    pub pemilik: String,
    /// Contract value; zero when omitted
    #[serde(default)]
    pub nilai_kontrak: f64,
    /// Initial status; `ongoing` when omitted
    #[serde(default)]
    pub status: ProjectStatus,
    /// Start date
    pub tanggal_mulai: NaiveDate,
    /// Optional target completion date
    #[serde(default)]
    pub tanggal_target: Option<NaiveDate>,
}

impl SeedGalangan {
    fn into_record(self) -> Result<NewGalangan> {
        Ok(
            NewGalangan::new(self.nama_kapal, self.jenis_kapal, self.pemilik, self.tanggal_mulai)?
                .with_nilai_kontrak(self.nilai_kontrak)
                .with_status(self.status)
                .with_tanggal_target(self.tanggal_target),
        )
    }
}

/// Loads the seed configuration from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or is not valid TOML for
/// [`SeedConfig`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the seed configuration from ./config.toml. A missing file means nothing to seed.
pub fn load_default_config() -> Result<SeedConfig> {
    if !Path::new(DEFAULT_CONFIG_PATH).exists() {
        debug!("no {DEFAULT_CONFIG_PATH}, skipping seed data");
        return Ok(SeedConfig::default());
    }
    load_config(DEFAULT_CONFIG_PATH)
}

/// Inserts the configured projects if the `galangan` table is empty.
///
/// Every entry is validated before anything is written and all rows go in one
/// transaction. Returns the number of rows inserted.
pub async fn seed_if_empty(db: &DatabaseConnection, config: &SeedConfig) -> Result<usize> {
    if config.galangan.is_empty() {
        return Ok(0);
    }

    let existing = Galangan::find().count(db).await?;
    if existing > 0 {
        debug!(existing, "galangan table not empty, skipping seed");
        return Ok(0);
    }

    let records = config
        .galangan
        .iter()
        .cloned()
        .map(SeedGalangan::into_record)
        .collect::<Result<Vec<_>>>()?;

    let txn = db.begin().await?;
    for record in records {
        insert_galangan(&txn, record).await?;
    }
    txn.commit().await?;

    info!(count = config.galangan.len(), "seeded galangan projects");
    Ok(config.galangan.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    const SAMPLE: &str = r#"
        [[galangan]]
        nama_kapal = "KM Bahari"
        jenis_kapal = "Kapal Cargo"
        pemilik = "PT Samudra"
        nilai_kontrak = 1500000000.0
        tanggal_mulai = "2024-01-10"
        tanggal_target = "2024-12-31"

        [[galangan]]
        nama_kapal = "KM Nelayan"
        jenis_kapal = "Kapal Ikan"
        pemilik = "Koperasi Nelayan"
        status = "completed"
        tanggal_mulai = "2023-03-01"
    "#;

    #[test]
    fn test_parse_seed_config() {
        let config: SeedConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.galangan.len(), 2);

        let first = &config.galangan[0];
        assert_eq!(first.nama_kapal, "KM Bahari");
        assert_eq!(first.nilai_kontrak, 1_500_000_000.0);
        assert_eq!(first.status, ProjectStatus::Ongoing);
        assert_eq!(first.tanggal_target, Some(date(2024, 12, 31)));

        let second = &config.galangan[1];
        assert_eq!(second.nilai_kontrak, 0.0);
        assert_eq!(second.status, ProjectStatus::Completed);
        assert_eq!(second.tanggal_target, None);
    }

    #[test]
    fn test_empty_file_has_no_projects() {
        let config: SeedConfig = toml::from_str("").unwrap();
        assert!(config.galangan.is_empty());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_seed_only_into_empty_table() -> Result<()> {
        let db = setup_test_db().await?;
        let config: SeedConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(seed_if_empty(&db, &config).await?, 2);
        assert_eq!(seed_if_empty(&db, &config).await?, 0);
        assert_eq!(Galangan::find().count(&db).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_entry_writes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let mut config: SeedConfig = toml::from_str(SAMPLE).unwrap();
        config.galangan[1].jenis_kapal = "Kapal Selam".to_string();

        let result = seed_if_empty(&db, &config).await;
        assert!(matches!(result, Err(Error::InvalidField { .. })));
        assert_eq!(Galangan::find().count(&db).await?, 0);
        Ok(())
    }
}
