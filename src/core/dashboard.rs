//! Dashboard summary computed from live store queries.

use crate::{
    core::{
        EntityKind,
        format::{StatusBadge, status_badge},
        store::store_error,
    },
    entities::{Galangan, Lunas, Setor, galangan, lunas},
    errors::{Result, StoreAction},
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::Query,
};
use tracing::debug;

/// Number of newest projects shown on the dashboard.
pub const RECENT_LIMIT: u64 = 3;

/// One line of the recent projects list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentProject {
    /// Ship name
    pub nama_kapal: String,
    /// Ship type
    pub jenis_kapal: String,
    /// Owner
    pub pemilik: String,
    /// Status badge
    pub badge: StatusBadge,
}

impl From<galangan::Model> for RecentProject {
    fn from(model: galangan::Model) -> Self {
        let badge = status_badge(&model.status);
        Self {
            nama_kapal: model.nama_kapal,
            jenis_kapal: model.jenis_kapal,
            pemilik: model.pemilik,
            badge,
        }
    }
}

/// Aggregate counts and the newest projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Number of shipyard projects
    pub total_galangan: u64,
    /// Number of installment payments
    pub total_setor: u64,
    /// Projects without any settlement record
    pub belum_lunas: u64,
    /// Newest projects first, at most [`RECENT_LIMIT`]
    pub recent: Vec<RecentProject>,
}

/// Computes the dashboard from the current store contents.
///
/// A project counts as unsettled while no `lunas` row references it.
pub async fn load_summary<C: ConnectionTrait>(db: &C) -> Result<DashboardSummary> {
    let total_galangan = Galangan::find()
        .count(db)
        .await
        .map_err(store_error(EntityKind::Galangan, StoreAction::List))?;
    let total_setor = Setor::find()
        .count(db)
        .await
        .map_err(store_error(EntityKind::Setor, StoreAction::List))?;

    let settled = Query::select()
        .column(lunas::Column::GalanganId)
        .from(Lunas)
        .and_where(lunas::Column::GalanganId.is_not_null())
        .to_owned();
    let belum_lunas = Galangan::find()
        .filter(galangan::Column::Id.not_in_subquery(settled))
        .count(db)
        .await
        .map_err(store_error(EntityKind::Lunas, StoreAction::List))?;

    let recent = Galangan::find()
        .order_by_desc(galangan::Column::CreatedAt)
        .order_by_desc(galangan::Column::Id)
        .limit(RECENT_LIMIT)
        .all(db)
        .await
        .map_err(store_error(EntityKind::Galangan, StoreAction::List))?
        .into_iter()
        .map(RecentProject::from)
        .collect();

    debug!(total_galangan, total_setor, belum_lunas, "dashboard summary loaded");
    Ok(DashboardSummary {
        total_galangan,
        total_setor,
        belum_lunas,
        recent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::format::BadgeColor, test_utils::*};

    #[tokio::test]
    async fn test_empty_store() -> Result<()> {
        let db = setup_test_db().await?;
        let summary = load_summary(&db).await?;
        assert_eq!(summary.total_galangan, 0);
        assert_eq!(summary.total_setor, 0);
        assert_eq!(summary.belum_lunas, 0);
        assert!(summary.recent.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_counts_follow_store() -> Result<()> {
        let db = setup_test_db().await?;
        let settled = create_test_galangan(&db, "KM Satu").await?;
        let open = create_test_galangan(&db, "KM Dua").await?;
        create_test_galangan(&db, "KM Tiga").await?;

        create_test_setor(&db, Some(open.id), 1_000_000.0).await?;
        create_test_setor(&db, Some(open.id), 500_000.0).await?;
        create_test_lunas(&db, Some(settled.id), 2_000_000.0).await?;
        // Unlinked settlement settles nothing
        create_test_lunas(&db, None, 100.0).await?;

        let summary = load_summary(&db).await?;
        assert_eq!(summary.total_galangan, 3);
        assert_eq!(summary.total_setor, 2);
        assert_eq!(summary.belum_lunas, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_shows_newest_three_with_badges() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_galangan(&db, "KM A", 1.0, "ongoing").await?;
        create_custom_galangan(&db, "KM B", 1.0, "completed").await?;
        create_custom_galangan(&db, "KM C", 1.0, "cancelled").await?;
        create_custom_galangan(&db, "KM D", 1.0, "ongoing").await?;

        let summary = load_summary(&db).await?;
        let names: Vec<_> = summary.recent.iter().map(|p| p.nama_kapal.as_str()).collect();
        assert_eq!(names, ["KM D", "KM C", "KM B"]);
        assert_eq!(summary.recent[1].badge.label, "Cancelled");
        assert_eq!(summary.recent[2].badge.color, BadgeColor::Green);
        Ok(())
    }
}
