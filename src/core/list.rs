//! List views - fetch through the query cache and render rows into view models.
//!
//! Galangan rows are listed newest first; Setor and Lunas rows are listed newest first
//! joined with their parent project. Rendering is pure: a [`Listing`] becomes either an
//! [`EmptyState`] or a [`ListPage`] of display-ready items.

use crate::{
    core::{
        EntityKind,
        cache::{QueryCache, Subscription},
        format::{StatusBadge, format_currency, format_date, status_badge},
        store::{self, Joined, ParentSummary},
    },
    entities::{galangan, lunas, setor},
    errors::Result,
};
use sea_orm::ConnectionTrait;
use std::sync::Weak;
use tracing::{debug, error, warn};

/// Title used when a child row's project no longer exists.
pub const MISSING_PARENT_LABEL: &str = "Shipyard project not found";

/// Rows of one entity as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    /// Projects, newest first
    Galangan(Vec<galangan::Model>),
    /// Payments with their project, newest first
    Setor(Vec<Joined<setor::Model>>),
    /// Settlements with their project, newest first
    Lunas(Vec<Joined<lunas::Model>>),
}

impl Listing {
    /// Entity the rows belong to.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Galangan(_) => EntityKind::Galangan,
            Self::Setor(_) => EntityKind::Setor,
            Self::Lunas(_) => EntityKind::Lunas,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Galangan(rows) => rows.len(),
            Self::Setor(rows) => rows.len(),
            Self::Lunas(rows) => rows.len(),
        }
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs the list query for `kind`.
pub async fn fetch_listing<C: ConnectionTrait>(db: &C, kind: EntityKind) -> Result<Listing> {
    match kind {
        EntityKind::Galangan => {
            store::list::<galangan::Entity, C>(db, galangan::Column::CreatedAt, true)
                .await
                .map(Listing::Galangan)
        }
        EntityKind::Setor => {
            store::list_with_parent::<setor::Entity, C>(db, setor::Column::CreatedAt, true)
                .await
                .map(Listing::Setor)
        }
        EntityKind::Lunas => {
            store::list_with_parent::<lunas::Entity, C>(db, lunas::Column::CreatedAt, true)
                .await
                .map(Listing::Lunas)
        }
    }
}

/// Heading of a list section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListHeader {
    /// Section title
    pub title: &'static str,
    /// One-line description
    pub subtitle: &'static str,
    /// Label of the add action
    pub add_label: &'static str,
}

impl ListHeader {
    /// Header for `kind`.
    #[must_use]
    pub const fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Galangan => Self {
                title: "Data Galangan",
                subtitle: "Manage shipyard projects",
                add_label: "Add Galangan",
            },
            EntityKind::Setor => Self {
                title: "Data Setor",
                subtitle: "Manage installment payments",
                add_label: "Add Setor",
            },
            EntityKind::Lunas => Self {
                title: "Data Lunas",
                subtitle: "Manage settlement records",
                add_label: "Add Lunas",
            },
        }
    }
}

/// Call to action shown when a list has no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Section heading
    pub header: ListHeader,
    /// Empty-state title
    pub heading: &'static str,
    /// Hint pointing at the add action
    pub hint: &'static str,
}

impl EmptyState {
    /// Empty state for `kind`.
    #[must_use]
    pub const fn for_kind(kind: EntityKind) -> Self {
        let (heading, hint) = match kind {
            EntityKind::Galangan => ("No galangan data yet", "Add your first shipyard project"),
            EntityKind::Setor => ("No setor data yet", "Record your first installment payment"),
            EntityKind::Lunas => ("No lunas data yet", "Record your first settlement"),
        };
        Self {
            header: ListHeader::for_kind(kind),
            heading,
            hint,
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Row title
    pub title: String,
    /// Secondary line, if any
    pub subtitle: Option<String>,
    /// Status badge (projects only)
    pub badge: Option<StatusBadge>,
    /// Labelled values in display order
    pub fields: Vec<(&'static str, String)>,
}

/// A rendered, non-empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    /// Section heading
    pub header: ListHeader,
    /// Rows in display order
    pub items: Vec<ListItem>,
}

fn galangan_item(row: &galangan::Model) -> ListItem {
    let mut fields = vec![
        ("Owner", row.pemilik.clone()),
        ("Contract value", format_currency(row.nilai_kontrak)),
        ("Start", format_date(row.tanggal_mulai)),
    ];
    if let Some(target) = row.tanggal_target {
        fields.push(("Target", format_date(target)));
    }
    ListItem {
        title: row.nama_kapal.clone(),
        subtitle: Some(row.jenis_kapal.clone()),
        badge: Some(status_badge(&row.status)),
        fields,
    }
}

fn parent_title(parent: Option<&ParentSummary>) -> (String, Option<String>) {
    parent.map_or_else(
        || (MISSING_PARENT_LABEL.to_string(), None),
        |p| {
            (
                p.nama_kapal.clone(),
                Some(format!("{} - {}", p.jenis_kapal, p.pemilik)),
            )
        },
    )
}

fn setor_item(joined: &Joined<setor::Model>) -> ListItem {
    let (title, subtitle) = parent_title(joined.parent.as_ref());
    let row = &joined.row;
    let mut fields = vec![
        ("Amount", format_currency(row.jumlah)),
        ("Date", format_date(row.tanggal_setor)),
    ];
    if let Some(note) = &row.keterangan {
        fields.push(("Note", note.clone()));
    }
    ListItem {
        title,
        subtitle,
        badge: None,
        fields,
    }
}

fn lunas_item(joined: &Joined<lunas::Model>) -> ListItem {
    let (title, subtitle) = parent_title(joined.parent.as_ref());
    let row = &joined.row;
    let mut fields = vec![("Total paid", format_currency(row.total_bayar))];
    if let Some(remaining) = row.sisa_bayar.filter(|amount| *amount > 0.0) {
        fields.push(("Remaining", format_currency(remaining)));
    }
    fields.push(("Settled on", format_date(row.tanggal_lunas)));
    if let Some(note) = &row.keterangan {
        fields.push(("Note", note.clone()));
    }
    ListItem {
        title,
        subtitle,
        badge: None,
        fields,
    }
}

/// What a list view currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// First fetch still outstanding
    Loading,
    /// Fetch succeeded with zero rows
    Empty(EmptyState),
    /// Fetch succeeded with rows
    Ready(ListPage),
    /// Fetch failed; `stale` is the last successful result, clearly not fresh
    Failed {
        /// Error description
        message: String,
        /// Last known rows, if any were ever loaded
        stale: Option<ListPage>,
    },
}

/// Renders a listing into a page, or its empty state.
#[must_use]
pub fn render(listing: &Listing) -> ListState {
    let kind = listing.kind();
    if listing.is_empty() {
        return ListState::Empty(EmptyState::for_kind(kind));
    }
    let items = match listing {
        Listing::Galangan(rows) => rows.iter().map(galangan_item).collect(),
        Listing::Setor(rows) => rows.iter().map(setor_item).collect(),
        Listing::Lunas(rows) => rows.iter().map(lunas_item).collect(),
    };
    ListState::Ready(ListPage {
        header: ListHeader::for_kind(kind),
        items,
    })
}

/// A mounted list for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    kind: EntityKind,
    state: ListState,
}

impl ListView {
    /// A list that has not fetched yet.
    #[must_use]
    pub const fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            state: ListState::Loading,
        }
    }

    /// Entity shown.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Reads through the cache and renders the result.
    pub async fn load<C: ConnectionTrait>(
        &mut self,
        db: &C,
        cache: &QueryCache<Listing>,
    ) -> &ListState {
        let kind = self.kind;
        self.state = match cache.read(kind, || fetch_listing(db, kind)).await {
            Ok(listing) => render(&listing),
            Err(error) => {
                error!(entity = %kind, %error, "failed to load list");
                let stale = match cache.last_known(kind).await.as_deref().map(render) {
                    Some(ListState::Ready(page)) => Some(page),
                    _ => None,
                };
                ListState::Failed {
                    message: error.to_string(),
                    stale,
                }
            }
        };
        &self.state
    }
}

/// Re-fetches the subscribed entity's list after every invalidation, keeping the cache
/// warm for the next reader. Ends when the cache is dropped.
pub async fn refresh_on_invalidate<C: ConnectionTrait>(
    db: C,
    cache: Weak<QueryCache<Listing>>,
    mut subscription: Subscription,
) {
    let kind = subscription.key();
    while subscription.invalidated().await {
        let Some(cache) = cache.upgrade() else {
            break;
        };
        match cache.read(kind, || fetch_listing(&db, kind)).await {
            Ok(listing) => debug!(entity = %kind, rows = listing.len(), "list refreshed"),
            Err(error) => warn!(entity = %kind, %error, "background refresh failed"),
        }
    }
    debug!(entity = %kind, "refresh task stopped");
}
