//! Navigation shell - which section is active and whether its add form is open.
//!
//! Selecting a section always closes the form. Only entity sections have a form; the
//! dashboard ignores requests to open one. The open form carries its draft, so closing
//! it is the only way the draft is discarded.

use crate::core::{EntityKind, form::AddForm};
use chrono::NaiveDate;

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    /// Summary view
    #[default]
    Dashboard,
    /// Shipyard projects
    Galangan,
    /// Installment payments
    Setor,
    /// Settlement records
    Lunas,
}

impl Section {
    /// Menu order.
    pub const ALL: [Self; 4] = [Self::Dashboard, Self::Galangan, Self::Setor, Self::Lunas];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Galangan => "Galangan",
            Self::Setor => "Setor",
            Self::Lunas => "Lunas",
        }
    }

    /// Entity listed by the section; `None` for the dashboard.
    #[must_use]
    pub const fn entity(self) -> Option<EntityKind> {
        match self {
            Self::Dashboard => None,
            Self::Galangan => Some(EntityKind::Galangan),
            Self::Setor => Some(EntityKind::Setor),
            Self::Lunas => Some(EntityKind::Lunas),
        }
    }
}

impl From<EntityKind> for Section {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Galangan => Self::Galangan,
            EntityKind::Setor => Self::Setor,
            EntityKind::Lunas => Self::Lunas,
        }
    }
}

/// What the shell renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Dashboard summary
    Dashboard,
    /// List of an entity
    List(EntityKind),
    /// Add form of an entity
    Form(EntityKind),
}

/// Navigation state of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shell {
    active: Section,
    form: Option<AddForm>,
}

impl Shell {
    /// Starts on the dashboard with no form open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active section.
    #[must_use]
    pub const fn active(&self) -> Section {
        self.active
    }

    /// Whether the add form is shown instead of the list.
    #[must_use]
    pub const fn form_open(&self) -> bool {
        self.form.is_some()
    }

    /// Switches section. Any open form is closed and its draft discarded.
    pub fn select(&mut self, section: Section) {
        self.active = section;
        self.form = None;
    }

    /// Opens the add form of the active section, keeping a draft that is already open.
    ///
    /// Returns `None` on the dashboard, which has no form.
    pub fn open_form(&mut self, today: NaiveDate) -> Option<&mut AddForm> {
        let entity = self.active.entity()?;
        Some(self.form.get_or_insert_with(|| AddForm::new(entity, today)))
    }

    /// The open form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&AddForm> {
        self.form.as_ref()
    }

    /// Mutable access to the open form.
    pub const fn form_mut(&mut self) -> Option<&mut AddForm> {
        self.form.as_mut()
    }

    /// Closes the form (cancel or successful save) and returns to the list.
    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// What should be rendered now.
    #[must_use]
    pub const fn view(&self) -> View {
        match (self.active.entity(), self.form.is_some()) {
            (None, _) => View::Dashboard,
            (Some(entity), false) => View::List(entity),
            (Some(entity), true) => View::Form(entity),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_starts_on_dashboard() {
        let shell = Shell::new();
        assert_eq!(shell.active(), Section::Dashboard);
        assert!(!shell.form_open());
        assert_eq!(shell.view(), View::Dashboard);
    }

    #[test]
    fn test_dashboard_has_no_form() {
        let mut shell = Shell::new();
        assert!(shell.open_form(date(2024, 1, 1)).is_none());
        assert!(!shell.form_open());
        assert_eq!(shell.view(), View::Dashboard);
    }

    #[test]
    fn test_open_and_close_form() {
        let mut shell = Shell::new();
        shell.select(Section::Setor);
        assert_eq!(shell.view(), View::List(EntityKind::Setor));

        let form = shell.open_form(date(2024, 1, 1)).unwrap();
        assert_eq!(form.entity(), EntityKind::Setor);
        assert_eq!(shell.view(), View::Form(EntityKind::Setor));

        shell.close_form();
        assert_eq!(shell.view(), View::List(EntityKind::Setor));
    }

    #[test]
    fn test_selecting_section_resets_form() {
        let mut shell = Shell::new();
        shell.select(Section::Galangan);
        shell.open_form(date(2024, 1, 1)).unwrap();

        shell.select(Section::Lunas);
        assert!(!shell.form_open());
        assert_eq!(shell.view(), View::List(EntityKind::Lunas));

        // Re-selecting the same section also closes the form
        shell.open_form(date(2024, 1, 1)).unwrap();
        shell.select(Section::Lunas);
        assert!(!shell.form_open());
    }

    #[test]
    fn test_reopening_keeps_draft() -> crate::errors::Result<()> {
        let mut shell = Shell::new();
        shell.select(Section::Galangan);
        shell.open_form(date(2024, 1, 1)).unwrap().set("nama_kapal", "KM Test")?;

        let form = shell.open_form(date(2024, 1, 2)).unwrap();
        assert_eq!(form.draft().get("nama_kapal"), Some("KM Test"));
        assert_eq!(
            shell.form_mut().unwrap().draft().get("nama_kapal"),
            Some("KM Test")
        );
        Ok(())
    }

    #[test]
    fn test_section_entity_mapping() {
        for section in Section::ALL {
            if let Some(entity) = section.entity() {
                assert_eq!(Section::from(entity), section);
            }
        }
        assert_eq!(Section::Lunas.label(), "Lunas");
    }
}
