//! Add forms - one generic draft/submit flow instantiated for each entity.
//!
//! A draft holds every field of the form as text, keyed by field name. Submitting
//! checks required fields, coerces numbers and dates, and inserts the row. Malformed
//! numbers coerce to 0 instead of failing. On success the entity's cached list is
//! invalidated; on failure the draft is left exactly as the user typed it.

use crate::{
    core::{
        EntityKind,
        cache::QueryCache,
        store::{self, NewGalangan, NewLunas, NewRecord, NewSetor},
    },
    entities::galangan::{self, ProjectStatus},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::ConnectionTrait;
use std::collections::BTreeMap;
use tracing::{error, info};

/// Input format of date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const STATUS_VALUES: [&str; 3] = ["ongoing", "completed", "cancelled"];

/// How a field's text is interpreted on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Amount, coerced leniently
    Number,
    /// `YYYY-MM-DD`
    Date,
    /// One of a fixed list of values
    Choice(&'static [&'static str]),
    /// Id of a Galangan row
    Reference,
}

/// Initial value of a field in a new draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// Empty string
    Empty,
    /// The date the form was opened
    Today,
    /// A fixed value
    Value(&'static str),
}

/// One field of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column name, also the draft key
    pub name: &'static str,
    /// Label shown to the user
    pub label: &'static str,
    /// Interpretation on submit
    pub kind: FieldKind,
    /// Whether an empty value blocks submission
    pub required: bool,
    /// Initial value
    pub default: FieldDefault,
}

/// The fields of one entity's add form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    /// Entity the form inserts
    pub entity: EntityKind,
    /// Form heading
    pub title: &'static str,
    /// Fields in display order
    pub fields: &'static [FieldSpec],
}

const fn field(
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
    default: FieldDefault,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required,
        default,
    }
}

/// Add form for shipyard projects.
pub const GALANGAN_FORM: FormSchema = FormSchema {
    entity: EntityKind::Galangan,
    title: "New Galangan",
    fields: &[
        field("nama_kapal", "Ship name", FieldKind::Text, true, FieldDefault::Empty),
        field(
            "jenis_kapal",
            "Ship type",
            FieldKind::Choice(&galangan::SHIP_TYPES),
            true,
            FieldDefault::Empty,
        ),
        field("pemilik", "Owner", FieldKind::Text, true, FieldDefault::Empty),
        field("nilai_kontrak", "Contract value (Rp)", FieldKind::Number, false, FieldDefault::Empty),
        field("tanggal_mulai", "Start date", FieldKind::Date, true, FieldDefault::Empty),
        field("tanggal_target", "Target date", FieldKind::Date, false, FieldDefault::Empty),
        field(
            "status",
            "Status",
            FieldKind::Choice(&STATUS_VALUES),
            false,
            FieldDefault::Value("ongoing"),
        ),
    ],
};

/// Add form for installment payments.
pub const SETOR_FORM: FormSchema = FormSchema {
    entity: EntityKind::Setor,
    title: "New Setor",
    fields: &[
        field("galangan_id", "Galangan", FieldKind::Reference, true, FieldDefault::Empty),
        field("jumlah", "Amount (Rp)", FieldKind::Number, true, FieldDefault::Empty),
        field("tanggal_setor", "Payment date", FieldKind::Date, true, FieldDefault::Today),
        field("keterangan", "Note", FieldKind::Text, false, FieldDefault::Empty),
    ],
};

/// Add form for settlement records.
pub const LUNAS_FORM: FormSchema = FormSchema {
    entity: EntityKind::Lunas,
    title: "New Lunas",
    fields: &[
        field("galangan_id", "Galangan", FieldKind::Reference, true, FieldDefault::Empty),
        field("tanggal_lunas", "Settlement date", FieldKind::Date, true, FieldDefault::Today),
        field("total_bayar", "Total paid (Rp)", FieldKind::Number, true, FieldDefault::Empty),
        field("sisa_bayar", "Remaining (Rp)", FieldKind::Number, false, FieldDefault::Empty),
        field("keterangan", "Note", FieldKind::Text, false, FieldDefault::Empty),
    ],
};

impl FormSchema {
    /// Schema of the add form for `entity`.
    #[must_use]
    pub const fn for_kind(entity: EntityKind) -> &'static Self {
        match entity {
            EntityKind::Galangan => &GALANGAN_FORM,
            EntityKind::Setor => &SETOR_FORM,
            EntityKind::Lunas => &LUNAS_FORM,
        }
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

/// Coerces amount text to a number using its longest leading numeric prefix, so
/// `"12abc"` reads as 12 and `"1.500.000"` as 1.5. Text without a numeric prefix,
/// negative and non-finite values become 0.
#[must_use]
pub fn coerce_number(text: &str) -> f64 {
    let text = text.trim();
    text[..numeric_prefix_len(text)]
        .parse::<f64>()
        .map_or(0.0, store::sanitize_amount)
}

/// Length of the leading `[+-]digits[.digits][e[+-]digits]` run of `text`.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = digits_from(end);
    end += integer;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if integer > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer == 0 && fraction == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits_from(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }
    end
}

/// The text values of a form being filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    schema: &'static FormSchema,
    values: BTreeMap<&'static str, String>,
}

impl Draft {
    /// Creates a draft with every field at its default.
    #[must_use]
    pub fn new(schema: &'static FormSchema, today: NaiveDate) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|spec| {
                let value = match spec.default {
                    FieldDefault::Empty => String::new(),
                    FieldDefault::Today => today.format(DATE_FORMAT).to_string(),
                    FieldDefault::Value(value) => value.to_string(),
                };
                (spec.name, value)
            })
            .collect();
        Self { schema, values }
    }

    /// Schema the draft was created from.
    #[must_use]
    pub const fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    /// Current text of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Replaces one field's text. Unknown field names are rejected.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let spec = self.schema.field(field).ok_or_else(|| Error::InvalidField {
            entity: self.schema.entity,
            field: field.to_string(),
            reason: "no such field".to_string(),
        })?;
        self.values.insert(spec.name, value.into());
        Ok(())
    }

    fn text(&self, field: &'static str) -> &str {
        self.get(field).map_or("", str::trim)
    }

    /// First required field that is still blank.
    #[must_use]
    pub fn first_missing(&self) -> Option<&'static str> {
        self.schema
            .fields
            .iter()
            .find(|spec| spec.required && self.text(spec.name).is_empty())
            .map(|spec| spec.name)
    }

    fn invalid(&self, field: &str, reason: String) -> Error {
        Error::InvalidField {
            entity: self.schema.entity,
            field: field.to_string(),
            reason,
        }
    }

    fn optional_date(&self, field: &'static str) -> Result<Option<NaiveDate>> {
        let text = self.text(field);
        if text.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Some)
            .map_err(|e| self.invalid(field, format!("expected YYYY-MM-DD: {e}")))
    }

    fn date(&self, field: &'static str) -> Result<NaiveDate> {
        self.optional_date(field)?.ok_or(Error::MissingField {
            entity: self.schema.entity,
            field,
        })
    }

    fn optional_number(&self, field: &'static str) -> Option<f64> {
        let text = self.text(field);
        (!text.is_empty()).then(|| coerce_number(text))
    }

    fn reference(&self, field: &'static str) -> Result<Option<i64>> {
        let text = self.text(field);
        if text.is_empty() {
            return Ok(None);
        }
        text.parse::<i64>()
            .map(Some)
            .map_err(|_| self.invalid(field, format!("'{text}' is not a galangan id")))
    }

    fn optional_text(&self, field: &'static str) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    fn check_choices(&self) -> Result<()> {
        for spec in self.schema.fields {
            if let FieldKind::Choice(options) = spec.kind {
                let text = self.text(spec.name);
                if !text.is_empty() && !options.contains(&text) {
                    return Err(self.invalid(spec.name, format!("'{text}' is not an option")));
                }
            }
        }
        Ok(())
    }

    /// Validates and coerces the draft into an insertable record.
    pub fn build(&self) -> Result<NewRecord> {
        if let Some(field) = self.first_missing() {
            return Err(Error::MissingField {
                entity: self.schema.entity,
                field,
            });
        }
        self.check_choices()?;

        match self.schema.entity {
            EntityKind::Galangan => {
                let status = ProjectStatus::parse(self.text("status")).unwrap_or_default();
                let record = NewGalangan::new(
                    self.text("nama_kapal").to_string(),
                    self.text("jenis_kapal").to_string(),
                    self.text("pemilik").to_string(),
                    self.date("tanggal_mulai")?,
                )?
                .with_nilai_kontrak(self.optional_number("nilai_kontrak").unwrap_or(0.0))
                .with_status(status)
                .with_tanggal_target(self.optional_date("tanggal_target")?);
                Ok(NewRecord::Galangan(record))
            }
            EntityKind::Setor => {
                let record = NewSetor::new(
                    self.reference("galangan_id")?,
                    self.optional_number("jumlah").unwrap_or(0.0),
                    self.date("tanggal_setor")?,
                )
                .with_keterangan(self.optional_text("keterangan"));
                Ok(NewRecord::Setor(record))
            }
            EntityKind::Lunas => {
                let record = NewLunas::new(
                    self.reference("galangan_id")?,
                    self.optional_number("total_bayar").unwrap_or(0.0),
                    self.date("tanggal_lunas")?,
                )
                .with_sisa_bayar(self.optional_number("sisa_bayar"))
                .with_keterangan(self.optional_text("keterangan"));
                Ok(NewRecord::Lunas(record))
            }
        }
    }
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

/// A short message shown after a form action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Headline
    pub title: &'static str,
    /// Body text
    pub message: String,
}

impl Notice {
    /// Success notice after an insert.
    #[must_use]
    pub fn added(entity: EntityKind) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Saved!",
            message: format!("{entity} data added"),
        }
    }

    /// Failure notice after a store error.
    #[must_use]
    pub fn add_failed(entity: EntityKind) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error!",
            message: format!("Failed to add {entity} data"),
        }
    }
}

/// Result of pressing Save.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Row inserted; the form should close
    Saved {
        /// Id assigned by the store
        id: i64,
        /// Success notice
        notice: Notice,
    },
    /// Blocked before reaching the store
    Invalid(Error),
    /// The store rejected the insert; the form stays open
    Failed {
        /// Failure notice
        notice: Notice,
        /// Underlying store error
        error: Error,
    },
}

impl SubmitOutcome {
    /// Whether the form should close and return to the list.
    #[must_use]
    pub const fn closes_form(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// An open add form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForm {
    draft: Draft,
}

impl AddForm {
    /// Opens a blank form for `entity`; date fields default to `today`.
    #[must_use]
    pub fn new(entity: EntityKind, today: NaiveDate) -> Self {
        Self {
            draft: Draft::new(FormSchema::for_kind(entity), today),
        }
    }

    /// Entity the form inserts.
    #[must_use]
    pub const fn entity(&self) -> EntityKind {
        self.draft.schema.entity
    }

    /// Current draft.
    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Replaces one field of the draft.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        self.draft.set(field, value)
    }

    /// Validates, inserts, and invalidates the entity's cached list on success.
    ///
    /// The draft is never modified, so a failed submit can be retried as is.
    pub async fn submit<C, V>(&self, db: &C, cache: &QueryCache<V>) -> SubmitOutcome
    where
        C: ConnectionTrait,
    {
        let record = match self.draft.build() {
            Ok(record) => record,
            Err(error) => return SubmitOutcome::Invalid(error),
        };
        let entity = record.kind();

        match store::insert(db, record).await {
            Ok(id) => {
                cache.invalidate(entity);
                info!(%entity, id, "record added");
                SubmitOutcome::Saved {
                    id,
                    notice: Notice::added(entity),
                }
            }
            Err(error) => {
                error!(%entity, %error, "insert failed");
                SubmitOutcome::Failed {
                    notice: Notice::add_failed(entity),
                    error,
                }
            }
        }
    }
}
