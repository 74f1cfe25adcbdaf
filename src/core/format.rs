//! Display formatting shared by list views and the dashboard.
//!
//! Currency and dates follow the Indonesian conventions used throughout the app:
//! `Rp 1.500.000` and `10 Jan 2024`.

use crate::entities::galangan::ProjectStatus;
use chrono::{Datelike, NaiveDate};

/// Prefix for formatted amounts
pub const CURRENCY_MARKER: &str = "Rp";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agt", "Sep", "Okt", "Nov", "Des",
];

/// Formats an amount as a rounded, dot-grouped rupiah string, e.g. `Rp 1.500.000`.
///
/// Non-finite amounts render as zero.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount.round() } else { 0.0 };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Rounded and made non-negative above; rupiah amounts are far below u64::MAX
    let whole = amount.abs() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{CURRENCY_MARKER} {}", group_thousands(whole))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a date as `dd Mon yyyy` with Indonesian month abbreviations.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Color token of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    /// In progress
    Blue,
    /// Done
    Green,
    /// Cancelled
    Red,
    /// Anything unrecognised
    Gray,
}

impl BadgeColor {
    /// RGB value for embeds.
    #[must_use]
    pub const fn rgb(self) -> u32 {
        match self {
            Self::Blue => 0x003B_82F6,
            Self::Green => 0x0022_C55E,
            Self::Red => 0x00EF_4444,
            Self::Gray => 0x006B_7280,
        }
    }

    /// Emoji used where embeds cannot carry a color.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Blue => "🔵",
            Self::Green => "🟢",
            Self::Red => "🔴",
            Self::Gray => "⚪",
        }
    }
}

/// Display label and color for a project status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    /// Text shown in the badge
    pub label: String,
    /// Color token
    pub color: BadgeColor,
}

/// Maps a stored status value to its badge. Unknown values keep their raw text on gray.
#[must_use]
pub fn status_badge(status: &str) -> StatusBadge {
    let (label, color) = match ProjectStatus::parse(status) {
        Some(ProjectStatus::Ongoing) => ("In progress", BadgeColor::Blue),
        Some(ProjectStatus::Completed) => ("Done", BadgeColor::Green),
        Some(ProjectStatus::Cancelled) => ("Cancelled", BadgeColor::Red),
        None => (status, BadgeColor::Gray),
    };
    StatusBadge {
        label: label.to_string(),
        color,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(1_500_000.0), "Rp 1.500.000");
        assert_eq!(format_currency(999.0), "Rp 999");
        assert_eq!(format_currency(1000.0), "Rp 1.000");
        assert_eq!(format_currency(0.0), "Rp 0");
        assert_eq!(format_currency(12_345_678.6), "Rp 12.345.679");
    }

    #[test]
    fn test_format_currency_non_finite_is_zero() {
        assert_eq!(format_currency(f64::NAN), "Rp 0");
        assert_eq!(format_currency(f64::INFINITY), "Rp 0");
    }

    #[test]
    fn test_format_date_uses_indonesian_months() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(format_date(date), "10 Jan 2024");
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(format_date(date), "01 Agt 2024");
        let date = NaiveDate::from_ymd_opt(2023, 5, 17).unwrap();
        assert_eq!(format_date(date), "17 Mei 2023");
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(
            status_badge("ongoing"),
            StatusBadge {
                label: "In progress".to_string(),
                color: BadgeColor::Blue
            }
        );
        assert_eq!(status_badge("completed").color, BadgeColor::Green);
        assert_eq!(status_badge("completed").label, "Done");
        assert_eq!(status_badge("cancelled").color, BadgeColor::Red);
    }

    #[test]
    fn test_unknown_status_falls_back_to_raw_gray() {
        let badge = status_badge("on hold");
        assert_eq!(badge.label, "on hold");
        assert_eq!(badge.color, BadgeColor::Gray);
    }
}
