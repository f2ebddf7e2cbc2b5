#![allow(clippy::cast_precision_loss)]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// State of a single listing night. A day carries a booking reference iff it
/// is booked, and a block reason iff it is blocked; the enum payloads make
/// any other combination unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DayState {
    Available,
    Booked { booking_ref: String },
    Blocked { reason: Option<String> },
}

impl DayState {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    pub fn is_booked(&self) -> bool {
        matches!(self, Self::Booked { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

impl std::fmt::Display for DayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Booked { booking_ref } => write!(f, "booked ({booking_ref})"),
            Self::Blocked { reason: Some(r) } => write!(f, "blocked ({r})"),
            Self::Blocked { reason: None } => write!(f, "blocked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub state: DayState,
    #[serde(default)]
    pub price_override: Option<f64>,
}

impl CalendarDay {
    pub fn available(date: NaiveDate) -> Self {
        Self {
            date,
            state: DayState::Available,
            price_override: None,
        }
    }

    /// Nightly rate for this day: the per-day override if one is set,
    /// otherwise the listing's base price.
    pub fn nightly_rate(&self, base_price: f64) -> f64 {
        self.price_override.unwrap_or(base_price)
    }
}

/// Outcome of unblocking a range: blocked days are released, days in any
/// other state are left untouched and reported back as skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnblockOutcome {
    pub released: Vec<NaiveDate>,
    pub skipped: Vec<NaiveDate>,
}

/// Query projection of a listing's calendar over a horizon, for display by
/// a calendar UI. Reads the same store the booking path writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarView {
    pub listing_id: String,
    pub currency: String,
    pub base_price: f64,
    pub days: Vec<CalendarDay>,
}

impl CalendarView {
    /// Dates in the horizon that a calendar UI must disable.
    pub fn unavailable_dates(&self) -> Vec<NaiveDate> {
        self.days
            .iter()
            .filter(|d| !d.state.is_available())
            .map(|d| d.date)
            .collect()
    }

    /// Share of the horizon that is booked or blocked, as a percentage.
    pub fn occupancy_rate(&self) -> Option<f64> {
        if self.days.is_empty() {
            return None;
        }
        let unavailable = self.days.iter().filter(|d| !d.state.is_available()).count();
        Some(unavailable as f64 / self.days.len() as f64 * 100.0)
    }
}

impl std::fmt::Display for CalendarView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Calendar for listing {} ({}, base {:.2}/night)",
            self.listing_id, self.currency, self.base_price
        )?;
        if let Some(occ) = self.occupancy_rate() {
            writeln!(f, "Occupancy: {occ:.1}% of {} days", self.days.len())?;
        }
        writeln!(f, "{:<12} {:>10} {}", "Date", "Rate", "Status")?;
        writeln!(f, "{}", "-".repeat(44))?;
        for day in &self.days {
            let date = day.date.to_string();
            let rate = day.nightly_rate(self.base_price);
            writeln!(f, "{date:<12} {rate:>10.2} {}", day.state)?;
        }
        Ok(())
    }
}
