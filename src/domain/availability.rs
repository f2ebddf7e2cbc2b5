use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::calendar::CalendarDay;

/// Verdict on a requested stay. Deterministic and side-effect free, so it is
/// safe to call speculatively on a snapshot before any lock is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Bookable,
    /// The stay is shorter than the listing's minimum.
    TooShort { nights: u32, min_nights: u32 },
    /// At least one requested night is booked or blocked.
    Unavailable { conflicting_dates: Vec<NaiveDate> },
}

impl Availability {
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Bookable)
    }
}

/// Decide whether a night-by-night snapshot is bookable: the stay must meet
/// the minimum length and every night must be available. All conflicting
/// dates are reported, not just the first, so a UI can explain the refusal.
pub fn is_bookable(days: &[CalendarDay], min_nights: u32) -> Availability {
    let nights = u32::try_from(days.len()).unwrap_or(u32::MAX);
    if nights < min_nights {
        return Availability::TooShort { nights, min_nights };
    }
    let conflicting_dates: Vec<NaiveDate> = days
        .iter()
        .filter(|d| !d.state.is_available())
        .map(|d| d.date)
        .collect();
    if conflicting_dates.is_empty() {
        Availability::Bookable
    } else {
        Availability::Unavailable { conflicting_dates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::DayState;
    use crate::test_helpers::{available_days, date, range};

    #[test]
    fn all_available_is_bookable() {
        let days = available_days(range("2026-06-01", "2026-06-04"));
        assert_eq!(is_bookable(&days, 1), Availability::Bookable);
        assert!(is_bookable(&days, 3).is_bookable());
    }

    #[test]
    fn short_stay_rejected_before_conflicts() {
        let mut days = available_days(range("2026-06-01", "2026-06-03"));
        days[0].state = DayState::Blocked { reason: None };
        assert_eq!(
            is_bookable(&days, 3),
            Availability::TooShort {
                nights: 2,
                min_nights: 3
            }
        );
    }

    #[test]
    fn booked_night_reported() {
        let mut days = available_days(range("2026-06-01", "2026-06-04"));
        days[1].state = DayState::Booked {
            booking_ref: "BK-1".into(),
        };
        assert_eq!(
            is_bookable(&days, 1),
            Availability::Unavailable {
                conflicting_dates: vec![date("2026-06-02")]
            }
        );
    }

    #[test]
    fn every_conflicting_date_reported_in_order() {
        let mut days = available_days(range("2026-06-01", "2026-06-05"));
        days[0].state = DayState::Blocked { reason: None };
        days[3].state = DayState::Booked {
            booking_ref: "BK-2".into(),
        };
        let verdict = is_bookable(&days, 1);
        assert_eq!(
            verdict,
            Availability::Unavailable {
                conflicting_dates: vec![date("2026-06-01"), date("2026-06-04")]
            }
        );
    }

    #[test]
    fn price_override_does_not_affect_availability() {
        let mut days = available_days(range("2026-06-01", "2026-06-02"));
        days[0].price_override = Some(999.0);
        assert!(is_bookable(&days, 1).is_bookable());
    }
}
