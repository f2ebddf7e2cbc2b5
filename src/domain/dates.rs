use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Half-open stay interval `[check_in, check_out)` — the night of
/// `check_out` is not occupied by the stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = BookingError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.check_in, raw.check_out)
    }
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        if check_out <= check_in {
            return Err(BookingError::Validation {
                field: "check_out",
                reason: format!("check-out {check_out} must be after check-in {check_in}"),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Parse a range from two ISO-8601 calendar dates.
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self> {
        Self::new(
            parse_date("check_in", check_in)?,
            parse_date("check_out", check_out)?,
        )
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> u32 {
        u32::try_from((self.check_out - self.check_in).num_days()).unwrap_or(0)
    }

    /// Iterate the nights of the stay: every date in `[check_in, check_out)`.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.check_out;
        self.check_in.iter_days().take_while(move |d| *d < end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.check_in, self.check_out)
    }
}

/// Parse an ISO-8601 calendar date (listing-local, no time component).
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| BookingError::Validation {
        field,
        reason: format!("invalid date '{value}', expected YYYY-MM-DD"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::date;

    #[test]
    fn zero_night_range_rejected() {
        let err = DateRange::new(date("2026-06-01"), date("2026-06-01")).unwrap_err();
        assert!(matches!(
            err,
            BookingError::Validation {
                field: "check_out",
                ..
            }
        ));
    }

    #[test]
    fn inverted_range_rejected() {
        assert!(DateRange::new(date("2026-06-05"), date("2026-06-01")).is_err());
    }

    #[test]
    fn one_night_is_minimum_valid_range() {
        let range = DateRange::new(date("2026-06-01"), date("2026-06-02")).unwrap();
        assert_eq!(range.nights(), 1);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![date("2026-06-01")]);
    }

    #[test]
    fn iter_excludes_check_out_night() {
        let range = DateRange::parse("2026-06-01", "2026-06-04").unwrap();
        let nights: Vec<_> = range.iter().collect();
        assert_eq!(
            nights,
            vec![date("2026-06-01"), date("2026-06-02"), date("2026-06-03")]
        );
        assert_eq!(range.nights(), 3);
    }

    #[test]
    fn contains_is_half_open() {
        let range = DateRange::parse("2026-06-01", "2026-06-04").unwrap();
        assert!(range.contains(date("2026-06-01")));
        assert!(range.contains(date("2026-06-03")));
        assert!(!range.contains(date("2026-06-04")));
        assert!(!range.contains(date("2026-05-31")));
    }

    #[test]
    fn overlap_detection() {
        let a = DateRange::parse("2026-06-01", "2026-06-04").unwrap();
        let b = DateRange::parse("2026-06-03", "2026-06-06").unwrap();
        let c = DateRange::parse("2026-06-04", "2026-06-07").unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Back-to-back stays share a turnover date, not a night
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn parse_rejects_bad_format() {
        let err = DateRange::parse("01/06/2026", "2026-06-04").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn deserialize_enforces_order() {
        let ok: DateRange =
            serde_json::from_str(r#"{"check_in":"2026-06-01","check_out":"2026-06-03"}"#).unwrap();
        assert_eq!(ok.nights(), 2);
        let bad = serde_json::from_str::<DateRange>(
            r#"{"check_in":"2026-06-03","check_out":"2026-06-01"}"#,
        );
        assert!(bad.is_err());
    }
}
