use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::calendar::{CalendarDay, UnblockOutcome};
use crate::domain::dates::DateRange;
use crate::error::Result;

/// Source of truth for per-listing day state. Every write is atomic over its
/// full range: either all days transition together or none do, and writes on
/// the same listing are serialized against each other. `get` returns a
/// consistent snapshot and may run concurrently with writes.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// One `CalendarDay` per night in `[check_in, check_out)`, in date order.
    async fn get(&self, listing_id: &str, range: DateRange) -> Result<Vec<CalendarDay>>;

    /// Transition every day in the range from Available to Booked under
    /// `booking_ref`. Fails with `Conflict` naming the unavailable dates.
    async fn reserve(&self, listing_id: &str, range: DateRange, booking_ref: &str) -> Result<()>;

    /// Return every day in the range to Available. Fails with `NotFound` if
    /// any day is not currently Booked under `booking_ref`; nothing is
    /// released in that case.
    async fn release(&self, listing_id: &str, range: DateRange, booking_ref: &str) -> Result<()>;

    /// Mark every day in the range Blocked. Re-blocking already-Blocked days
    /// is an idempotent success; a Booked day fails the whole range with
    /// `Conflict`.
    async fn block(&self, listing_id: &str, range: DateRange, reason: Option<String>)
    -> Result<()>;

    /// Release Blocked days in the range back to Available. Days in other
    /// states are skipped, not errored; if nothing in the range was Blocked
    /// the result is `NotFound`.
    async fn unblock(&self, listing_id: &str, range: DateRange) -> Result<UnblockOutcome>;

    /// Set a per-night price for the range. Fails with `Conflict` if the
    /// range contains a Booked day — confirmed stays keep their locked-in
    /// price.
    async fn set_price_override(
        &self,
        listing_id: &str,
        range: DateRange,
        price: f64,
    ) -> Result<()>;

    /// Remove per-night prices from the range, same Booked-day rule as
    /// `set_price_override`.
    async fn clear_price_override(&self, listing_id: &str, range: DateRange) -> Result<()>;

    /// Dates in the range that are not Available, for calendar UIs.
    async fn unavailable_dates(&self, listing_id: &str, range: DateRange)
    -> Result<Vec<NaiveDate>>;
}
