use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};

use crate::domain::calendar::{CalendarDay, DayState, UnblockOutcome};
use crate::domain::dates::DateRange;
use crate::error::{BookingError, Result};
use crate::ports::calendar_store::CalendarStore;

/// Day map for one listing. Dates absent from the map are implicitly
/// Available with no price override, so the calendar needs no horizon
/// seeding and never stores more days than have been touched.
#[derive(Default)]
struct ListingCalendar {
    days: BTreeMap<NaiveDate, CalendarDay>,
}

impl ListingCalendar {
    fn day(&self, date: NaiveDate) -> CalendarDay {
        self.days
            .get(&date)
            .cloned()
            .unwrap_or_else(|| CalendarDay::available(date))
    }

    fn set_state(&mut self, date: NaiveDate, state: DayState) {
        let mut day = self.day(date);
        day.state = state;
        if day == CalendarDay::available(date) {
            // fully default days don't need an entry
            self.days.remove(&date);
        } else {
            self.days.insert(date, day);
        }
    }

    fn conflicting(&self, range: DateRange, pred: impl Fn(&DayState) -> bool) -> Vec<NaiveDate> {
        range.iter().filter(|d| pred(&self.day(*d).state)).collect()
    }
}

/// In-memory [`CalendarStore`]. Each listing's calendar sits behind its own
/// mutex, which is the single serialization point for writes on that
/// listing; the outer map lock is held only long enough to find or create
/// the entry, so operations on different listings never block each other.
/// Reads clone the requested days under the listing lock and therefore
/// observe a consistent snapshot.
#[derive(Default)]
pub struct InMemoryCalendarStore {
    listings: RwLock<HashMap<String, Arc<Mutex<ListingCalendar>>>>,
}

impl InMemoryCalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn calendar(&self, listing_id: &str) -> Arc<Mutex<ListingCalendar>> {
        if let Some(calendar) = self.listings.read().await.get(listing_id) {
            return Arc::clone(calendar);
        }
        let mut listings = self.listings.write().await;
        Arc::clone(listings.entry(listing_id.to_string()).or_default())
    }
}

#[async_trait]
impl CalendarStore for InMemoryCalendarStore {
    async fn get(&self, listing_id: &str, range: DateRange) -> Result<Vec<CalendarDay>> {
        let calendar = self.calendar(listing_id).await;
        let calendar = calendar.lock().await;
        Ok(range.iter().map(|d| calendar.day(d)).collect())
    }

    async fn reserve(&self, listing_id: &str, range: DateRange, booking_ref: &str) -> Result<()> {
        let calendar = self.calendar(listing_id).await;
        let mut calendar = calendar.lock().await;

        // Validate the whole range before touching anything.
        let conflicts = calendar.conflicting(range, |s| !s.is_available());
        if !conflicts.is_empty() {
            tracing::debug!(listing_id, %range, ?conflicts, "reserve conflict");
            return Err(BookingError::Conflict { dates: conflicts });
        }
        for date in range.iter() {
            calendar.set_state(
                date,
                DayState::Booked {
                    booking_ref: booking_ref.to_string(),
                },
            );
        }
        tracing::info!(listing_id, %range, booking_ref, "range reserved");
        Ok(())
    }

    async fn release(&self, listing_id: &str, range: DateRange, booking_ref: &str) -> Result<()> {
        let calendar = self.calendar(listing_id).await;
        let mut calendar = calendar.lock().await;

        let mismatched = calendar.conflicting(range, |state| {
            !matches!(state, DayState::Booked { booking_ref: r } if r == booking_ref)
        });
        if !mismatched.is_empty() {
            return Err(BookingError::NotFound {
                what: format!(
                    "reservation '{booking_ref}' on {} (listing '{listing_id}')",
                    mismatched[0]
                ),
            });
        }
        for date in range.iter() {
            calendar.set_state(date, DayState::Available);
        }
        tracing::info!(listing_id, %range, booking_ref, "range released");
        Ok(())
    }

    async fn block(
        &self,
        listing_id: &str,
        range: DateRange,
        reason: Option<String>,
    ) -> Result<()> {
        let calendar = self.calendar(listing_id).await;
        let mut calendar = calendar.lock().await;

        // Re-blocking Blocked days is idempotent; Booked days are never
        // silently overwritten.
        let booked = calendar.conflicting(range, DayState::is_booked);
        if !booked.is_empty() {
            return Err(BookingError::Conflict { dates: booked });
        }
        for date in range.iter() {
            calendar.set_state(
                date,
                DayState::Blocked {
                    reason: reason.clone(),
                },
            );
        }
        tracing::info!(listing_id, %range, "range blocked");
        Ok(())
    }

    async fn unblock(&self, listing_id: &str, range: DateRange) -> Result<UnblockOutcome> {
        let calendar = self.calendar(listing_id).await;
        let mut calendar = calendar.lock().await;

        let mut released = Vec::new();
        let mut skipped = Vec::new();
        for date in range.iter() {
            if calendar.day(date).state.is_blocked() {
                released.push(date);
            } else {
                skipped.push(date);
            }
        }
        if released.is_empty() {
            return Err(BookingError::NotFound {
                what: format!("blocked dates in {range} (listing '{listing_id}')"),
            });
        }
        for date in &released {
            calendar.set_state(*date, DayState::Available);
        }
        tracing::info!(
            listing_id,
            %range,
            released = released.len(),
            skipped = skipped.len(),
            "range unblocked"
        );
        Ok(UnblockOutcome { released, skipped })
    }

    async fn set_price_override(
        &self,
        listing_id: &str,
        range: DateRange,
        price: f64,
    ) -> Result<()> {
        let calendar = self.calendar(listing_id).await;
        let mut calendar = calendar.lock().await;

        let booked = calendar.conflicting(range, DayState::is_booked);
        if !booked.is_empty() {
            return Err(BookingError::Conflict { dates: booked });
        }
        for date in range.iter() {
            let mut day = calendar.day(date);
            day.price_override = Some(price);
            calendar.days.insert(date, day);
        }
        tracing::info!(listing_id, %range, price, "price override set");
        Ok(())
    }

    async fn clear_price_override(&self, listing_id: &str, range: DateRange) -> Result<()> {
        let calendar = self.calendar(listing_id).await;
        let mut calendar = calendar.lock().await;

        let booked = calendar.conflicting(range, DayState::is_booked);
        if !booked.is_empty() {
            return Err(BookingError::Conflict { dates: booked });
        }
        for date in range.iter() {
            let mut day = calendar.day(date);
            day.price_override = None;
            if day == CalendarDay::available(date) {
                calendar.days.remove(&date);
            } else {
                calendar.days.insert(date, day);
            }
        }
        tracing::info!(listing_id, %range, "price override cleared");
        Ok(())
    }

    async fn unavailable_dates(
        &self,
        listing_id: &str,
        range: DateRange,
    ) -> Result<Vec<NaiveDate>> {
        let calendar = self.calendar(listing_id).await;
        let calendar = calendar.lock().await;
        Ok(calendar.conflicting(range, |s| !s.is_available()))
    }
}
