use std::sync::Arc;

use crate::domain::calendar::UnblockOutcome;
use crate::domain::dates::DateRange;
use crate::error::{BookingError, Result};
use crate::ports::calendar_store::CalendarStore;
use crate::ports::listing_directory::ListingDirectory;

/// Administrative calendar mutations: host blocks, unblocks, and seasonal
/// pricing. All of them go through the same calendar store as bookings, so
/// they serialize against in-flight reservations on the listing.
pub struct BlockingService {
    listings: Arc<dyn ListingDirectory>,
    calendar: Arc<dyn CalendarStore>,
}

impl BlockingService {
    pub fn new(listings: Arc<dyn ListingDirectory>, calendar: Arc<dyn CalendarStore>) -> Self {
        Self { listings, calendar }
    }

    /// Block a range, e.g. for maintenance. Idempotent over already-Blocked
    /// days; refuses to touch a range containing a Booked day.
    pub async fn block_dates(
        &self,
        listing_id: &str,
        range: DateRange,
        reason: Option<String>,
    ) -> Result<()> {
        self.listings.get(listing_id).await?;
        self.calendar.block(listing_id, range, reason).await
    }

    /// Unblock a range. Days that are Available or Booked are reported back
    /// as skipped, not errored.
    pub async fn unblock_dates(&self, listing_id: &str, range: DateRange) -> Result<UnblockOutcome> {
        self.listings.get(listing_id).await?;
        self.calendar.unblock(listing_id, range).await
    }

    /// Set a per-night price for a range. Booked days keep their locked-in
    /// price, so a range containing one is rejected whole.
    pub async fn set_custom_pricing(
        &self,
        listing_id: &str,
        range: DateRange,
        price: f64,
    ) -> Result<()> {
        if price <= 0.0 {
            return Err(BookingError::Validation {
                field: "price",
                reason: format!("custom price must be positive, got {price}"),
            });
        }
        self.listings.get(listing_id).await?;
        self.calendar.set_price_override(listing_id, range, price).await
    }

    /// Remove per-night prices from a range, reverting it to the listing's
    /// base rate.
    pub async fn clear_custom_pricing(&self, listing_id: &str, range: DateRange) -> Result<()> {
        self.listings.get(listing_id).await?;
        self.calendar.clear_price_override(listing_id, range).await
    }
}
