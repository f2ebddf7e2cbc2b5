use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::error::Result;

/// Persistence seam for booking records, keyed by their human-shareable
/// reference.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Booking) -> Result<()>;

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>>;

    /// Update a booking's status, returning the updated record; `NotFound`
    /// if no booking has this reference.
    async fn update_status(&self, reference: &str, status: BookingStatus) -> Result<Booking>;

    /// All bookings for a listing, newest first.
    async fn list_for_listing(&self, listing_id: &str) -> Result<Vec<Booking>>;
}
