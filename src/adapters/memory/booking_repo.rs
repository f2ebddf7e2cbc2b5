use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::booking::{Booking, BookingStatus};
use crate::error::{BookingError, Result};
use crate::ports::booking_repo::BookingRepository;

/// In-memory [`BookingRepository`], keyed by booking reference.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<String, Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: Booking) -> Result<()> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(&booking.reference) {
            return Err(BookingError::Validation {
                field: "reference",
                reason: format!("booking '{}' already exists", booking.reference),
            });
        }
        bookings.insert(booking.reference.clone(), booking);
        Ok(())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>> {
        Ok(self.bookings.read().await.get(reference).cloned())
    }

    async fn update_status(&self, reference: &str, status: BookingStatus) -> Result<Booking> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings.get_mut(reference).ok_or_else(|| {
            BookingError::not_found(format!("booking '{reference}'"))
        })?;
        booking.status = status;
        Ok(booking.clone())
    }

    async fn list_for_listing(&self, listing_id: &str) -> Result<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .bookings
            .read()
            .await
            .values()
            .filter(|b| b.listing_id == listing_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_guest, make_price, range};

    fn booking(listing_id: &str) -> Booking {
        Booking::new(
            listing_id.into(),
            range("2026-06-01", "2026-06-04"),
            make_guest(),
            make_price(3),
        )
    }

    #[tokio::test]
    async fn insert_then_find() {
        let repo = InMemoryBookingRepository::new();
        let b = booking("villa-1");
        let reference = b.reference.clone();
        repo.insert(b).await.unwrap();

        let found = repo.find_by_reference(&reference).await.unwrap().unwrap();
        assert_eq!(found.reference, reference);
        assert!(repo.find_by_reference("BK-MISSING").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_reference_rejected() {
        let repo = InMemoryBookingRepository::new();
        let b = booking("villa-1");
        repo.insert(b.clone()).await.unwrap();
        assert!(repo.insert(b).await.is_err());
    }

    #[tokio::test]
    async fn update_status_returns_updated_record() {
        let repo = InMemoryBookingRepository::new();
        let b = booking("villa-1");
        let reference = b.reference.clone();
        repo.insert(b).await.unwrap();

        let updated = repo
            .update_status(&reference, BookingStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Cancelled);

        let err = repo
            .update_status("BK-MISSING", BookingStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_filters_by_listing() {
        let repo = InMemoryBookingRepository::new();
        repo.insert(booking("villa-1")).await.unwrap();
        repo.insert(booking("villa-1")).await.unwrap();
        repo.insert(booking("cabin-7")).await.unwrap();

        assert_eq!(repo.list_for_listing("villa-1").await.unwrap().len(), 2);
        assert_eq!(repo.list_for_listing("cabin-7").await.unwrap().len(), 1);
        assert!(repo.list_for_listing("unknown").await.unwrap().is_empty());
    }
}
