use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::domain::availability::{self, Availability};
use crate::domain::booking::{Booking, BookingStatus, Guest};
use crate::domain::dates::DateRange;
use crate::domain::pricing;
use crate::error::{BookingError, Result};
use crate::ports::booking_repo::BookingRepository;
use crate::ports::calendar_store::CalendarStore;
use crate::ports::listing_directory::ListingDirectory;

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub listing_id: String,
    pub range: DateRange,
    pub guest: Guest,
}

/// Orchestrates a booking through Requested → Validating → Reserved →
/// Confirmed. The calendar store is the serialization point: this service
/// checks availability speculatively on a snapshot, and relies on the
/// store's atomic `reserve` to settle races. A lost race surfaces as
/// `Conflict`; the caller decides whether to retry with other dates.
pub struct BookingService {
    listings: Arc<dyn ListingDirectory>,
    calendar: Arc<dyn CalendarStore>,
    bookings: Arc<dyn BookingRepository>,
    service_fee_rate: f64,
}

impl BookingService {
    pub fn new(
        listings: Arc<dyn ListingDirectory>,
        calendar: Arc<dyn CalendarStore>,
        bookings: Arc<dyn BookingRepository>,
        service_fee_rate: f64,
    ) -> Self {
        Self {
            listings,
            calendar,
            bookings,
            service_fee_rate,
        }
    }

    pub async fn create_booking(&self, request: BookingRequest) -> Result<Booking> {
        self.create_booking_on(Local::now().date_naive(), request)
            .await
    }

    /// `create_booking` with an explicit "today", so the past-date rule is
    /// testable without a clock.
    pub async fn create_booking_on(
        &self,
        today: NaiveDate,
        request: BookingRequest,
    ) -> Result<Booking> {
        // Requested: cheap input checks before touching the store.
        if request.range.check_in() < today {
            return Err(BookingError::Validation {
                field: "check_in",
                reason: format!("check-in {} is in the past", request.range.check_in()),
            });
        }
        request.guest.validate()?;
        let listing = self.listings.get(&request.listing_id).await?;

        // Validating: speculative availability check on a snapshot.
        let days = self.calendar.get(&request.listing_id, request.range).await?;
        match availability::is_bookable(&days, listing.min_nights) {
            Availability::Bookable => {}
            Availability::TooShort { nights, min_nights } => {
                return Err(BookingError::Validation {
                    field: "check_out",
                    reason: format!(
                        "{nights} night stay is below the {min_nights}-night minimum for listing '{}'",
                        listing.id
                    ),
                });
            }
            Availability::Unavailable { conflicting_dates } => {
                return Err(BookingError::Conflict {
                    dates: conflicting_dates,
                });
            }
        }

        // Price from the validation-time snapshot: a concurrent override
        // mutation cannot change this booking's cost mid-flight.
        let price = pricing::quote(
            &days,
            listing.base_price,
            self.service_fee_rate,
            &listing.currency,
        )?;
        let mut booking = Booking::new(request.listing_id, request.range, request.guest, price);

        // Reserved: atomic against concurrent writes on this listing. A
        // conflict here means we lost the race since the snapshot.
        self.calendar
            .reserve(&booking.listing_id, booking.range, &booking.reference)
            .await?;

        booking.confirm();
        if let Err(insert_err) = self.bookings.insert(booking.clone()).await {
            // Give the nights back: a reservation without a booking record
            // would be unreachable through any API.
            if let Err(release_err) = self
                .calendar
                .release(&booking.listing_id, booking.range, &booking.reference)
                .await
            {
                tracing::error!(
                    reference = %booking.reference,
                    listing_id = %booking.listing_id,
                    error = %release_err,
                    "failed to release reservation after insert failure"
                );
            }
            return Err(insert_err);
        }
        tracing::info!(
            reference = %booking.reference,
            listing_id = %booking.listing_id,
            range = %booking.range,
            total = booking.price.total,
            "booking confirmed"
        );
        Ok(booking)
    }

    /// Cancel a booking and release its nights. Double-cancellation and
    /// stale references surface as `NotFound`, never as silent success.
    pub async fn cancel_booking(&self, reference: &str) -> Result<Booking> {
        let booking = self.get_booking(reference).await?;
        if booking.status == BookingStatus::Cancelled {
            return Err(BookingError::not_found(format!(
                "active booking '{reference}' (already cancelled)"
            )));
        }
        self.calendar
            .release(&booking.listing_id, booking.range, reference)
            .await?;
        let cancelled = self
            .bookings
            .update_status(reference, BookingStatus::Cancelled)
            .await?;
        tracing::info!(reference, listing_id = %cancelled.listing_id, "booking cancelled");
        Ok(cancelled)
    }

    pub async fn get_booking(&self, reference: &str) -> Result<Booking> {
        self.bookings
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| BookingError::not_found(format!("booking '{reference}'")))
    }

    pub async fn list_bookings(&self, listing_id: &str) -> Result<Vec<Booking>> {
        // Surfaces unknown listings as a Validation error instead of an
        // empty list.
        self.listings.get(listing_id).await?;
        self.bookings.list_for_listing(listing_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::booking_repo::InMemoryBookingRepository;
    use crate::adapters::memory::calendar_store::InMemoryCalendarStore;
    use crate::adapters::memory::listing_directory::InMemoryListingDirectory;
    use crate::test_helpers::{date, make_guest, make_listing, range};

    fn service() -> BookingService {
        let listings = InMemoryListingDirectory::new(vec![
            make_listing("villa-1", 100.0),
            make_listing("cabin-7", 80.0),
        ])
        .unwrap();
        BookingService::new(
            Arc::new(listings),
            Arc::new(InMemoryCalendarStore::new()),
            Arc::new(InMemoryBookingRepository::new()),
            0.05,
        )
    }

    fn request(listing_id: &str, check_in: &str, check_out: &str) -> BookingRequest {
        BookingRequest {
            listing_id: listing_id.into(),
            range: range(check_in, check_out),
            guest: make_guest(),
        }
    }

    const TODAY: &str = "2026-06-01";

    async fn create(svc: &BookingService, req: BookingRequest) -> Result<Booking> {
        svc.create_booking_on(date(TODAY), req).await
    }

    #[tokio::test]
    async fn happy_path_confirms_and_prices() {
        let svc = service();
        let booking = create(&svc, request("villa-1", "2026-06-10", "2026-06-13"))
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.price.nights, 3);
        assert!((booking.price.total - 315.0).abs() < f64::EPSILON);

        let stored = svc.get_booking(&booking.reference).await.unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn past_check_in_rejected() {
        let svc = service();
        let err = create(&svc, request("villa-1", "2026-05-30", "2026-06-03"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::Validation {
                field: "check_in",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn check_in_today_accepted() {
        let svc = service();
        assert!(create(&svc, request("villa-1", TODAY, "2026-06-02")).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_listing_rejected() {
        let svc = service();
        let err = create(&svc, request("chalet-9", "2026-06-10", "2026-06-12"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::Validation {
                field: "listing_id",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn min_nights_enforced() {
        let mut listing = make_listing("villa-3n", 100.0);
        listing.min_nights = 3;
        let svc = BookingService::new(
            Arc::new(InMemoryListingDirectory::new(vec![listing]).unwrap()),
            Arc::new(InMemoryCalendarStore::new()),
            Arc::new(InMemoryBookingRepository::new()),
            0.05,
        );
        let err = svc
            .create_booking_on(date(TODAY), request("villa-3n", "2026-06-10", "2026-06-12"))
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("3-night minimum"), "got: {msg}");
    }

    #[tokio::test]
    async fn overlapping_booking_conflicts_and_keeps_state() {
        let svc = service();
        create(&svc, request("villa-1", "2026-06-10", "2026-06-13"))
            .await
            .unwrap();

        let err = create(&svc, request("villa-1", "2026-06-12", "2026-06-15"))
            .await
            .unwrap_err();
        match err {
            BookingError::Conflict { dates } => assert_eq!(dates, vec![date("2026-06-12")]),
            other => panic!("expected Conflict, got {other:?}"),
        }
        // The rejected request reserved nothing
        let next = create(&svc, request("villa-1", "2026-06-13", "2026-06-15"))
            .await
            .unwrap();
        assert_eq!(next.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn back_to_back_bookings_share_turnover_date() {
        let svc = service();
        create(&svc, request("villa-1", "2026-06-10", "2026-06-13"))
            .await
            .unwrap();
        // check_out is exclusive, so a stay starting on the 13th fits
        assert!(create(&svc, request("villa-1", "2026-06-13", "2026-06-16")).await.is_ok());
    }

    #[tokio::test]
    async fn cancellation_releases_the_range() {
        let svc = service();
        let booking = create(&svc, request("villa-1", "2026-06-10", "2026-06-13"))
            .await
            .unwrap();

        let cancelled = svc.cancel_booking(&booking.reference).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        // The exact same range is bookable again
        let rebooked = create(&svc, request("villa-1", "2026-06-10", "2026-06-13"))
            .await
            .unwrap();
        assert_eq!(rebooked.status, BookingStatus::Confirmed);
        assert_ne!(rebooked.reference, booking.reference);
    }

    #[tokio::test]
    async fn double_cancel_is_not_found() {
        let svc = service();
        let booking = create(&svc, request("villa-1", "2026-06-10", "2026-06-13"))
            .await
            .unwrap();
        svc.cancel_booking(&booking.reference).await.unwrap();
        let err = svc.cancel_booking(&booking.reference).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound { .. }));
    }

    #[tokio::test]
    async fn cancel_unknown_reference_is_not_found() {
        let svc = service();
        let err = svc.cancel_booking("BK-MISSING1").await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound { .. }));
    }

    #[tokio::test]
    async fn price_locked_at_validation_snapshot() {
        let svc = service();
        let booking = create(&svc, request("villa-1", "2026-06-10", "2026-06-13"))
            .await
            .unwrap();
        // 3 nights at base 100 regardless of later override churn elsewhere
        assert!((booking.price.nightly_subtotal - 300.0).abs() < f64::EPSILON);
        assert!((booking.price.service_fee - 15.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn list_bookings_requires_known_listing() {
        let svc = service();
        create(&svc, request("villa-1", "2026-06-10", "2026-06-12"))
            .await
            .unwrap();
        assert_eq!(svc.list_bookings("villa-1").await.unwrap().len(), 1);
        assert!(svc.list_bookings("cabin-7").await.unwrap().is_empty());
        assert!(svc.list_bookings("unknown").await.is_err());
    }

    /// Repository that refuses every insert, as a duplicate reference would.
    struct RejectingRepository;

    #[async_trait::async_trait]
    impl BookingRepository for RejectingRepository {
        async fn insert(&self, booking: Booking) -> Result<()> {
            Err(BookingError::validation(
                "reference",
                format!("booking '{}' already exists", booking.reference),
            ))
        }

        async fn find_by_reference(&self, _reference: &str) -> Result<Option<Booking>> {
            Ok(None)
        }

        async fn update_status(&self, reference: &str, _status: BookingStatus) -> Result<Booking> {
            Err(BookingError::not_found(format!("booking '{reference}'")))
        }

        async fn list_for_listing(&self, _listing_id: &str) -> Result<Vec<Booking>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn failed_insert_releases_the_reservation() {
        let calendar = Arc::new(InMemoryCalendarStore::new());
        let svc = BookingService::new(
            Arc::new(
                InMemoryListingDirectory::new(vec![make_listing("villa-1", 100.0)]).unwrap(),
            ),
            Arc::clone(&calendar) as Arc<dyn CalendarStore>,
            Arc::new(RejectingRepository),
            0.05,
        );

        let err = create(&svc, request("villa-1", "2026-06-10", "2026-06-13"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::Validation {
                field: "reference",
                ..
            }
        ));

        // The nights must not stay booked under an unreachable reference
        let days = calendar
            .get("villa-1", range("2026-06-10", "2026-06-13"))
            .await
            .unwrap();
        assert!(days.iter().all(|d| d.state.is_available()));
    }
}
