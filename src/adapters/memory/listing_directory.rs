use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::listing::Listing;
use crate::error::{BookingError, Result};
use crate::ports::listing_directory::ListingDirectory;

/// [`ListingDirectory`] seeded from configuration. The set of listings is
/// fixed at startup, so no locking is needed.
pub struct InMemoryListingDirectory {
    listings: HashMap<String, Listing>,
}

impl InMemoryListingDirectory {
    /// Validates every listing up front; a bad seed entry fails startup
    /// rather than surfacing mid-booking.
    pub fn new(listings: Vec<Listing>) -> Result<Self> {
        let mut map = HashMap::with_capacity(listings.len());
        for listing in listings {
            listing.validate()?;
            if map.insert(listing.id.clone(), listing).is_some() {
                return Err(BookingError::Config("duplicate listing id in seed".into()));
            }
        }
        Ok(Self { listings: map })
    }
}

#[async_trait]
impl ListingDirectory for InMemoryListingDirectory {
    async fn get(&self, listing_id: &str) -> Result<Listing> {
        self.listings.get(listing_id).cloned().ok_or_else(|| {
            BookingError::Validation {
                field: "listing_id",
                reason: format!("unknown listing '{listing_id}'"),
            }
        })
    }

    async fn list(&self) -> Result<Vec<Listing>> {
        let mut listings: Vec<Listing> = self.listings.values().cloned().collect();
        listings.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_listing;

    #[tokio::test]
    async fn get_known_listing() {
        let dir = InMemoryListingDirectory::new(vec![make_listing("villa-1", 120.0)]).unwrap();
        let listing = dir.get("villa-1").await.unwrap();
        assert!((listing.base_price - 120.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn unknown_listing_is_validation_error() {
        let dir = InMemoryListingDirectory::new(vec![]).unwrap();
        let err = dir.get("nope").await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::Validation {
                field: "listing_id",
                ..
            }
        ));
    }

    #[test]
    fn invalid_seed_listing_fails_construction() {
        let mut bad = make_listing("villa-1", 120.0);
        bad.base_price = -1.0;
        assert!(InMemoryListingDirectory::new(vec![bad]).is_err());
    }

    #[test]
    fn duplicate_seed_id_fails_construction() {
        let listings = vec![make_listing("villa-1", 120.0), make_listing("villa-1", 90.0)];
        assert!(InMemoryListingDirectory::new(listings).is_err());
    }

    #[tokio::test]
    async fn list_is_sorted_by_id() {
        let dir = InMemoryListingDirectory::new(vec![
            make_listing("b", 100.0),
            make_listing("a", 100.0),
        ])
        .unwrap();
        let ids: Vec<String> = dir.list().await.unwrap().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
