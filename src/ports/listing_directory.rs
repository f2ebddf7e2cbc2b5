use async_trait::async_trait;

use crate::domain::listing::Listing;
use crate::error::Result;

/// Read-only lookup of the listings the engine knows about. The marketplace
/// owns the full listing records; this only serves the pricing projection.
#[async_trait]
pub trait ListingDirectory: Send + Sync {
    /// `Validation` error for an unknown listing id.
    async fn get(&self, listing_id: &str) -> Result<Listing>;

    async fn list(&self) -> Result<Vec<Listing>>;
}
