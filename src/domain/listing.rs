use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Read-only projection of a listing, reduced to what availability and
/// pricing need. Descriptions, photos, amenities and other presentation
/// fields stay with the marketplace frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub base_price: f64,
    /// ISO 4217 currency code.
    pub currency: String,
    #[serde(default = "default_min_nights")]
    pub min_nights: u32,
}

fn default_min_nights() -> u32 {
    1
}

impl Listing {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(BookingError::validation("listing_id", "id is required"));
        }
        if self.base_price <= 0.0 {
            return Err(BookingError::Validation {
                field: "base_price",
                reason: format!(
                    "base price must be positive, got {} for listing '{}'",
                    self.base_price, self.id
                ),
            });
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(BookingError::Validation {
                field: "currency",
                reason: format!(
                    "'{}' is not an ISO 4217 code (listing '{}')",
                    self.currency, self.id
                ),
            });
        }
        if self.min_nights == 0 {
            return Err(BookingError::Validation {
                field: "min_nights",
                reason: format!("min_nights must be at least 1 (listing '{}')", self.id),
            });
        }
        Ok(())
    }
}
