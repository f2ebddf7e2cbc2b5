use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::dates::DateRange;
use crate::domain::pricing::PriceBreakdown;
use crate::error::{BookingError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub party_size: u32,
    #[serde(default)]
    pub special_requests: Option<String>,
}

impl Guest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BookingError::validation("guest_name", "name is required"));
        }
        if !self.email.contains('@') || self.email.trim().is_empty() {
            return Err(BookingError::Validation {
                field: "guest_email",
                reason: format!("'{}' is not a valid email address", self.email),
            });
        }
        if self.party_size == 0 {
            return Err(BookingError::validation(
                "guest_count",
                "party size must be at least 1",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    /// Human-shareable reference, distinct from the internal id.
    pub reference: String,
    pub listing_id: String,
    pub range: DateRange,
    pub guest: Guest,
    pub status: BookingStatus,
    pub price: PriceBreakdown,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// A new booking starts Pending; the booking service confirms it once
    /// the calendar reservation has gone through.
    pub fn new(listing_id: String, range: DateRange, guest: Guest, price: PriceBreakdown) -> Self {
        let id = Uuid::new_v4();
        let reference = make_reference(&id);
        Self {
            id,
            reference,
            listing_id,
            range,
            guest,
            status: BookingStatus::Pending,
            price,
            created_at: Utc::now(),
        }
    }

    pub fn confirm(&mut self) {
        self.status = BookingStatus::Confirmed;
    }
}

impl std::fmt::Display for Booking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Booking {} ({})", self.reference, self.status)?;
        writeln!(f, "Listing: {}", self.listing_id)?;
        writeln!(
            f,
            "Dates: {} ({} nights)",
            self.range,
            self.range.nights()
        )?;
        writeln!(
            f,
            "Guest: {} <{}>, party of {}",
            self.guest.name, self.guest.email, self.guest.party_size
        )?;
        if let Some(ref requests) = self.guest.special_requests {
            writeln!(f, "Special requests: {requests}")?;
        }
        write!(f, "{}", self.price)
    }
}

fn make_reference(id: &Uuid) -> String {
    let simple = id.simple().to_string();
    format!("BK-{}", simple[..8].to_uppercase())
}
