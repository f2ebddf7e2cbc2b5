use serde::{Deserialize, Serialize};

use crate::domain::calendar::CalendarDay;
use crate::error::{BookingError, Result};

/// Canonical guest-facing fee rate. The marketplace frontend disagreed with
/// itself (5% in one widget, 10% in another); the configurable default is
/// the booking-widget rate.
pub const DEFAULT_SERVICE_FEE_RATE: f64 = 0.05;

/// Itemized cost of a stay. Prices are in the listing's currency, rounded
/// to minor units once, at the end of the computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub nights: u32,
    pub nightly_subtotal: f64,
    pub service_fee: f64,
    pub total: f64,
    pub currency: String,
}

impl std::fmt::Display for PriceBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} nights subtotal: {} {:.2}",
            self.nights, self.currency, self.nightly_subtotal
        )?;
        writeln!(f, "Service fee: {} {:.2}", self.currency, self.service_fee)?;
        write!(f, "Total: {} {:.2}", self.currency, self.total)
    }
}

/// Round to currency minor units (2 decimals).
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Price a stay from its night-by-night snapshot. Per-night rate is the
/// day's override if set, else `base_price`; rounding happens once on the
/// summed subtotal so per-night rounding error cannot compound.
///
/// Calling this with an empty snapshot is a contract violation: the caller
/// must have validated the range first.
pub fn quote(
    days: &[CalendarDay],
    base_price: f64,
    service_fee_rate: f64,
    currency: &str,
) -> Result<PriceBreakdown> {
    debug_assert!(!days.is_empty(), "quote requires at least one night");
    if days.is_empty() {
        return Err(BookingError::validation(
            "range",
            "cannot price a zero-night stay",
        ));
    }

    let nightly_subtotal = round_to_cents(days.iter().map(|d| d.nightly_rate(base_price)).sum());
    let service_fee = round_to_cents(nightly_subtotal * service_fee_rate);
    let total = round_to_cents(nightly_subtotal + service_fee);

    Ok(PriceBreakdown {
        nights: u32::try_from(days.len()).unwrap_or(u32::MAX),
        nightly_subtotal,
        service_fee,
        total,
        currency: currency.to_string(),
    })
}
