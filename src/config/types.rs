use serde::{Deserialize, Serialize};

use crate::domain::listing::Listing;
use crate::domain::pricing::DEFAULT_SERVICE_FEE_RATE;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Listings the engine serves, seeded at startup.
    #[serde(default)]
    pub listings: Vec<Listing>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Guest-facing surcharge applied to the nightly subtotal.
    #[serde(default = "default_service_fee_rate")]
    pub service_fee_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            service_fee_rate: default_service_fee_rate(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// Default query horizon for calendar views, in days.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
        }
    }
}

fn default_service_fee_rate() -> f64 {
    DEFAULT_SERVICE_FEE_RATE
}

fn default_horizon_days() -> u32 {
    365
}
