pub mod types;

use std::path::Path;

use crate::error::{BookingError, Result};
use types::Config;

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        BookingError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    let config: Config = serde_yml::from_str(&content)?;

    if !(0.0..1.0).contains(&config.pricing.service_fee_rate) {
        return Err(BookingError::Config(format!(
            "service_fee_rate must be in [0, 1), got {}",
            config.pricing.service_fee_rate
        )));
    }
    if config.calendar.horizon_days == 0 {
        return Err(BookingError::Config(
            "calendar.horizon_days must be at least 1".into(),
        ));
    }
    for listing in &config.listings {
        listing.validate()?;
    }
    Ok(config)
}
