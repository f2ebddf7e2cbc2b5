pub mod availability;
pub mod booking;
pub mod calendar;
pub mod dates;
pub mod listing;
pub mod pricing;
