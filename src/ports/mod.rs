pub mod booking_repo;
pub mod calendar_store;
pub mod listing_directory;
