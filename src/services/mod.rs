pub mod blocking;
pub mod booking;
