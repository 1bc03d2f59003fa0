//! Application services

pub mod availability;
pub mod booking;

pub use availability::{AvailabilityQuery, AvailabilityService};
pub use booking::{BookingService, CreateBookingCommand};

#[cfg(test)]
pub(crate) mod test_support;
