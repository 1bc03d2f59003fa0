pub mod model;
pub mod repository;

pub use model::{format_reference, Booking, NewBooking, PaymentStatus, TimeSlot, REFERENCE_PREFIX};
pub use repository::BookingRepository;
