pub mod booking;
pub mod error;
pub mod estimate;
pub mod feedback;
pub mod geo;
pub mod port;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use booking::{format_reference, Booking, NewBooking, PaymentStatus, TimeSlot};
pub use error::{DomainError, DomainResult};
pub use estimate::{battery_capacity_kwh, charge_estimate, ChargeEstimate, VEHICLE_CATALOG};
pub use feedback::Feedback;
pub use geo::{haversine_km, Coordinate};
pub use port::{ChargerOption, Port, PortAvailability, PortStatus};
pub use repositories::RepositoryProvider;
pub use user::{Role, User};
