pub mod model;
pub mod repository;

pub use model::{ChargerOption, Port, PortAvailability, PortStatus};
pub use repository::PortRepository;
