//! Cross-cutting helpers shared by all layers.

pub mod shutdown;
pub mod validations;

pub use shutdown::{listen_for_shutdown_signals, ShutdownCoordinator, ShutdownSignal};
pub use validations::validate_pagination;
