//! API data transfer objects

pub mod common;
pub mod validated_json;

pub use common::{ApiResponse, PaginatedResponse, PaginationParams};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
