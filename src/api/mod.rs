//! REST API module
//!
//! HTTP endpoints for authentication, ports, bookings, feedback, user
//! administration and monitoring, with Swagger documentation at `/docs`.

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::create_api_router;
