//! Database entities

pub mod booking;
pub mod feedback;
pub mod port;
pub mod user;
