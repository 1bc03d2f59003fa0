//! Repository traits for the domain layer

use super::booking::BookingRepository;
use super::feedback::FeedbackRepository;
use super::port::PortRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let port = repos.ports().find_by_id("STN-001").await?;
///     let taken = repos.bookings().find_for_slot(date, slot).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn ports(&self) -> &dyn PortRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn users(&self) -> &dyn UserRepository;
    fn feedback(&self) -> &dyn FeedbackRepository;
}
