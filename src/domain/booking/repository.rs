//! Booking repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Booking, NewBooking, PaymentStatus, TimeSlot};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking and allocate its sequential reference.
    ///
    /// Implementations must make the (port, date, slot) uniqueness and the
    /// reference allocation atomic; a lost race surfaces as
    /// [`DomainError::Conflict`](crate::domain::DomainError::Conflict).
    async fn create(&self, booking: NewBooking) -> DomainResult<Booking>;

    /// Find a booking by its human-readable reference
    async fn find_by_reference(&self, reference: &str) -> DomainResult<Option<Booking>>;

    /// All bookings occupying the given date and time slot
    async fn find_for_slot(&self, date: NaiveDate, slot: TimeSlot) -> DomainResult<Vec<Booking>>;

    /// All bookings, newest first
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Bookings created by the given customer email, newest first
    async fn find_by_email(&self, email: &str) -> DomainResult<Vec<Booking>>;

    /// Delete a booking by reference
    async fn delete(&self, reference: &str) -> DomainResult<()>;

    /// Update the payment status of a booking
    async fn set_payment_status(
        &self,
        reference: &str,
        status: PaymentStatus,
    ) -> DomainResult<()>;

    /// Total number of bookings
    async fn count(&self) -> DomainResult<u64>;
}
