//! Booking workflow: creation, cancellation, listing
//!
//! The service recomputes estimates server-side from the static tables
//! rather than trusting client-submitted figures, and performs a friendly
//! pre-insert conflict lookup; the unique (port, date, slot) index in the
//! ledger remains the authoritative guard under concurrency.

use std::sync::Arc;

use chrono::NaiveDate;
use metrics::counter;
use tracing::info;

use crate::domain::booking::{Booking, NewBooking, PaymentStatus, TimeSlot};
use crate::domain::estimate::{charge_estimate, ChargeEstimate};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Input for creating a booking. Identity comes from the session, not the
/// request body.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub port_id: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub charger_type: String,
    pub booking_date: NaiveDate,
    pub time_slot: TimeSlot,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Estimate charging figures for a vehicle on one of the port's chargers.
    pub async fn estimate(
        &self,
        port_id: &str,
        vehicle_model: &str,
        charger_type: &str,
    ) -> DomainResult<ChargeEstimate> {
        let port = self
            .repos
            .ports()
            .find_by_id(port_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Port", "id", port_id))?;

        charge_estimate(vehicle_model, charger_type, &port.charger_options)
    }

    /// Create a booking for the authenticated customer.
    pub async fn create(
        &self,
        customer_name: &str,
        customer_email: &str,
        cmd: CreateBookingCommand,
    ) -> DomainResult<Booking> {
        let port = self
            .repos
            .ports()
            .find_by_id(&cmd.port_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Port", "id", cmd.port_id.clone()))?;

        let estimate = charge_estimate(&cmd.vehicle_model, &cmd.charger_type, &port.charger_options)?;

        // Friendly pre-check so the common case gets a clean conflict
        // message without hitting the constraint.
        let taken = self
            .repos
            .bookings()
            .find_for_slot(cmd.booking_date, cmd.time_slot)
            .await?;
        if taken.iter().any(|b| b.port_id == port.id) {
            counter!("voltport_booking_conflicts_total").increment(1);
            return Err(DomainError::Conflict(format!(
                "Port {} is already booked for {} at {}",
                port.id, cmd.booking_date, cmd.time_slot
            )));
        }

        let new_booking = NewBooking {
            customer_name: customer_name.to_string(),
            customer_email: customer_email.to_string(),
            port_id: cmd.port_id,
            vehicle_type: cmd.vehicle_type,
            vehicle_model: cmd.vehicle_model,
            charger_type: cmd.charger_type,
            booking_date: cmd.booking_date,
            time_slot: cmd.time_slot,
            battery_kwh: estimate.battery_kwh,
            duration_hours: estimate.duration_hours,
            cost: estimate.cost,
        };

        match self.repos.bookings().create(new_booking).await {
            Ok(booking) => {
                counter!("voltport_bookings_created_total").increment(1);
                info!(
                    reference = %booking.reference,
                    port = %booking.port_id,
                    date = %booking.booking_date,
                    slot = %booking.time_slot,
                    "Booking created"
                );
                Ok(booking)
            }
            Err(e @ DomainError::Conflict(_)) => {
                counter!("voltport_booking_conflicts_total").increment(1);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Cancel a booking. Customers may only cancel their own; admins any.
    pub async fn cancel(
        &self,
        reference: &str,
        requester_email: &str,
        requester_is_admin: bool,
    ) -> DomainResult<()> {
        let booking = self
            .repos
            .bookings()
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "reference", reference))?;

        if !requester_is_admin && !booking.customer_email.eq_ignore_ascii_case(requester_email) {
            return Err(DomainError::Forbidden(
                "Bookings can only be cancelled by their owner".to_string(),
            ));
        }

        self.repos.bookings().delete(reference).await?;
        counter!("voltport_bookings_cancelled_total").increment(1);
        info!(reference = %reference, "Booking cancelled");
        Ok(())
    }

    /// Bookings visible to the requester: all for admins, own otherwise.
    pub async fn list_for(
        &self,
        requester_email: &str,
        requester_is_admin: bool,
    ) -> DomainResult<Vec<Booking>> {
        if requester_is_admin {
            self.repos.bookings().find_all().await
        } else {
            self.repos.bookings().find_by_email(requester_email).await
        }
    }

    /// Fetch one booking, applying the same visibility rule as `list_for`.
    pub async fn get(
        &self,
        reference: &str,
        requester_email: &str,
        requester_is_admin: bool,
    ) -> DomainResult<Booking> {
        let booking = self
            .repos
            .bookings()
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "reference", reference))?;

        if !requester_is_admin && !booking.customer_email.eq_ignore_ascii_case(requester_email) {
            return Err(DomainError::Forbidden(
                "Bookings are only visible to their owner".to_string(),
            ));
        }
        Ok(booking)
    }

    /// Mark a booking as paid (admin operation).
    pub async fn mark_paid(&self, reference: &str) -> DomainResult<()> {
        self.repos
            .bookings()
            .set_payment_status(reference, PaymentStatus::Paid)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{seed_port, test_repos};

    fn cmd(port_id: &str, date: &str, slot: TimeSlot) -> CreateBookingCommand {
        CreateBookingCommand {
            port_id: port_id.to_string(),
            vehicle_type: "car".to_string(),
            vehicle_model: "Tata Nexon EV".to_string(),
            charger_type: "fast".to_string(),
            booking_date: date.parse().unwrap(),
            time_slot: slot,
        }
    }

    #[tokio::test]
    async fn first_booking_gets_reference_ev0001() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;

        let service = BookingService::new(repos);
        let booking = service
            .create("Aziz", "aziz@example.com", cmd("STN-001", "2026-09-01", TimeSlot::Slot0900))
            .await
            .unwrap();

        assert_eq!(booking.reference, "EV0001");
        assert_eq!(booking.battery_kwh, 30.2);
        assert_eq!(booking.cost, 604);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn references_increment_sequentially() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;

        let service = BookingService::new(repos);
        for (i, slot) in [TimeSlot::Slot0900, TimeSlot::Slot1000, TimeSlot::Slot1100]
            .into_iter()
            .enumerate()
        {
            let booking = service
                .create("Aziz", "aziz@example.com", cmd("STN-001", "2026-09-01", slot))
                .await
                .unwrap();
            assert_eq!(booking.reference, format!("EV{:04}", i + 1));
        }
    }

    #[tokio::test]
    async fn same_slot_twice_yields_one_success_one_conflict() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;

        let service = BookingService::new(repos);
        let first = service
            .create("Aziz", "aziz@example.com", cmd("STN-001", "2026-09-01", TimeSlot::Slot0900))
            .await;
        let second = service
            .create("Bekzod", "bekzod@example.com", cmd("STN-001", "2026-09-01", TimeSlot::Slot0900))
            .await;

        assert!(first.is_ok());
        assert!(matches!(second, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn unknown_port_is_not_found() {
        let repos = test_repos().await;
        let service = BookingService::new(repos);

        let result = service
            .create("Aziz", "aziz@example.com", cmd("NOPE", "2026-09-01", TimeSlot::Slot0900))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn charger_type_must_match_port_options() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;

        let service = BookingService::new(repos);
        let mut bad = cmd("STN-001", "2026-09-01", TimeSlot::Slot0900);
        bad.charger_type = "ultra".to_string();

        let result = service.create("Aziz", "aziz@example.com", bad).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn customer_cannot_cancel_someone_elses_booking() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;

        let service = BookingService::new(repos);
        let booking = service
            .create("Aziz", "aziz@example.com", cmd("STN-001", "2026-09-01", TimeSlot::Slot0900))
            .await
            .unwrap();

        let denied = service
            .cancel(&booking.reference, "bekzod@example.com", false)
            .await;
        assert!(matches!(denied, Err(DomainError::Forbidden(_))));

        // Owner succeeds
        service
            .cancel(&booking.reference, "aziz@example.com", false)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn admin_can_cancel_any_booking() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;

        let service = BookingService::new(repos);
        let booking = service
            .create("Aziz", "aziz@example.com", cmd("STN-001", "2026-09-01", TimeSlot::Slot0900))
            .await
            .unwrap();

        service
            .cancel(&booking.reference, "admin@example.com", true)
            .await
            .unwrap();

        let gone = service
            .cancel(&booking.reference, "admin@example.com", true)
            .await;
        assert!(matches!(gone, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn customers_see_only_their_own_bookings() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;
        seed_port(&*repos, "STN-002", 41.35, 69.20).await;

        let service = BookingService::new(repos);
        service
            .create("Aziz", "aziz@example.com", cmd("STN-001", "2026-09-01", TimeSlot::Slot0900))
            .await
            .unwrap();
        service
            .create("Bekzod", "bekzod@example.com", cmd("STN-002", "2026-09-01", TimeSlot::Slot0900))
            .await
            .unwrap();

        let own = service.list_for("aziz@example.com", false).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].customer_email, "aziz@example.com");

        let all = service.list_for("admin@example.com", true).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn mark_paid_updates_payment_status() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;

        let service = BookingService::new(repos);
        let booking = service
            .create("Aziz", "aziz@example.com", cmd("STN-001", "2026-09-01", TimeSlot::Slot0900))
            .await
            .unwrap();

        service.mark_paid(&booking.reference).await.unwrap();
        let updated = service
            .get(&booking.reference, "aziz@example.com", false)
            .await
            .unwrap();
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
    }
}
