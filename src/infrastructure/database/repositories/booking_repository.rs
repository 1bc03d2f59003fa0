//! SeaORM implementation of BookingRepository
//!
//! Reference allocation piggybacks on the auto-increment primary key: the
//! row is inserted first, then its reference is derived from the assigned
//! id inside the same transaction. The unique slot index makes concurrent
//! double-booking impossible.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::booking::{
    format_reference, Booking, BookingRepository, NewBooking, PaymentStatus, TimeSlot,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let time_slot = TimeSlot::parse(&m.time_slot).ok_or_else(|| {
        DomainError::Validation(format!(
            "Corrupt time_slot '{}' on booking {}",
            m.time_slot, m.reference
        ))
    })?;
    Ok(Booking {
        id: m.id,
        reference: m.reference,
        customer_name: m.customer_name,
        customer_email: m.customer_email,
        port_id: m.port_id,
        vehicle_type: m.vehicle_type,
        vehicle_model: m.vehicle_model,
        charger_type: m.charger_type,
        booking_date: m.booking_date,
        time_slot,
        battery_kwh: m.battery_kwh,
        duration_hours: m.duration_hours,
        cost: m.cost,
        payment_status: PaymentStatus::from_str(&m.payment_status),
        created_at: m.created_at,
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, b: NewBooking) -> DomainResult<Booking> {
        debug!(
            "Creating booking: port={} date={} slot={}",
            b.port_id, b.booking_date, b.time_slot
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        // Placeholder reference until the auto-increment id is known;
        // must be unique so concurrent inserts don't collide on it.
        let placeholder = format!("pending-{}", uuid::Uuid::new_v4());

        let model = booking::ActiveModel {
            reference: Set(placeholder),
            customer_name: Set(b.customer_name.clone()),
            customer_email: Set(b.customer_email.clone()),
            port_id: Set(b.port_id.clone()),
            vehicle_type: Set(b.vehicle_type.clone()),
            vehicle_model: Set(b.vehicle_model.clone()),
            charger_type: Set(b.charger_type.clone()),
            booking_date: Set(b.booking_date),
            time_slot: Set(b.time_slot.as_str().to_string()),
            battery_kwh: Set(b.battery_kwh),
            duration_hours: Set(b.duration_hours),
            cost: Set(b.cost),
            payment_status: Set(PaymentStatus::Pending.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await.map_err(|e| {
            if super::is_unique_violation(&e) {
                DomainError::Conflict(format!(
                    "Port {} is already booked for {} at {}",
                    b.port_id, b.booking_date, b.time_slot
                ))
            } else {
                db_err(e)
            }
        })?;

        let mut active: booking::ActiveModel = inserted.into();
        active.reference = Set(format_reference(*active.id.as_ref()));
        let updated = active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        model_to_domain(updated)
    }

    async fn find_by_reference(&self, reference: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::Reference.eq(reference))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_for_slot(&self, date: NaiveDate, slot: TimeSlot) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::BookingDate.eq(date))
            .filter(booking::Column::TimeSlot.eq(slot.as_str()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::CustomerEmail.eq(email))
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn delete(&self, reference: &str) -> DomainResult<()> {
        let result = booking::Entity::delete_many()
            .filter(booking::Column::Reference.eq(reference))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Booking", "reference", reference));
        }
        Ok(())
    }

    async fn set_payment_status(
        &self,
        reference: &str,
        status: PaymentStatus,
    ) -> DomainResult<()> {
        let existing = booking::Entity::find()
            .filter(booking::Column::Reference.eq(reference))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Booking", "reference", reference));
        };

        let mut active: booking::ActiveModel = existing.into();
        active.payment_status = Set(status.as_str().to_string());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        booking::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{seed_port, test_repos};
    use crate::domain::RepositoryProvider;

    fn slot_booking(email: &str) -> NewBooking {
        NewBooking {
            customer_name: "Aziz Karimov".to_string(),
            customer_email: email.to_string(),
            port_id: "STN-001".to_string(),
            vehicle_type: "car".to_string(),
            vehicle_model: "Tata Nexon EV".to_string(),
            charger_type: "fast".to_string(),
            booking_date: "2026-09-01".parse().unwrap(),
            time_slot: TimeSlot::Slot1000,
            battery_kwh: 30.2,
            duration_hours: 0.755,
            cost: 604,
        }
    }

    #[tokio::test]
    async fn unique_slot_index_rejects_direct_double_insert() {
        let repos = test_repos().await;
        seed_port(repos.as_ref(), "STN-001", 41.311, 69.279).await;

        let first = repos
            .bookings()
            .create(slot_booking("aziz@example.com"))
            .await
            .unwrap();
        assert_eq!(first.reference, "EV0001");

        // Straight to the repository, no service-level pre-check in front:
        // the index itself must refuse the second row for the same slot
        let second = repos
            .bookings()
            .create(slot_booking("olim@example.com"))
            .await;
        assert!(matches!(second, Err(DomainError::Conflict(_))), "got {second:?}");
    }

    #[tokio::test]
    async fn other_slots_on_the_same_port_stay_bookable() {
        let repos = test_repos().await;
        seed_port(repos.as_ref(), "STN-001", 41.311, 69.279).await;

        repos
            .bookings()
            .create(slot_booking("aziz@example.com"))
            .await
            .unwrap();

        let mut later = slot_booking("olim@example.com");
        later.time_slot = TimeSlot::Slot1100;
        let second = repos.bookings().create(later).await.unwrap();
        assert_eq!(second.reference, "EV0002");
    }
}
