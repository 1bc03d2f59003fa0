//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::feedback::FeedbackRepository;
use crate::domain::port::PortRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::feedback_repository::SeaOrmFeedbackRepository;
use super::port_repository::SeaOrmPortRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    ports: SeaOrmPortRepository,
    bookings: SeaOrmBookingRepository,
    users: SeaOrmUserRepository,
    feedback: SeaOrmFeedbackRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            ports: SeaOrmPortRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            feedback: SeaOrmFeedbackRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn ports(&self) -> &dyn PortRepository {
        &self.ports
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn feedback(&self) -> &dyn FeedbackRepository {
        &self.feedback
    }
}
