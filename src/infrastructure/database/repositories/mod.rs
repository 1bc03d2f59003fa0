//! SeaORM repository implementations

pub mod booking_repository;
pub mod feedback_repository;
pub mod port_repository;
pub mod repository_provider;
pub mod user_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use feedback_repository::SeaOrmFeedbackRepository;
pub use port_repository::SeaOrmPortRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;

/// True when a driver error reports a unique-constraint violation.
///
/// SQLite spells it "UNIQUE constraint failed", Postgres "duplicate key
/// value violates unique constraint"; match both so the database URL
/// stays switchable.
pub(crate) fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.to_lowercase().contains("duplicate key")
}
