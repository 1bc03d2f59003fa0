//! Shared fixtures for service tests: in-memory database plus seed data.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

use crate::domain::port::{ChargerOption, Port};
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

/// Fresh in-memory SQLite with all migrations applied.
pub(crate) async fn test_repos() -> Arc<SeaOrmRepositoryProvider> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations");
    Arc::new(SeaOrmRepositoryProvider::new(db))
}

/// Insert a port with the standard two-charger setup (normal 7 kW, fast 40 kW).
pub(crate) async fn seed_port(repos: &dyn RepositoryProvider, id: &str, lat: f64, lon: f64) {
    let now = Utc::now();
    let port = Port {
        id: id.to_string(),
        location: format!("Test location {}", id),
        latitude: lat,
        longitude: lon,
        charger_options: vec![
            ChargerOption {
                charger_type: "normal".to_string(),
                speed_kw: 7.0,
            },
            ChargerOption {
                charger_type: "fast".to_string(),
                speed_kw: 40.0,
            },
        ],
        created_at: now,
        updated_at: now,
    };
    repos.ports().save(port).await.expect("seed port");
}
