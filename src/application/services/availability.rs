//! Port availability resolution
//!
//! Joins the port registry against the booking ledger for one
//! (date, time slot) pair. Status is computed per query, never stored, so
//! it cannot drift from the ledger. The in-memory join is
//! O(ports x bookings), fine at fleet sizes this product targets.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::booking::TimeSlot;
use crate::domain::geo::{haversine_km, Coordinate};
use crate::domain::port::{PortAvailability, PortStatus};
use crate::domain::{DomainResult, RepositoryProvider};

/// One availability request.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    /// Requester location; when present, results carry a distance and are
    /// sorted nearest-first.
    pub origin: Option<Coordinate>,
}

pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Every port, decorated with its computed status for the query.
    pub async fn resolve(&self, query: AvailabilityQuery) -> DomainResult<Vec<PortAvailability>> {
        let ports = self.repos.ports().find_all().await?;
        let taken = self
            .repos
            .bookings()
            .find_for_slot(query.date, query.time_slot)
            .await?;

        let mut results: Vec<PortAvailability> = ports
            .into_iter()
            .map(|port| {
                let status = if taken.iter().any(|b| b.port_id == port.id) {
                    PortStatus::Booked
                } else {
                    PortStatus::Available
                };
                let distance_km = query
                    .origin
                    .map(|origin| haversine_km(origin, port.coordinate()));
                PortAvailability {
                    port,
                    status,
                    distance_km,
                }
            })
            .collect();

        if query.origin.is_some() {
            results.sort_by(|a, b| {
                a.distance_km
                    .partial_cmp(&b.distance_km)
                    .unwrap_or(Ordering::Equal)
            });
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{seed_port, test_repos};
    use crate::domain::booking::NewBooking;

    fn query(date: &str, slot: TimeSlot) -> AvailabilityQuery {
        AvailabilityQuery {
            date: date.parse().unwrap(),
            time_slot: slot,
            origin: None,
        }
    }

    #[tokio::test]
    async fn port_is_booked_iff_slot_taken() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;
        seed_port(&*repos, "STN-002", 41.35, 69.20).await;

        repos
            .bookings()
            .create(NewBooking {
                customer_name: "Aziz".into(),
                customer_email: "aziz@example.com".into(),
                port_id: "STN-001".into(),
                vehicle_type: "car".into(),
                vehicle_model: "Tata Nexon EV".into(),
                charger_type: "fast".into(),
                booking_date: "2026-09-01".parse().unwrap(),
                time_slot: TimeSlot::Slot1000,
                battery_kwh: 30.2,
                duration_hours: 0.755,
                cost: 604,
            })
            .await
            .unwrap();

        let service = AvailabilityService::new(repos);
        let results = service
            .resolve(query("2026-09-01", TimeSlot::Slot1000))
            .await
            .unwrap();

        let by_id = |id: &str| results.iter().find(|r| r.port.id == id).unwrap();
        assert_eq!(by_id("STN-001").status, PortStatus::Booked);
        assert_eq!(by_id("STN-002").status, PortStatus::Available);
    }

    #[tokio::test]
    async fn other_slot_does_not_block() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;

        repos
            .bookings()
            .create(NewBooking {
                customer_name: "Aziz".into(),
                customer_email: "aziz@example.com".into(),
                port_id: "STN-001".into(),
                vehicle_type: "car".into(),
                vehicle_model: "Tata Nexon EV".into(),
                charger_type: "fast".into(),
                booking_date: "2026-09-01".parse().unwrap(),
                time_slot: TimeSlot::Slot1000,
                battery_kwh: 30.2,
                duration_hours: 0.755,
                cost: 604,
            })
            .await
            .unwrap();

        let service = AvailabilityService::new(repos);

        let results = service
            .resolve(query("2026-09-01", TimeSlot::Slot1100))
            .await
            .unwrap();
        assert_eq!(results[0].status, PortStatus::Available);

        let results = service
            .resolve(query("2026-09-02", TimeSlot::Slot1000))
            .await
            .unwrap();
        assert_eq!(results[0].status, PortStatus::Available);
    }

    #[tokio::test]
    async fn resolve_is_idempotent_without_writes() {
        let repos = test_repos().await;
        seed_port(&*repos, "STN-001", 41.31, 69.28).await;
        seed_port(&*repos, "STN-002", 41.35, 69.20).await;

        let service = AvailabilityService::new(repos);
        let q = query("2026-09-01", TimeSlot::Slot0900);

        let first = service.resolve(q).await.unwrap();
        let second = service.resolve(q).await.unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.port.id, b.port.id);
            assert_eq!(a.status, b.status);
        }
    }

    #[tokio::test]
    async fn origin_sorts_nearest_first() {
        let repos = test_repos().await;
        // STN-FAR is ~2 degrees of latitude away, STN-NEAR ~0.01
        seed_port(&*repos, "STN-FAR", 43.30, 69.28).await;
        seed_port(&*repos, "STN-NEAR", 41.32, 69.28).await;

        let service = AvailabilityService::new(repos);
        let results = service
            .resolve(AvailabilityQuery {
                date: "2026-09-01".parse().unwrap(),
                time_slot: TimeSlot::Slot0900,
                origin: Some(Coordinate::new(41.31, 69.28)),
            })
            .await
            .unwrap();

        assert_eq!(results[0].port.id, "STN-NEAR");
        assert_eq!(results[1].port.id, "STN-FAR");
        assert!(results[0].distance_km.unwrap() < results[1].distance_km.unwrap());
    }
}
