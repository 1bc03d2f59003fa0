//! Charging port domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::geo::Coordinate;

/// One charger offered by a port: an (electrical type, speed) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargerOption {
    /// Charger type label, e.g. "normal", "fast"
    pub charger_type: String,
    /// Charging speed in kW
    pub speed_kw: f64,
}

/// Availability of a port for a given date and time slot.
///
/// Computed per query from the booking ledger, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortStatus {
    Available,
    Booked,
}

impl PortStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
        }
    }
}

impl std::fmt::Display for PortStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A physical charging-port location.
#[derive(Debug, Clone)]
pub struct Port {
    /// Human identifier, e.g. "STN-001"
    pub id: String,
    /// Free-text location description
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Charger options offered at this port
    pub charger_options: Vec<ChargerOption>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Port {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A port decorated with its computed status for one (date, slot) query.
#[derive(Debug, Clone)]
pub struct PortAvailability {
    pub port: Port,
    pub status: PortStatus,
    /// Distance from the requester, when a coordinate was supplied
    pub distance_km: Option<f64>,
}
