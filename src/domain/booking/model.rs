//! Booking domain entity

use chrono::{DateTime, NaiveDate, Utc};

/// Prefix of human-readable booking references.
pub const REFERENCE_PREFIX: &str = "EV";

/// Format a booking reference from its sequence number.
///
/// The first booking is `EV0001`; the numeric suffix is padded to at
/// least 4 digits.
pub fn format_reference(id: i32) -> String {
    format!("{REFERENCE_PREFIX}{id:04}")
}

/// Fixed set of bookable start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    Slot0900,
    Slot1000,
    Slot1100,
    Slot1200,
    Slot1300,
    Slot1400,
    Slot1500,
    Slot1600,
    Slot1700,
    Slot1800,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 10] = [
        Self::Slot0900,
        Self::Slot1000,
        Self::Slot1100,
        Self::Slot1200,
        Self::Slot1300,
        Self::Slot1400,
        Self::Slot1500,
        Self::Slot1600,
        Self::Slot1700,
        Self::Slot1800,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slot0900 => "09:00",
            Self::Slot1000 => "10:00",
            Self::Slot1100 => "11:00",
            Self::Slot1200 => "12:00",
            Self::Slot1300 => "13:00",
            Self::Slot1400 => "14:00",
            Self::Slot1500 => "15:00",
            Self::Slot1600 => "16:00",
            Self::Slot1700 => "17:00",
            Self::Slot1800 => "18:00",
        }
    }

    /// Parse an "HH:MM" start time. Unknown times are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == s.trim())
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "paid" => Self::Paid,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data required to create a booking. The reference and timestamps are
/// assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Customer name captured at booking time (denormalized)
    pub customer_name: String,
    /// Customer email captured at booking time (denormalized)
    pub customer_email: String,
    pub port_id: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub charger_type: String,
    pub booking_date: NaiveDate,
    pub time_slot: TimeSlot,
    /// Battery capacity at booking time, kWh
    pub battery_kwh: f64,
    /// Estimated charging duration, hours (full precision)
    pub duration_hours: f64,
    /// Estimated cost, whole currency units
    pub cost: i64,
}

/// A reservation of one port for one date and time slot.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i32,
    /// Human-readable reference, e.g. "EV0001"
    pub reference: String,
    pub customer_name: String,
    pub customer_email: String,
    pub port_id: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub charger_type: String,
    pub booking_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub battery_kwh: f64,
    pub duration_hours: f64,
    pub cost: i64,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_prefixed_and_padded() {
        assert_eq!(format_reference(1), "EV0001");
        assert_eq!(format_reference(42), "EV0042");
        assert_eq!(format_reference(9999), "EV9999");
        assert_eq!(format_reference(10000), "EV10000");
    }

    #[test]
    fn time_slot_round_trips() {
        for slot in TimeSlot::ALL {
            assert_eq!(TimeSlot::parse(slot.as_str()), Some(slot));
        }
    }

    #[test]
    fn unknown_time_slot_is_rejected() {
        assert_eq!(TimeSlot::parse("09:30"), None);
        assert_eq!(TimeSlot::parse("19:00"), None);
        assert_eq!(TimeSlot::parse(""), None);
    }
}
