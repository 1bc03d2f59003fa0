//! Charging estimate calculator
//!
//! Pure functions: battery capacity comes from a static vehicle table,
//! duration and cost follow from the selected charger option. No I/O.

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::port::ChargerOption;

/// Speed threshold (kW) above which the higher unit rate applies.
pub const FAST_SPEED_THRESHOLD_KW: f64 = 20.0;

/// Unit price per charging hour for chargers at or above the threshold.
pub const FAST_RATE_PER_HOUR: f64 = 800.0;

/// Unit price per charging hour for slower chargers.
pub const NORMAL_RATE_PER_HOUR: f64 = 300.0;

/// Static vehicle catalog: (model name, battery capacity in kWh).
pub const VEHICLE_CATALOG: &[(&str, f64)] = &[
    ("Tata Nexon EV", 30.2),
    ("Tata Tigor EV", 26.0),
    ("MG ZS EV", 44.5),
    ("Hyundai Kona Electric", 39.2),
    ("Mahindra XUV400", 39.4),
    ("Revolt RV400", 3.2),
    ("Ather 450X", 2.9),
    ("Ola S1 Pro", 4.0),
    ("TVS iQube", 4.56),
    ("Bajaj Chetak", 3.0),
];

/// Battery capacity for a vehicle model. Unknown models yield 0.0.
pub fn battery_capacity_kwh(model: &str) -> f64 {
    VEHICLE_CATALOG
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(model.trim()))
        .map(|(_, kwh)| *kwh)
        .unwrap_or(0.0)
}

/// Computed charging estimate for one booking.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeEstimate {
    /// Battery capacity of the vehicle, kWh
    pub battery_kwh: f64,
    /// Full-precision charging duration, hours
    pub duration_hours: f64,
    /// Unit price applied, per charging hour
    pub rate_per_hour: f64,
    /// Total cost, rounded to the nearest whole currency unit
    pub cost: i64,
}

/// Compute the estimate for `vehicle_model` on the charger option of
/// `options` whose type matches `charger_type`.
///
/// A charger type the port does not offer, or a non-positive speed, is
/// invalid input. Duration keeps full precision; only the cost is rounded.
pub fn charge_estimate(
    vehicle_model: &str,
    charger_type: &str,
    options: &[ChargerOption],
) -> DomainResult<ChargeEstimate> {
    let option = options
        .iter()
        .find(|o| o.charger_type.eq_ignore_ascii_case(charger_type.trim()))
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "Charger type '{}' is not offered by this port",
                charger_type
            ))
        })?;

    if option.speed_kw <= 0.0 {
        return Err(DomainError::Validation(format!(
            "Charger option '{}' has invalid speed {} kW",
            option.charger_type, option.speed_kw
        )));
    }

    let battery_kwh = battery_capacity_kwh(vehicle_model);
    let duration_hours = battery_kwh / option.speed_kw;
    let rate_per_hour = if option.speed_kw >= FAST_SPEED_THRESHOLD_KW {
        FAST_RATE_PER_HOUR
    } else {
        NORMAL_RATE_PER_HOUR
    };
    let cost = (duration_hours * rate_per_hour).round() as i64;

    Ok(ChargeEstimate {
        battery_kwh,
        duration_hours,
        rate_per_hour,
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<ChargerOption> {
        vec![
            ChargerOption {
                charger_type: "normal".to_string(),
                speed_kw: 7.0,
            },
            ChargerOption {
                charger_type: "fast".to_string(),
                speed_kw: 40.0,
            },
        ]
    }

    #[test]
    fn nexon_on_fast_charger() {
        let est = charge_estimate("Tata Nexon EV", "fast", &options()).unwrap();
        assert_eq!(est.battery_kwh, 30.2);
        assert!((est.duration_hours - 0.755).abs() < 1e-12);
        assert_eq!(est.rate_per_hour, FAST_RATE_PER_HOUR);
        assert_eq!(est.cost, 604);
    }

    #[test]
    fn rv400_on_normal_charger() {
        let est = charge_estimate("Revolt RV400", "normal", &options()).unwrap();
        assert_eq!(est.battery_kwh, 3.2);
        assert!((est.duration_hours - 3.2 / 7.0).abs() < 1e-12);
        assert_eq!(est.rate_per_hour, NORMAL_RATE_PER_HOUR);
        assert_eq!(est.cost, 137);
    }

    #[test]
    fn unknown_model_defaults_to_zero_capacity() {
        let est = charge_estimate("DeLorean DMC-12", "fast", &options()).unwrap();
        assert_eq!(est.battery_kwh, 0.0);
        assert_eq!(est.duration_hours, 0.0);
        assert_eq!(est.cost, 0);
    }

    #[test]
    fn missing_charger_type_is_invalid() {
        let err = charge_estimate("Tata Nexon EV", "ultra", &options()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn threshold_speed_uses_fast_rate() {
        let opts = vec![ChargerOption {
            charger_type: "fast".to_string(),
            speed_kw: 20.0,
        }];
        let est = charge_estimate("Tata Tigor EV", "fast", &opts).unwrap();
        assert_eq!(est.rate_per_hour, FAST_RATE_PER_HOUR);
    }

    #[test]
    fn model_lookup_is_case_insensitive() {
        assert_eq!(battery_capacity_kwh("tata nexon ev"), 30.2);
        assert_eq!(battery_capacity_kwh("  MG ZS EV "), 44.5);
    }
}
