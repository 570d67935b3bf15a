use crate::{RequestError, RequestResult};

/// Per-kilometer rate in currency units.
pub const PRICE_PER_KM: f64 = 10.0;

/// Minimum fare charged for any trip, however short.
pub const MIN_FARE: f64 = 5.0;

/// Maximum fare charged for any trip, however long.
pub const MAX_FARE: f64 = 20.0;

/// Maps a trip distance to its clamped fare, kept at two-decimal precision.
/// The amount actually charged is this value rounded to a whole currency
/// unit, which the ledger does when it closes a trip.
///
/// Negative or NaN distances never occur while cumulative distances stay
/// monotonic; they are rejected rather than silently clamped to the minimum
/// fare.
pub fn price(distance_km: f64) -> RequestResult<f64> {
    if distance_km.is_nan() || distance_km < 0.0 {
        return Err(RequestError::invalid_input(format!(
            "cannot price a trip of {distance_km} km"
        )));
    }
    let raw = distance_km * PRICE_PER_KM;
    Ok(round2(raw.clamp(MIN_FARE, MAX_FARE)))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_charges_minimum_fare() {
        assert_eq!(price(0.0).unwrap(), MIN_FARE);
    }

    #[test]
    fn short_trip_is_priced_per_kilometer() {
        assert_eq!(price(1.0).unwrap(), 10.0);
    }

    #[test]
    fn long_trip_is_capped_at_maximum_fare() {
        // raw = 30, above the cap
        assert_eq!(price(3.0).unwrap(), MAX_FARE);
    }

    #[test]
    fn fare_is_kept_at_two_decimals() {
        assert_eq!(price(0.789).unwrap(), 7.89);
    }

    #[test]
    fn negative_distance_is_rejected() {
        assert!(matches!(price(-0.1), Err(RequestError::InvalidInput(_))));
    }

    #[test]
    fn nan_distance_is_rejected() {
        assert!(matches!(price(f64::NAN), Err(RequestError::InvalidInput(_))));
    }
}
