use model::shuttle::ShuttleState;
use utility::geo;

/// Result of folding one position report into a shuttle's running total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceUpdate {
    /// Great-circle distance between the previous and the new position.
    pub delta_km: f64,
    /// The shuttle's cumulative distance including `delta_km`.
    pub cumulative_km: f64,
}

/// Extends a shuttle's cumulative distance by the great-circle distance from
/// its previous known position to the newly reported one. A shuttle seen for
/// the first time starts at zero.
///
/// Every report is taken at face value and added to the total. Jittery
/// position reports therefore inflate the cumulative distance; there is no
/// smoothing or outlier rejection.
pub fn accumulate(
    previous: Option<&ShuttleState>,
    latitude: f64,
    longitude: f64,
) -> DistanceUpdate {
    match previous {
        None => DistanceUpdate {
            delta_km: 0.0,
            cumulative_km: 0.0,
        },
        Some(state) => {
            let delta_km = geo::haversine_distance(
                state.latitude,
                state.longitude,
                latitude,
                longitude,
            );
            DistanceUpdate {
                delta_km,
                cumulative_km: state.cumulative_distance_km + delta_km,
            }
        }
    }
}
