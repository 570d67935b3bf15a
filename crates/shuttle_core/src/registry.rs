use chrono::Utc;
use model::{
    shuttle::{ShuttleState, ShuttleStatus},
    WithId,
};
use utility::id::Id;

use crate::{
    distance,
    store::LocationStore,
    sync::KeyedLocks,
    RequestError, RequestResult,
};

/// One inbound position/status report for a shuttle.
#[derive(Debug, Clone)]
pub struct ShuttleReport {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: ShuttleStatus,
}

/// Source of truth for the latest known state per shuttle.
///
/// Reports for the same shuttle id are serialized through a per-key lock, so
/// the read-modify-write on the cumulative distance never loses an update.
/// Reports for different shuttles run in parallel.
pub struct LocationRegistry<S: LocationStore> {
    store: S,
    locks: KeyedLocks,
}

impl<S: LocationStore> LocationRegistry<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
        }
    }

    /// Upserts the shuttle's state. An unknown id is created with a
    /// cumulative distance of zero; a known one has its cumulative distance
    /// extended by the great-circle distance to the new position before
    /// name, position and status are overwritten.
    pub async fn report(
        &self,
        id: Id<ShuttleState>,
        report: ShuttleReport,
    ) -> RequestResult<WithId<ShuttleState>> {
        validate_coordinates(report.latitude, report.longitude)?;

        let _guard = self.locks.acquire(id.raw_ref()).await;

        let previous = self.store.get(&id).await?;
        let update = distance::accumulate(
            previous.as_ref().map(|shuttle| &shuttle.content),
            report.latitude,
            report.longitude,
        );
        log::debug!(
            "shuttle {id}: +{:.4} km, cumulative {:.4} km",
            update.delta_km,
            update.cumulative_km
        );

        let state = ShuttleState {
            name: report.name,
            latitude: report.latitude,
            longitude: report.longitude,
            status: report.status,
            cumulative_distance_km: update.cumulative_km,
            updated_at: Utc::now(),
        };
        Ok(self.store.upsert(WithId::new(id, state)).await?)
    }

    pub async fn get(&self, id: &Id<ShuttleState>) -> RequestResult<WithId<ShuttleState>> {
        self.store
            .get(id)
            .await?
            .ok_or(RequestError::ShuttleNotFound)
    }

    pub async fn list_all(&self) -> RequestResult<Vec<WithId<ShuttleState>>> {
        Ok(self.store.list_all().await?)
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> RequestResult<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(RequestError::invalid_input(format!(
            "latitude {latitude} is out of range"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(RequestError::invalid_input(format!(
            "longitude {longitude} is out of range"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_on_the_boundary_are_accepted() {
        assert!(validate_coordinates(90.0, -180.0).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
    }

    #[test]
    fn out_of_range_and_nan_coordinates_are_rejected() {
        assert!(validate_coordinates(90.5, 0.0).is_err());
        assert!(validate_coordinates(0.0, 181.0).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }
}
