use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{shuttle::ShuttleState, ExampleData};

/// One entry in a user's trip history.
///
/// A record is created by a start action with `distance_km` and `price` at 0
/// and `start_distance_km` holding a snapshot of the shuttle's cumulative
/// distance. The matching end action mutates it exactly once, after which it
/// is immutable history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub shuttle_id: Id<ShuttleState>,
    pub action: TripAction,
    pub start_distance_km: f64,
    pub distance_km: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TripAction {
    Started,
    Ended,
}

impl TripRecord {
    /// A freshly opened trip on the given shuttle.
    pub fn started(shuttle_id: Id<ShuttleState>, start_distance_km: f64) -> Self {
        Self {
            shuttle_id,
            action: TripAction::Started,
            start_distance_km,
            distance_km: 0.0,
            price: 0.0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.action == TripAction::Started
    }
}

impl ExampleData for TripRecord {
    fn example_data() -> Self {
        Self {
            shuttle_id: Id::new("1".to_owned()),
            action: TripAction::Ended,
            start_distance_km: 10.0,
            distance_km: 2.5,
            price: 20.0,
        }
    }
}
