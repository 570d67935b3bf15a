use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::ExampleData;

/// Latest known state of one shuttle, keyed by its id.
///
/// `cumulative_distance_km` starts at 0 when the shuttle is first reported
/// and only ever grows, by the great-circle distance between consecutive
/// reported positions. It is never reset.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShuttleState {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: ShuttleStatus,
    pub cumulative_distance_km: f64,
    pub updated_at: DateTime<Utc>,
}

impl HasId for ShuttleState {
    type IdType = String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ShuttleStatus {
    Vacant,
    Full,
    OutOfService,
}

impl ExampleData for ShuttleState {
    fn example_data() -> Self {
        Self {
            name: "MB - Mens hostel".to_owned(),
            latitude: 12.972730,
            longitude: 79.160510,
            status: ShuttleStatus::Vacant,
            cumulative_distance_km: 4.2,
            updated_at: Utc::now(),
        }
    }
}
