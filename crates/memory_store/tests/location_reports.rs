use std::sync::Arc;

use memory_store::MemoryLocationStore;
use model::shuttle::{ShuttleState, ShuttleStatus};
use shuttle_core::{
    registry::{LocationRegistry, ShuttleReport},
    RequestError,
};
use utility::{geo, id::Id};

fn report(latitude: f64, longitude: f64) -> ShuttleReport {
    ShuttleReport {
        name: "MB - Mens hostel".to_owned(),
        latitude,
        longitude,
        status: ShuttleStatus::Vacant,
    }
}

fn shuttle_id(id: &str) -> Id<ShuttleState> {
    Id::new(id.to_owned())
}

#[tokio::test]
async fn first_report_creates_shuttle_with_zero_distance() {
    let registry = LocationRegistry::new(MemoryLocationStore::new());

    let shuttle = registry
        .report(shuttle_id("1"), report(12.9727, 79.1605))
        .await
        .unwrap();

    assert_eq!(shuttle.content.cumulative_distance_km, 0.0);
    assert_eq!(shuttle.content.status, ShuttleStatus::Vacant);
}

#[tokio::test]
async fn cumulative_distance_is_the_sum_of_pairwise_distances() {
    let registry = LocationRegistry::new(MemoryLocationStore::new());
    let positions = [
        (12.9727, 79.1605),
        (12.9731, 79.1612),
        (12.9740, 79.1630),
        (12.9755, 79.1618),
    ];

    let mut last_cumulative = 0.0;
    for (lat, lon) in positions {
        let shuttle = registry
            .report(shuttle_id("1"), report(lat, lon))
            .await
            .unwrap();
        assert!(shuttle.content.cumulative_distance_km >= last_cumulative);
        last_cumulative = shuttle.content.cumulative_distance_km;
    }

    let expected: f64 = positions
        .windows(2)
        .map(|w| geo::haversine_distance(w[0].0, w[0].1, w[1].0, w[1].1))
        .sum();
    assert!((last_cumulative - expected).abs() < 1e-9);
}

#[tokio::test]
async fn repeating_the_same_position_adds_nothing() {
    let registry = LocationRegistry::new(MemoryLocationStore::new());

    registry
        .report(shuttle_id("1"), report(12.9727, 79.1605))
        .await
        .unwrap();
    let again = registry
        .report(shuttle_id("1"), report(12.9727, 79.1605))
        .await
        .unwrap();

    assert_eq!(again.content.cumulative_distance_km, 0.0);
}

#[tokio::test]
async fn report_overwrites_name_and_status() {
    let registry = LocationRegistry::new(MemoryLocationStore::new());

    registry
        .report(shuttle_id("1"), report(12.9727, 79.1605))
        .await
        .unwrap();
    let updated = registry
        .report(
            shuttle_id("1"),
            ShuttleReport {
                name: "SJT - MB".to_owned(),
                latitude: 12.9731,
                longitude: 79.1612,
                status: ShuttleStatus::Full,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.content.name, "SJT - MB");
    assert_eq!(updated.content.status, ShuttleStatus::Full);
}

#[tokio::test]
async fn unknown_shuttle_is_not_found() {
    let registry = LocationRegistry::new(MemoryLocationStore::new());
    let result = registry.get(&shuttle_id("ghost")).await;
    assert!(matches!(result, Err(RequestError::ShuttleNotFound)));
}

#[tokio::test]
async fn invalid_coordinates_are_rejected_before_any_write() {
    let registry = LocationRegistry::new(MemoryLocationStore::new());

    let result = registry
        .report(shuttle_id("1"), report(f64::NAN, 79.1605))
        .await;
    assert!(matches!(result, Err(RequestError::InvalidInput(_))));

    let result = registry.report(shuttle_id("1"), report(95.0, 79.1605)).await;
    assert!(matches!(result, Err(RequestError::InvalidInput(_))));

    // the rejected reports must not have created the shuttle
    assert!(registry.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_all_preserves_first_seen_order() {
    let registry = LocationRegistry::new(MemoryLocationStore::new());

    for id in ["3", "1", "2"] {
        registry
            .report(shuttle_id(id), report(12.9727, 79.1605))
            .await
            .unwrap();
    }

    let ids: Vec<String> = registry
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|shuttle| shuttle.id.raw())
        .collect();
    assert_eq!(ids, ["3", "1", "2"]);
}

/// Concurrent reports for one shuttle must behave as if applied in some
/// serial order: the final cumulative distance has to match the pairwise
/// distance sum of one of the possible orderings, and no update may be lost.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reports_lose_no_distance() {
    let start = (12.9727, 79.1605);
    let moves = [
        (12.9731, 79.1612),
        (12.9740, 79.1630),
        (12.9755, 79.1618),
        (12.9762, 79.1641),
    ];

    let registry = Arc::new(LocationRegistry::new(MemoryLocationStore::new()));
    registry
        .report(shuttle_id("1"), report(start.0, start.1))
        .await
        .unwrap();

    let handles: Vec<_> = moves
        .iter()
        .map(|&(lat, lon)| {
            let registry = registry.clone();
            tokio::spawn(async move {
                registry.report(shuttle_id("1"), report(lat, lon)).await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let total = registry
        .get(&shuttle_id("1"))
        .await
        .unwrap()
        .content
        .cumulative_distance_km;

    let serial_totals = permutations(&moves)
        .into_iter()
        .map(|order| {
            let mut at = start;
            let mut sum = 0.0;
            for next in order {
                sum += geo::haversine_distance(at.0, at.1, next.0, next.1);
                at = next;
            }
            sum
        })
        .collect::<Vec<_>>();

    assert!(
        serial_totals
            .iter()
            .any(|serial| (serial - total).abs() < 1e-9),
        "cumulative distance {total} matches no serial order of the updates"
    );
}

fn permutations(items: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    if items.is_empty() {
        return vec![vec![]];
    }
    let mut result = vec![];
    for (i, &item) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, item);
            result.push(tail);
        }
    }
    result
}
