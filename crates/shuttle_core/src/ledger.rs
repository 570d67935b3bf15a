use model::{
    shuttle::ShuttleState,
    trip::{TripAction, TripRecord},
    user::UserAccount,
    WithId,
};
use utility::id::Id;

use crate::{
    fare::{self, round2},
    store::{LocationStore, UserStore},
    sync::KeyedLocks,
    RequestError, RequestResult,
};

/// Price and distance of a closed trip, as reported back to the rider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripReceipt {
    /// Whole currency units.
    pub price: f64,
    /// Rounded to two decimals.
    pub distance_km: f64,
}

/// What a trip request asks for. Parsed from the request's action field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripCommand {
    Start,
    End,
}

impl TripCommand {
    pub fn parse(action: &str) -> RequestResult<Self> {
        match action {
            "start" | "started" => Ok(Self::Start),
            "end" | "ended" => Ok(Self::End),
            other => Err(RequestError::InvalidAction(other.to_owned())),
        }
    }
}

/// Per-user append-only log of trips, billed from cumulative-distance
/// snapshots taken at trip start and trip end.
///
/// The location store is only ever read here; all writes go through the user
/// store. Operations for the same username are serialized so that the
/// append/mutate-last pair never races with itself.
pub struct TripLedger<L: LocationStore, U: UserStore> {
    locations: L,
    users: U,
    locks: KeyedLocks,
}

impl<L: LocationStore, U: UserStore> TripLedger<L, U> {
    pub fn new(locations: L, users: U) -> Self {
        Self {
            locations,
            users,
            locks: KeyedLocks::new(),
        }
    }

    /// Creates a rider account. The credential digest comes from the auth
    /// layer; this system never sees the plaintext.
    pub async fn register_user(
        &self,
        username: Id<UserAccount>,
        password_hash: String,
    ) -> RequestResult<()> {
        let _guard = self.locks.acquire(username.raw_ref()).await;
        self.users
            .create(WithId::new(username, UserAccount::new(password_hash)))
            .await?;
        Ok(())
    }

    /// Opens a trip on the given shuttle, snapshotting its current
    /// cumulative distance. A user can have at most one open trip;
    /// starting another fails with `TripAlreadyOpen`.
    pub async fn start_trip(
        &self,
        username: &Id<UserAccount>,
        shuttle_id: &Id<ShuttleState>,
    ) -> RequestResult<()> {
        let _guard = self.locks.acquire(username.raw_ref()).await;

        let user = self.user(username).await?;
        let shuttle = self.shuttle(shuttle_id).await?;

        if user.content.trips.last().is_some_and(TripRecord::is_open) {
            return Err(RequestError::TripAlreadyOpen);
        }

        let record = TripRecord::started(
            shuttle.id.clone(),
            shuttle.content.cumulative_distance_km,
        );
        self.users.append_trip(username, record).await?;
        log::info!("user {username} started a trip on shuttle {shuttle_id}");
        Ok(())
    }

    /// Closes the user's most recent trip. The trip must be open and on the
    /// requested shuttle, otherwise `NoMatchingTrip`. Distance is the growth
    /// of the shuttle's cumulative distance since the start snapshot; the
    /// price is the clamped fare rounded to a whole currency unit.
    pub async fn end_trip(
        &self,
        username: &Id<UserAccount>,
        shuttle_id: &Id<ShuttleState>,
    ) -> RequestResult<TripReceipt> {
        let _guard = self.locks.acquire(username.raw_ref()).await;

        let user = self.user(username).await?;
        let shuttle = self.shuttle(shuttle_id).await?;

        let last = match user.content.trips.last() {
            Some(trip) if trip.is_open() && trip.shuttle_id == *shuttle_id => trip,
            _ => return Err(RequestError::NoMatchingTrip),
        };

        let distance_km =
            round2(shuttle.content.cumulative_distance_km - last.start_distance_km);
        let price = fare::price(distance_km)?.round();

        let closed = TripRecord {
            action: TripAction::Ended,
            distance_km,
            price,
            ..last.clone()
        };
        self.users.update_last_trip(username, closed).await?;

        log::info!(
            "user {username} ended a trip on shuttle {shuttle_id}: {distance_km} km for {price}"
        );
        Ok(TripReceipt { price, distance_km })
    }

    /// The user's trips in chronological order.
    pub async fn trip_history(
        &self,
        username: &Id<UserAccount>,
    ) -> RequestResult<Vec<TripRecord>> {
        let user = self.user(username).await?;
        Ok(user.content.trips)
    }

    async fn user(&self, username: &Id<UserAccount>) -> RequestResult<WithId<UserAccount>> {
        self.users
            .get(username)
            .await?
            .ok_or(RequestError::UserNotFound)
    }

    async fn shuttle(&self, id: &Id<ShuttleState>) -> RequestResult<WithId<ShuttleState>> {
        self.locations
            .get(id)
            .await?
            .ok_or(RequestError::ShuttleNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_both_spellings() {
        assert_eq!(TripCommand::parse("start").unwrap(), TripCommand::Start);
        assert_eq!(TripCommand::parse("started").unwrap(), TripCommand::Start);
        assert_eq!(TripCommand::parse("end").unwrap(), TripCommand::End);
        assert_eq!(TripCommand::parse("ended").unwrap(), TripCommand::End);
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(matches!(
            TripCommand::parse("pause"),
            Err(RequestError::InvalidAction(action)) if action == "pause"
        ));
    }
}
