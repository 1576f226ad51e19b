//! Online presence derived from a user's `last_seen_at` timestamp.
//!
//! `last_seen_at` is refreshed on every authenticated request, so a recent
//! value means the user currently has the app open.

use serde::Serialize;

use crate::types::Timestamp;

/// Users seen within this many minutes count as online.
pub const ONLINE_WINDOW_MINS: i64 = 5;

/// Users seen within this many minutes report "last seen N minutes ago".
pub const AWAY_WINDOW_MINS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Presence {
    Online,
    Away { minutes: i64 },
    Offline,
}

impl Presence {
    pub fn from_last_seen(last_seen: Option<Timestamp>, now: Timestamp) -> Self {
        let Some(seen) = last_seen else {
            return Self::Offline;
        };
        let minutes = (now - seen).num_minutes().max(0);
        if minutes < ONLINE_WINDOW_MINS {
            Self::Online
        } else if minutes < AWAY_WINDOW_MINS {
            Self::Away { minutes }
        } else {
            Self::Offline
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn never_seen_is_offline() {
        assert_eq!(Presence::from_last_seen(None, Utc::now()), Presence::Offline);
    }

    #[test]
    fn recent_activity_is_online() {
        let now = Utc::now();
        let seen = now - Duration::minutes(2);
        assert_eq!(Presence::from_last_seen(Some(seen), now), Presence::Online);
    }

    #[test]
    fn within_the_hour_is_away() {
        let now = Utc::now();
        let seen = now - Duration::minutes(17);
        assert_eq!(
            Presence::from_last_seen(Some(seen), now),
            Presence::Away { minutes: 17 }
        );
    }

    #[test]
    fn boundary_at_five_minutes_is_away() {
        let now = Utc::now();
        let seen = now - Duration::minutes(ONLINE_WINDOW_MINS);
        assert_eq!(
            Presence::from_last_seen(Some(seen), now),
            Presence::Away { minutes: 5 }
        );
    }

    #[test]
    fn older_than_an_hour_is_offline() {
        let now = Utc::now();
        let seen = now - Duration::hours(3);
        assert_eq!(Presence::from_last_seen(Some(seen), now), Presence::Offline);
    }

    #[test]
    fn clock_skew_counts_as_online() {
        let now = Utc::now();
        let seen = now + Duration::seconds(30);
        assert_eq!(Presence::from_last_seen(Some(seen), now), Presence::Online);
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(Presence::Away { minutes: 9 }).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "away", "minutes": 9 }));
    }
}
