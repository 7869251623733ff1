use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

use crate::models::user::UserPublic;

/// Half-width of the "nearby" window, in degrees, applied to both axes.
pub const NEARBY_RANGE_DEGREES: f64 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub question: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Counts of rows related to a post, surfaced on listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RelationCounts {
    pub answers: i64,
    pub wonderings: i64,
}

/// A listed post together with its author and relation counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithRelations {
    #[serde(flatten)]
    pub post: Post,
    pub user: UserPublic,
    #[serde(rename = "_count")]
    pub count: RelationCounts,
}

impl Post {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            user_id: row.get("user_id"),
            question: row.get("question"),
            latitude: row.get("latitude"),
            longitude: row.get("longitude"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

/// Inclusive coordinate window approximating "nearby".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub latitude_min: f64,
    pub latitude_max: f64,
    pub longitude_min: f64,
    pub longitude_max: f64,
}

impl BoundingBox {
    pub fn around(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude_min: latitude - NEARBY_RANGE_DEGREES,
            latitude_max: latitude + NEARBY_RANGE_DEGREES,
            longitude_min: longitude - NEARBY_RANGE_DEGREES,
            longitude_max: longitude + NEARBY_RANGE_DEGREES,
        }
    }

    /// True when the point falls inside the window, edges included.
    /// NaN coordinates (either side) never match, so a box built from
    /// unparseable input selects nothing.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.latitude_min
            && latitude <= self.latitude_max
            && longitude >= self.longitude_min
            && longitude <= self.longitude_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn box_is_inclusive_on_both_edges() {
        let bbox = BoundingBox::around(37.55, 127.00);
        assert!(bbox.contains(bbox.latitude_min, bbox.longitude_min));
        assert!(bbox.contains(bbox.latitude_max, bbox.longitude_max));
        assert!(bbox.contains(37.50, 127.03));
        assert!(!bbox.contains(37.40, 127.00));
        assert!(!bbox.contains(37.55, 127.11));
    }

    #[test]
    fn nan_query_matches_nothing() {
        let bbox = BoundingBox::around(f64::NAN, 127.00);
        assert!(!bbox.contains(37.55, 127.00));
        assert!(!bbox.contains(f64::NAN, 127.00));
    }

    #[test]
    fn nan_coordinates_never_match_a_real_box() {
        let bbox = BoundingBox::around(37.55, 127.00);
        assert!(!bbox.contains(f64::NAN, 127.00));
        assert!(!bbox.contains(37.55, f64::NAN));
    }

    #[test]
    fn listed_post_serializes_with_count_and_author() {
        let listed = PostWithRelations {
            post: Post {
                id: 12,
                user_id: 7,
                question: "Borrow a ladder?".into(),
                latitude: 37.50,
                longitude: 127.03,
                created_at: Utc.with_ymd_and_hms(2023, 4, 1, 12, 0, 0).unwrap(),
                updated_at: Utc.with_ymd_and_hms(2023, 4, 1, 12, 0, 0).unwrap(),
            },
            user: UserPublic {
                id: 7,
                name: "yena".into(),
            },
            count: RelationCounts {
                answers: 2,
                wonderings: 5,
            },
        };

        let value = serde_json::to_value(&listed).unwrap();
        assert_eq!(value["userId"], 7);
        assert_eq!(value["question"], "Borrow a ladder?");
        assert_eq!(value["user"]["name"], "yena");
        assert_eq!(value["_count"]["answers"], 2);
        assert_eq!(value["_count"]["wonderings"], 5);
        assert!(value["createdAt"].is_string());
    }
}
