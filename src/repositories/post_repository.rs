use deadpool_postgres::Pool;

use crate::dtos::post_dtos::CreatePostIn;
use crate::models::post::{BoundingBox, Post, PostWithRelations, RelationCounts};
use crate::models::user::UserPublic;
use crate::repositories::RepoError;

pub struct PostRepository;

impl PostRepository {
    /// Insert a post owned by `user_id` and return the stored row.
    pub async fn create(pool: &Pool, user_id: i64, input: &CreatePostIn) -> Result<Post, RepoError> {
        let client = pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO posts (user_id, question, latitude, longitude)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, user_id, question, latitude, longitude, created_at, updated_at",
                &[&user_id, &input.question, &input.latitude, &input.longitude],
            )
            .await?;
        Ok(Post::from_row(&row))
    }

    /// Posts inside the box, newest first, with author and relation counts.
    /// BETWEEN is inclusive on both ends; NaN bounds compare false against
    /// every stored coordinate, so an unparseable query yields no rows.
    pub async fn list_within(
        pool: &Pool,
        bbox: &BoundingBox,
    ) -> Result<Vec<PostWithRelations>, RepoError> {
        let client = pool.get().await?;
        let rows = client
            .query(
                "SELECT p.id, p.user_id, p.question, p.latitude, p.longitude,
                        p.created_at, p.updated_at,
                        u.name AS user_name,
                        (SELECT count(*) FROM answers a WHERE a.post_id = p.id) AS answers,
                        (SELECT count(*) FROM wonderings w WHERE w.post_id = p.id) AS wonderings
                 FROM posts p
                 JOIN users u ON u.id = p.user_id
                 WHERE p.latitude  BETWEEN $1 AND $2
                   AND p.longitude BETWEEN $3 AND $4
                 ORDER BY p.created_at DESC",
                &[
                    &bbox.latitude_min,
                    &bbox.latitude_max,
                    &bbox.longitude_min,
                    &bbox.longitude_max,
                ],
            )
            .await?;

        Ok(rows
            .iter()
            .map(|row| PostWithRelations {
                post: Post::from_row(row),
                user: UserPublic {
                    id: row.get("user_id"),
                    name: row.get("user_name"),
                },
                count: RelationCounts {
                    answers: row.get("answers"),
                    wonderings: row.get("wonderings"),
                },
            })
            .collect())
    }
}
