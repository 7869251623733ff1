use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::models::user::User;
use crate::repositories::RepoError;

pub struct UserRepository;

impl UserRepository {
    pub async fn get_by_id(pool: &Pool, user_id: i64) -> Result<Option<User>, RepoError> {
        let client = pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, name, email, phone, avatar, created_at, updated_at
                 FROM users WHERE id = $1",
                &[&user_id],
            )
            .await?;
        Ok(row.as_ref().map(User::from_row))
    }

    pub async fn email_in_use(pool: &Pool, email: &str, excluding: i64) -> Result<bool, RepoError> {
        let client = pool.get().await?;
        let row = client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND id <> $2) AS taken",
                &[&email, &excluding],
            )
            .await?;
        Ok(row.get("taken"))
    }

    pub async fn phone_in_use(pool: &Pool, phone: &str, excluding: i64) -> Result<bool, RepoError> {
        let client = pool.get().await?;
        let row = client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM users WHERE phone = $1 AND id <> $2) AS taken",
                &[&phone, &excluding],
            )
            .await?;
        Ok(row.get("taken"))
    }

    // Profile fields update one at a time, mirroring the edit form's
    // independent-field semantics.

    pub async fn set_name(pool: &Pool, user_id: i64, name: &str) -> Result<(), RepoError> {
        let client = pool.get().await?;
        client
            .execute(
                "UPDATE users SET name = $2, updated_at = now() WHERE id = $1",
                &[&user_id, &name],
            )
            .await?;
        Ok(())
    }

    pub async fn set_email(pool: &Pool, user_id: i64, email: &str) -> Result<(), RepoError> {
        let client = pool.get().await?;
        client
            .execute(
                "UPDATE users SET email = $2, updated_at = now() WHERE id = $1",
                &[&user_id, &email],
            )
            .await?;
        Ok(())
    }

    pub async fn set_phone(pool: &Pool, user_id: i64, phone: &str) -> Result<(), RepoError> {
        let client = pool.get().await?;
        client
            .execute(
                "UPDATE users SET phone = $2, updated_at = now() WHERE id = $1",
                &[&user_id, &phone],
            )
            .await?;
        Ok(())
    }

    pub async fn set_avatar(pool: &Pool, user_id: i64, avatar: Uuid) -> Result<(), RepoError> {
        let client = pool.get().await?;
        client
            .execute(
                "UPDATE users SET avatar = $2, updated_at = now() WHERE id = $1",
                &[&user_id, &avatar],
            )
            .await?;
        Ok(())
    }
}
