use crate::database::DbError;
use crate::database::app_user::{User, UserWithPassword};
use sqlx::{Executor, Postgres};

pub struct UserStore;

impl UserStore {
    /// Creates a new user. Fails with `DbError::UniqueViolation` when the
    /// email is already registered.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
        name: &str,
        hashed_password: &str,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            INSERT INTO app_user (email, name, password)
            VALUES ($1, $2, $3)
            RETURNING id, created_at, updated_at, email, name
            ",
        )
        .bind(email)
        .bind(name)
        .bind(hashed_password)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, created_at, updated_at, email, name FROM app_user WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Fetches a user including the password hash, for credential checks only.
    pub async fn find_by_email_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        Ok(sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, email, name, password FROM app_user WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(executor)
        .await?)
    }
}
