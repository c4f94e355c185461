use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::{AuthClaims, CreateUser, Tokens};
use crate::api::auth::token::{
    RefreshTokenParts, generate_refresh_token_parts, split_refresh_token, verify_token,
};
use crate::database::UserStore;
use crate::database::app_user::{User, UserWithPassword};
use app_state::constants;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sqlx::{Executor, FromRow, PgPool, Postgres};
use tracing::{info, instrument};

/// Authenticates a user based on email and password.
pub async fn authenticate_user(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<UserWithPassword, AuthError> {
    let user = UserStore::find_by_email_with_password(pool, email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = verify_password(password.as_ref(), &user.password)?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

/// Creates a new user in the database.
#[instrument(skip(pool, payload))]
pub async fn create_user(pool: &PgPool, payload: &CreateUser) -> Result<User, AuthError> {
    let username = payload.name.trim();
    if username.is_empty() || !username.chars().all(|c| c.is_alphanumeric() || c == ' ') {
        return Err(AuthError::InvalidUsername);
    }
    let hashed = hash_password(payload.password.as_ref())?;
    info!("Creating user email={}", payload.email);

    Ok(UserStore::create(pool, &payload.email, username, &hashed).await?)
}

/// Stores a refresh token in the database.
pub async fn store_refresh_token<'c, E>(
    executor: E,
    user_id: i32,
    parts: &RefreshTokenParts,
) -> Result<(), AuthError>
where
    E: Executor<'c, Database = Postgres>,
{
    let exp = Utc::now() + Duration::days(constants().auth.refresh_token_expiry_days);
    sqlx::query(
        "INSERT INTO refresh_token (user_id, selector, verifier_hash, expires_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(&parts.selector)
    .bind(&parts.verifier_hash)
    .bind(exp)
    .execute(executor)
    .await
    .map_err(crate::database::DbError::from)?;
    Ok(())
}

/// Creates a new access token for a given user ID.
pub fn create_access_token(jwt_secret: &str, user_id: i32) -> Result<(String, u64), AuthError> {
    let exp =
        (Utc::now() + Duration::minutes(constants().auth.access_token_expiry_minutes)).timestamp();
    let claims = AuthClaims { sub: user_id, exp };
    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?;

    Ok((access_token, exp as u64))
}

/// Issues a fresh access/refresh token pair for a user, persisting the
/// refresh token. Used by register and login.
pub async fn issue_tokens(
    pool: &PgPool,
    jwt_secret: &str,
    user_id: i32,
) -> Result<Tokens, AuthError> {
    let parts = generate_refresh_token_parts()?;
    store_refresh_token(pool, user_id, &parts).await?;
    let (access_token, expiry) = create_access_token(jwt_secret, user_id)?;
    Ok(Tokens {
        access_token,
        refresh_token: parts.raw_token,
        expiry,
    })
}

#[derive(FromRow)]
struct RefreshTokenRecord {
    user_id: i32,
    verifier_hash: String,
    #[allow(dead_code)]
    expires_at: DateTime<Utc>,
}

/// Handles refresh token rotation, invalidating the old token and issuing a
/// new pair.
#[instrument(skip(pool, jwt_secret, raw_token))]
pub async fn refresh_tokens(
    pool: &PgPool,
    jwt_secret: &str,
    raw_token: &str,
) -> Result<Tokens, AuthError> {
    let (selector, verifier_bytes) = split_refresh_token(raw_token)?;
    let record = sqlx::query_as::<_, RefreshTokenRecord>(
        "SELECT user_id, verifier_hash, expires_at FROM refresh_token
         WHERE selector = $1 AND expires_at > NOW()",
    )
    .bind(&selector)
    .fetch_optional(pool)
    .await
    .map_err(crate::database::DbError::from)?
    .ok_or(AuthError::RefreshTokenExpiredOrNotFound)?;

    if !verify_token(&verifier_bytes, &record.verifier_hash)? {
        // Wrong verifier for a known selector: assume token theft and revoke
        // every refresh token of that user.
        sqlx::query("DELETE FROM refresh_token WHERE user_id = $1")
            .bind(record.user_id)
            .execute(pool)
            .await
            .ok();
        return Err(AuthError::InvalidToken);
    }

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM refresh_token WHERE selector = $1")
        .bind(&selector)
        .execute(&mut *tx)
        .await?;

    let new_parts = generate_refresh_token_parts()?;
    store_refresh_token(&mut *tx, record.user_id, &new_parts).await?;

    tx.commit().await?;

    let (access_token, expiry) = create_access_token(jwt_secret, record.user_id)?;
    Ok(Tokens {
        access_token,
        refresh_token: new_parts.raw_token,
        expiry,
    })
}

/// Deletes the refresh token matching the provided one, logging the user out.
/// Always appears successful to prevent token enumeration.
pub async fn logout_user(pool: &PgPool, raw_token: &str) -> Result<(), AuthError> {
    if let Ok((selector, verifier_bytes)) = split_refresh_token(raw_token)
        && let Some(record) = sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT user_id, verifier_hash, expires_at FROM refresh_token WHERE selector = $1",
        )
        .bind(&selector)
        .fetch_optional(pool)
        .await
        .map_err(crate::database::DbError::from)?
        && verify_token(&verifier_bytes, &record.verifier_hash).unwrap_or(false)
    {
        sqlx::query("DELETE FROM refresh_token WHERE selector = $1")
            .bind(&selector)
            .execute(pool)
            .await?;
    }
    Ok(())
}
