use crate::test_context::TestContext;
use crate::test_helpers::{PASSWORD, USERNAME, login, register};
use chrono::{DateTime, Utc};
use color_eyre::Result;
use common_services::api::auth::interfaces::{CreateUser, RefreshRequest, Tokens};
use common_services::database::app_user::User;
use serde_json::json;

pub async fn test_register(ctx: &TestContext) -> Result<()> {
    // ACT
    let tokens = register(ctx, "register@example.com").await?;

    // ASSERT
    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());

    let expiry = DateTime::from_timestamp(tokens.expiry as i64, 0).expect("valid expiry");
    assert!(expiry > Utc::now());

    let response = ctx
        .http_client
        .get(ctx.api_url("/auth/me"))
        .bearer_auth(&tokens.access_token)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let user: User = response.json().await?;
    assert_eq!(user.email, "register@example.com");
    assert_eq!(user.name, USERNAME);

    Ok(())
}

pub async fn test_duplicate_email(ctx: &TestContext) -> Result<()> {
    // ARRANGE
    register(ctx, "dupe@example.com").await?;

    // ACT
    let response = ctx
        .http_client
        .post(ctx.api_url("/auth/register"))
        .json(&CreateUser {
            email: "dupe@example.com".to_owned(),
            name: USERNAME.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::CONFLICT);

    Ok(())
}

pub async fn test_login_and_me(ctx: &TestContext) -> Result<()> {
    // ARRANGE
    register(ctx, "login@example.com").await?;

    // ACT
    let tokens = login(ctx, "login@example.com").await?;
    let response = ctx
        .http_client
        .get(ctx.api_url("/auth/me"))
        .bearer_auth(&tokens.access_token)
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let user: User = response.json().await?;
    assert_eq!(user.email, "login@example.com");

    // Wrong password is rejected.
    let response = ctx
        .http_client
        .post(ctx.api_url("/auth/login"))
        .json(&json!({ "email": "login@example.com", "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);

    Ok(())
}

pub async fn test_refresh_rotation(ctx: &TestContext) -> Result<()> {
    // ARRANGE
    let initial = register(ctx, "refresh@example.com").await?;

    // ACT
    let response = ctx
        .http_client
        .post(ctx.api_url("/auth/refresh"))
        .json(&RefreshRequest {
            refresh_token: initial.refresh_token.clone(),
        })
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let rotated: Tokens = response.json().await?;

    // ASSERT
    // The new access token works.
    let me = ctx
        .http_client
        .get(ctx.api_url("/auth/me"))
        .bearer_auth(&rotated.access_token)
        .send()
        .await?;
    assert_eq!(me.status(), reqwest::StatusCode::OK);

    // The old refresh token was consumed by the rotation.
    let replay = ctx
        .http_client
        .post(ctx.api_url("/auth/refresh"))
        .json(&RefreshRequest {
            refresh_token: initial.refresh_token,
        })
        .send()
        .await?;
    assert_eq!(replay.status(), reqwest::StatusCode::UNAUTHORIZED);

    Ok(())
}

pub async fn test_refresh_theft_detection(ctx: &TestContext) -> Result<()> {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    // ARRANGE
    // Two sessions for the same user.
    let first = register(ctx, "theft@example.com").await?;
    let second = login(ctx, "theft@example.com").await?;

    // A token with a known selector but the wrong verifier half.
    let mut raw = URL_SAFE_NO_PAD.decode(&second.refresh_token)?;
    for byte in &mut raw[16..] {
        *byte ^= 0xff;
    }
    let forged = URL_SAFE_NO_PAD.encode(&raw);

    // ACT
    let response = ctx
        .http_client
        .post(ctx.api_url("/auth/refresh"))
        .json(&RefreshRequest {
            refresh_token: forged,
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);

    // The mismatch revoked every session of the user, including the
    // untouched first one.
    let response = ctx
        .http_client
        .post(ctx.api_url("/auth/refresh"))
        .json(&RefreshRequest {
            refresh_token: first.refresh_token,
        })
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);

    let response = ctx
        .http_client
        .post(ctx.api_url("/auth/refresh"))
        .json(&RefreshRequest {
            refresh_token: second.refresh_token,
        })
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);

    Ok(())
}

pub async fn test_logout(ctx: &TestContext) -> Result<()> {
    // ARRANGE
    let tokens = register(ctx, "logout@example.com").await?;

    // ACT
    let response = ctx
        .http_client
        .post(ctx.api_url("/auth/logout"))
        .json(&RefreshRequest {
            refresh_token: tokens.refresh_token.clone(),
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

    // The refresh token is dead after logout.
    let refresh = ctx
        .http_client
        .post(ctx.api_url("/auth/refresh"))
        .json(&RefreshRequest {
            refresh_token: tokens.refresh_token,
        })
        .send()
        .await?;
    assert_eq!(refresh.status(), reqwest::StatusCode::UNAUTHORIZED);

    Ok(())
}

pub async fn test_me_requires_auth(ctx: &TestContext) -> Result<()> {
    let response = ctx.http_client.get(ctx.api_url("/auth/me")).send().await?;
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);

    let response = ctx
        .http_client
        .get(ctx.api_url("/auth/me"))
        .bearer_auth("not-a-jwt")
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);

    Ok(())
}
