use crate::test_context::TestContext;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::auth::interfaces::{CreateUser, LoginRequest, Tokens};
use common_services::database::album::Album;
use common_services::database::photo::Photo;
use serde_json::json;

pub const USERNAME: &str = "Test User";
pub const PASSWORD: &str = "correct horse battery staple";

/// Registers a fresh user and returns their session tokens.
pub async fn register(ctx: &TestContext, email: &str) -> Result<Tokens> {
    let response = ctx
        .http_client
        .post(ctx.api_url("/auth/register"))
        .json(&CreateUser {
            email: email.to_owned(),
            name: USERNAME.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    if response.status() != reqwest::StatusCode::CREATED {
        return Err(eyre!("register failed: {}", response.status()));
    }
    Ok(response.json().await?)
}

pub async fn login(ctx: &TestContext, email: &str) -> Result<Tokens> {
    let response = ctx
        .http_client
        .post(ctx.api_url("/auth/login"))
        .json(&LoginRequest {
            email: email.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    if response.status() != reqwest::StatusCode::OK {
        return Err(eyre!("login failed: {}", response.status()));
    }
    Ok(response.json().await?)
}

pub async fn create_album(
    ctx: &TestContext,
    access_token: &str,
    title: &str,
    description: &str,
) -> Result<Album> {
    let response = ctx
        .http_client
        .post(ctx.api_url("/albums"))
        .bearer_auth(access_token)
        .json(&json!({ "title": title, "description": description }))
        .send()
        .await?;
    if response.status() != reqwest::StatusCode::CREATED {
        return Err(eyre!("create album failed: {}", response.status()));
    }
    Ok(response.json().await?)
}

/// Uploads the bundled red test image into an album, with optional extra
/// text fields (`title`, `acquisitionDate`, `predominantColor`, ...).
pub async fn upload_red_photo(
    ctx: &TestContext,
    access_token: &str,
    album_id: &str,
    extra_fields: &[(&str, &str)],
) -> Result<Vec<Photo>> {
    let bytes = std::fs::read("crates/test_integration/assets/red.png")?;
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name("red.png")
        .mime_str("image/png")?;
    let mut form = reqwest::multipart::Form::new().part("files", part);
    for (name, value) in extra_fields {
        form = form.text((*name).to_owned(), (*value).to_owned());
    }

    let response = ctx
        .http_client
        .post(ctx.api_url(&format!("/albums/{album_id}/photos")))
        .bearer_auth(access_token)
        .multipart(form)
        .send()
        .await?;
    if response.status() != reqwest::StatusCode::CREATED {
        return Err(eyre!("upload failed: {}", response.status()));
    }
    Ok(response.json().await?)
}
