use crate::test_context::TestContext;
use crate::test_helpers::{create_album, register, upload_red_photo};
use chrono::{DateTime, Utc};
use color_eyre::Result;
use common_services::api::album::interfaces::{AlbumDetailsResponse, AlbumSummary};

pub async fn test_upload_and_sort(ctx: &TestContext) -> Result<()> {
    // ARRANGE
    let tokens = register(ctx, "photos@example.com").await?;
    let token = &tokens.access_token;
    let album = create_album(ctx, token, "Film roll", "Scans").await?;

    // ACT
    // One photo with explicit metadata, one with nothing but the bytes.
    let old_date = "2020-06-01T12:00:00Z";
    let with_metadata = upload_red_photo(
        ctx,
        token,
        &album.id,
        &[
            ("title", "Old scan"),
            ("acquisitionDate", old_date),
            ("predominantColor", "red"),
        ],
    )
    .await?;
    let bare = upload_red_photo(ctx, token, &album.id, &[]).await?;

    // ASSERT
    assert_eq!(with_metadata.len(), 1);
    let old_photo = &with_metadata[0];
    assert_eq!(old_photo.title, "Old scan");
    assert_eq!(
        old_photo.acquisition_date,
        old_date.parse::<DateTime<Utc>>()?
    );
    assert_eq!(old_photo.predominant_color.as_deref(), Some("#FF0000"));
    assert!(old_photo.file_path.contains("red.png"));

    // Without an explicit date the upload time is used.
    let new_photo = &bare[0];
    assert_eq!(new_photo.title, "red");
    assert!((Utc::now() - new_photo.acquisition_date).num_seconds() < 30);

    // Default sort is newest first.
    let details: AlbumDetailsResponse = ctx
        .http_client
        .get(ctx.api_url(&format!("/albums/{}", album.id)))
        .bearer_auth(token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(details.photos.len(), 2);
    assert_eq!(details.photos[0].id, new_photo.id);
    assert_eq!(details.photos[1].id, old_photo.id);

    // Ascending puts the 2020 scan first.
    let details: AlbumDetailsResponse = ctx
        .http_client
        .get(ctx.api_url(&format!("/albums/{}?sort=asc", album.id)))
        .bearer_auth(token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(details.photos[0].id, old_photo.id);

    // The album list reflects the count and uses the latest photo as cover.
    let albums: Vec<AlbumSummary> = ctx
        .http_client
        .get(ctx.api_url("/albums"))
        .bearer_auth(token)
        .send()
        .await?
        .json()
        .await?;
    let summary = albums
        .iter()
        .find(|a| a.id == album.id)
        .expect("album listed");
    assert_eq!(summary.photo_count, 2);
    assert_eq!(
        summary.cover.as_ref().map(|c| c.id.as_str()),
        Some(new_photo.id.as_str())
    );

    Ok(())
}

pub async fn test_exif_acquisition_date(ctx: &TestContext) -> Result<()> {
    // ARRANGE
    let tokens = register(ctx, "exif@example.com").await?;
    let token = &tokens.access_token;
    let album = create_album(ctx, token, "Tagged", "Camera originals").await?;

    // ACT
    // No explicit date: the EXIF DateTimeOriginal of the fixture must win
    // over the upload time.
    let bytes = std::fs::read("crates/test_integration/assets/tagged.jpg")?;
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name("tagged.jpg")
        .mime_str("image/jpeg")?;
    let form = reqwest::multipart::Form::new().part("files", part);
    let response = ctx
        .http_client
        .post(ctx.api_url(&format!("/albums/{}/photos", album.id)))
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let photos: Vec<common_services::database::photo::Photo> = response.json().await?;
    assert_eq!(
        photos[0].acquisition_date,
        "2015-03-14T09:26:53Z".parse::<DateTime<Utc>>()?
    );
    // The fixture carries no pixel data, so no color can be extracted.
    assert_eq!(photos[0].predominant_color, None);

    Ok(())
}

pub async fn test_upload_limits(ctx: &TestContext) -> Result<()> {
    // ARRANGE
    let tokens = register(ctx, "limits@example.com").await?;
    let token = &tokens.access_token;
    let album = create_album(ctx, token, "Limits", "Nothing should land here").await?;
    let upload_url = ctx.api_url(&format!("/albums/{}/photos", album.id));
    let bytes = std::fs::read("crates/test_integration/assets/red.png")?;

    // ACT / ASSERT
    // One file more than the per-upload maximum.
    let mut form = reqwest::multipart::Form::new();
    for i in 0..=ctx.settings.upload.max_files_per_upload {
        let part = reqwest::multipart::Part::bytes(bytes.clone())
            .file_name(format!("red-{i}.png"))
            .mime_str("image/png")?;
        form = form.part("files", part);
    }
    let response = ctx
        .http_client
        .post(&upload_url)
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // A single file over the size cap.
    let oversized = vec![0u8; ctx.settings.upload.max_file_size_bytes() + 1];
    let part = reqwest::multipart::Part::bytes(oversized)
        .file_name("huge.png")
        .mime_str("image/png")?;
    let form = reqwest::multipart::Form::new().part("files", part);
    let response = ctx
        .http_client
        .post(&upload_url)
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // Neither rejected upload left photos behind.
    let details: AlbumDetailsResponse = ctx
        .http_client
        .get(ctx.api_url(&format!("/albums/{}", album.id)))
        .bearer_auth(token)
        .send()
        .await?
        .json()
        .await?;
    assert!(details.photos.is_empty());

    Ok(())
}

pub async fn test_delete_guard(ctx: &TestContext) -> Result<()> {
    // ARRANGE
    let tokens = register(ctx, "guarded@example.com").await?;
    let token = &tokens.access_token;
    let album = create_album(ctx, token, "Doomed", "Will be deleted").await?;
    let photos = upload_red_photo(ctx, token, &album.id, &[]).await?;

    // ACT / ASSERT
    // The album cannot be deleted while it holds photos.
    let response = ctx
        .http_client
        .delete(ctx.api_url(&format!("/albums/{}", album.id)))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // Another user cannot delete the photo.
    let stranger = register(ctx, "photo-stranger@example.com").await?;
    let response = ctx
        .http_client
        .delete(ctx.api_url(&format!("/photos/{}", photos[0].id)))
        .bearer_auth(&stranger.access_token)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    // The owner deletes the photo, then the album.
    let response = ctx
        .http_client
        .delete(ctx.api_url(&format!("/photos/{}", photos[0].id)))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

    let response = ctx
        .http_client
        .delete(ctx.api_url(&format!("/albums/{}", album.id)))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

    Ok(())
}

pub async fn test_non_image_rejected(ctx: &TestContext) -> Result<()> {
    // ARRANGE
    let tokens = register(ctx, "notimage@example.com").await?;
    let token = &tokens.access_token;
    let album = create_album(ctx, token, "Text only", "No photos here").await?;

    // ACT
    let part = reqwest::multipart::Part::text("just words")
        .file_name("notes.txt")
        .mime_str("text/plain")?;
    let form = reqwest::multipart::Form::new().part("files", part);
    let response = ctx
        .http_client
        .post(ctx.api_url(&format!("/albums/{}/photos", album.id)))
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // An empty upload is also refused.
    let form = reqwest::multipart::Form::new().text("title", "nothing attached");
    let response = ctx
        .http_client
        .post(ctx.api_url(&format!("/albums/{}/photos", album.id)))
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await?;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    Ok(())
}
