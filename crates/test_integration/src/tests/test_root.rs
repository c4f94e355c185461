use crate::test_context::TestContext;
use color_eyre::Result;

pub async fn test_health(ctx: &TestContext) -> Result<()> {
    let url = format!("{}/health", ctx.settings.api.public_url);
    let response = ctx.http_client.get(url).send().await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "ok");

    Ok(())
}
