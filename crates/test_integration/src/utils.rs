use app_state::AppSettings;
use color_eyre::eyre::Result;
use sqlx::{Executor, PgPool};
use std::net::TcpListener;
use tracing::info;
use url::Url;

/// Derives a per-run settings object: free port, matching public URL and a
/// database URL pointing at the dedicated test database.
pub fn create_test_settings(
    base_settings: &AppSettings,
    database_name: &str,
) -> Result<AppSettings> {
    let mut settings = base_settings.clone();

    let port = get_free_port()?;
    settings.api.port = port;
    settings.api.public_url = format!("http://localhost:{port}");

    let mut db_url = Url::parse(&settings.secrets.database_url)?;
    db_url.set_path(&format!("/{database_name}"));
    settings.secrets.database_url = db_url.to_string();

    Ok(settings)
}

pub async fn create_test_database(
    base_database_url: &str,
    database_name: &str,
) -> Result<(PgPool, PgPool)> {
    // Connect to the default 'postgres' database to manage other databases.
    let mut management_db_url = Url::parse(base_database_url)?;
    management_db_url.set_path("/postgres");
    let management_pool = PgPool::connect(management_db_url.as_str()).await?;
    force_drop_db(&management_pool, database_name).await;

    management_pool
        .execute(format!("CREATE DATABASE \"{database_name}\"").as_str())
        .await?;

    let mut test_db_url = Url::parse(base_database_url)?;
    test_db_url.set_path(&format!("/{database_name}"));
    let main_pool = PgPool::connect(test_db_url.as_str()).await?;

    sqlx::migrate!("../../migrations").run(&main_pool).await?;
    info!("Finished database migrations for {}", database_name);

    Ok((main_pool, management_pool))
}

pub async fn force_drop_db(management_pool: &PgPool, db_name: &str) {
    let _ = management_pool
        .execute(format!("DROP DATABASE \"{db_name}\" WITH (FORCE)").as_str())
        .await;
}

pub fn get_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
