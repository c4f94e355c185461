use color_eyre::Result;
use sqlx::PgPool;

/// Connects to the database and applies any pending migrations.
pub async fn connect_and_migrate(database_url: &str) -> Result<PgPool> {
    let pool = PgPool::connect(database_url).await?;
    sqlx::migrate!("../../../migrations").run(&pool).await?;
    Ok(pool)
}
