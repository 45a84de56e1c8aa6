//! Schema setup for the products table

use sqlx::PgPool;

/// Create the products table if it does not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running product migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            price NUMERIC(10, 2) NOT NULL,
            amount INTEGER NOT NULL,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Products table ready");
    Ok(())
}
