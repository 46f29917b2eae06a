use restaurant_orders_api::{
    config::AppConfig,
    db::{DbPool, create_pool, orm_from_pool, run_migrations},
    services::auth_service::hash_password,
};
use uuid::Uuid;

const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&orm_from_pool(&pool)).await?;

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());

    let admin_id = ensure_admin(&pool, &email, &password).await?;
    println!("Seed completed. Admin {email} ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(pool: &DbPool, email: &str, password: &str) -> anyhow::Result<Uuid> {
    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("hash admin password: {e}"))?;

    // Re-seeding resets the password but keeps the id.
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO admin_users (id, email, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email.trim().to_lowercase())
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
