//! Demo-data seeder: wipes users/tasks and inserts three demo accounts plus
//! a handful of tasks. Run with `cargo run --bin seed`.

use anyhow::Context;
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use uuid::Uuid;

const DEMO_PASSWORD: &str = "password123";

fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "seed=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("connect to database")?;

    sqlx::migrate!("./migrations").run(&db).await?;

    info!("clearing existing data");
    sqlx::query("DELETE FROM tasks").execute(&db).await?;
    sqlx::query("DELETE FROM users").execute(&db).await?;

    info!("creating demo users");
    let hash = hash_password(DEMO_PASSWORD)?;

    let demo_users = [
        ("Admin User", "admin@example.com"),
        ("John Doe", "john@example.com"),
        ("Jane Smith", "jane@example.com"),
    ];

    let mut user_ids = Vec::with_capacity(demo_users.len());
    for (name, email) in demo_users {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(&hash)
        .fetch_one(&db)
        .await?;
        user_ids.push(id);
    }
    info!(count = user_ids.len(), "created demo users");

    info!("creating demo tasks");
    let demo_tasks = [
        (
            "Complete project proposal",
            "Finish writing the project proposal document and send it to stakeholders",
            "pending",
            user_ids[0],
        ),
        (
            "Review pull requests",
            "Review and merge outstanding pull requests in the GitHub repository",
            "in-progress",
            user_ids[0],
        ),
        (
            "Prepare presentation",
            "Create slides for the quarterly review meeting",
            "completed",
            user_ids[0],
        ),
        (
            "Team sync meeting",
            "Attend weekly team sync meeting at 10 AM",
            "pending",
            user_ids[1],
        ),
        (
            "Update documentation",
            "Update API documentation with latest changes",
            "in-progress",
            user_ids[1],
        ),
    ];

    for (title, description, status, user_id) in demo_tasks {
        sqlx::query(
            r#"
            INSERT INTO tasks (user_id, title, description, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(status)
        .execute(&db)
        .await?;
    }
    info!(count = demo_tasks.len(), "created demo tasks");

    info!("seed complete");
    for (_, email) in demo_users {
        info!(email, password = DEMO_PASSWORD, "demo credentials");
    }

    Ok(())
}
