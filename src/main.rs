use anyhow::Context;

use moodmate_api::config::{Config, StorageBackend};
use moodmate_api::services::diary::today_utc;
use moodmate_api::store::{memory::MemoryStore, postgres::PgStore};
use moodmate_api::{auth, build_router, db, seed, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodmate_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;

    let state = match config.storage_backend {
        StorageBackend::Postgres => {
            if config.demo_account.is_some() {
                tracing::warn!("DEMO_EMAIL is ignored with the postgres backend");
            }
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            let pool = db::create_pool(url, config.db_max_connections)
                .await
                .context("Failed to create database pool")?;
            db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
            AppState::new(PgStore::new(pool), config.clone())
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; entries are lost on restart");
            let store = MemoryStore::new();
            if let Some(demo) = &config.demo_account {
                let user = seed::ensure_demo_user(&store, &demo.email, &demo.password)
                    .await
                    .context("Failed to create demo user")?;
                seed::seed_sample_entries(&store, user.id, today_utc())
                    .await
                    .context("Failed to seed sample entries")?;
            }
            AppState::new(store, config.clone())
        }
    };

    auth::rate_limit::spawn_cleanup_worker(state.rate_limiter.clone());

    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    // Connect info feeds the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
