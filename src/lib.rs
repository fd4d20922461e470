use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod seed;
pub mod services;
pub mod store;

use auth::rate_limit::RateLimitState;
use config::Config;
use services::diary::DiaryService;
use services::mood_classifier::MoodClassifier;
use services::sentiment::{LexiconScorer, SentimentScorer};
use services::stats::StatsService;
use store::{EntryStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: Arc<dyn UserStore>,
    pub entries: Arc<dyn EntryStore>,
    pub diary: DiaryService,
    pub stats: StatsService,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    /// Wire services over one store, scoring with the built-in lexicon.
    pub fn new<S>(store: S, config: Config) -> Self
    where
        S: EntryStore + UserStore + Clone + 'static,
    {
        Self::with_scorer(store, config, Arc::new(LexiconScorer::new()))
    }

    pub fn with_scorer<S>(store: S, config: Config, scorer: Arc<dyn SentimentScorer>) -> Self
    where
        S: EntryStore + UserStore + Clone + 'static,
    {
        let entries: Arc<dyn EntryStore> = Arc::new(store.clone());
        let users: Arc<dyn UserStore> = Arc::new(store);
        let classifier = MoodClassifier::new(scorer);

        Self {
            config: Arc::new(config),
            users,
            diary: DiaryService::new(entries.clone(), classifier),
            stats: StatsService::new(entries.clone()),
            entries,
            rate_limiter: RateLimitState::new(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(auth_routes);

    let protected_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        // Diary entries
        .route(
            "/api/diary",
            post(handlers::diary::create_entry).get(handlers::diary::list_entries),
        )
        .route(
            "/api/diary/today",
            get(handlers::diary::get_today).put(handlers::diary::update_today),
        )
        // Stats
        .route("/api/diary/stats/moods", get(handlers::stats::get_mood_counts))
        .route("/api/diary/stats/streak", get(handlers::stats::get_streak))
        .route("/api/diary/stats/trends", get(handlers::stats::get_trends))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
