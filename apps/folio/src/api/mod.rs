//! # HTTP API
//!
//! axum router over the content store.
//!
//! ## Routes
//!
//! Reads are public and localized by `Accept-Language`. Writes require the
//! admin bearer key (see [`extract::Admin`]).
//!
//! ```text
//! GET  /health
//! GET  /language                 POST /language
//! POST /contact                  GET  /contact
//! GET  /education                POST /education
//! GET  /education/{id}           PUT  /education/{id}
//! GET  /experience               POST /experience
//! GET  /experience/{id}          PUT  /experience/{id}
//! GET  /expertise                POST /expertise
//! GET  /expertise/{id}           PUT  /expertise/{id}
//! GET  /institution              POST /institution
//! GET  /institution/{id}         PUT  /institution/{id}
//! POST /address
//! GET  /page                     POST /page
//! GET  /page/{tech_key}          PUT  /page/{tech_key}
//! GET  /personal-details         POST /personal-details
//! GET  /personal-information     POST /personal-information
//! GET  /personal-information/{id} PUT /personal-information/{id}
//! GET  /social-media             POST /social-media
//! GET  /social-media/{id}
//! GET  /work                     POST /work
//! GET  /work/{id}
//! POST /category
//! GET  /image/{id}
//! ```

mod content;
pub mod error;
pub mod extract;
mod site;

use crate::config::ServerConfig;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use error::ApiError;
use folio_core::Store;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

// =============================================================================
// STATE
// =============================================================================

/// Shared handle to the store.
///
/// `rusqlite` is blocking, so every call runs on the blocking pool while the
/// mutex is held.
#[derive(Clone)]
pub struct Db(Arc<Mutex<Store>>);

impl Db {
    pub fn new(store: Store) -> Self {
        Self(Arc::new(Mutex::new(store)))
    }

    /// Run `f` against the store on a blocking thread.
    pub async fn call<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Store) -> folio_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.0);
        tokio::task::spawn_blocking(move || {
            let mut guard = store
                .lock()
                .map_err(|_| ApiError::Internal("store lock poisoned".into()))?;
            f(&mut *guard).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("store task failed: {err}")))?
    }
}

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub admin_key: Option<Arc<str>>,
    pub contact_limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    pub fn new(store: Store, config: &ServerConfig) -> Self {
        Self {
            db: Db::new(store),
            admin_key: config.admin_key().map(Arc::from),
            contact_limiter: Arc::new(RateLimiter::direct(Quota::per_minute(
                config.contact_per_minute,
            ))),
        }
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with CORS and request tracing.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(site::health))
        .route("/language", get(site::list_languages).post(site::create_language))
        .route("/contact", post(site::submit_contact).get(site::list_contacts))
        .route("/image/{id}", get(site::get_image))
        .route(
            "/social-media",
            get(site::list_social_media).post(site::create_social_media),
        )
        .route("/social-media/{id}", get(site::get_social_media))
        .route("/address", post(content::create_address))
        .route(
            "/institution",
            get(content::list_institutions).post(content::create_institution),
        )
        .route(
            "/institution/{id}",
            get(content::get_institution).put(content::update_institution),
        )
        .route(
            "/education",
            get(content::list_educations).post(content::create_education),
        )
        .route(
            "/education/{id}",
            get(content::get_education).put(content::update_education),
        )
        .route(
            "/experience",
            get(content::list_experiences).post(content::create_experience),
        )
        .route(
            "/experience/{id}",
            get(content::get_experience).put(content::update_experience),
        )
        .route(
            "/expertise",
            get(content::list_expertises).post(content::create_expertise),
        )
        .route(
            "/expertise/{id}",
            get(content::get_expertise).put(content::update_expertise),
        )
        .route("/page", get(content::list_pages).post(content::create_page))
        .route(
            "/page/{tech_key}",
            get(content::get_page).put(content::update_page),
        )
        .route(
            "/personal-details",
            get(content::get_personal_details).post(content::create_personal_details),
        )
        .route(
            "/personal-information",
            get(content::list_personal_information).post(content::create_personal_information),
        )
        .route(
            "/personal-information/{id}",
            get(content::get_personal_information).put(content::update_personal_information),
        )
        .route("/work", get(content::list_works).post(content::create_work))
        .route("/work/{id}", get(content::get_work))
        .route("/category", post(content::create_category))
        .fallback(site::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

/// CORS policy.
///
/// Without configured origins any site may read; writes are only allowed
/// from the listed origins.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .origins()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let base = CorsLayer::new()
        .expose_headers([header::CONTENT_LANGUAGE])
        .max_age(Duration::from_secs(60 * 60));
    if origins.is_empty() {
        return base
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::ACCEPT_LANGUAGE, header::CONTENT_TYPE]);
    }

    base.allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
}

// =============================================================================
// SERVER
// =============================================================================

/// Serve `store` until Ctrl+C or SIGTERM.
pub async fn run_server(store: Store, config: ServerConfig) -> std::io::Result<()> {
    if config.admin_key().is_none() {
        warn!("FOLIO_ADMIN_KEY is not set; admin routes are disabled");
    }

    let state = AppState::new(store, &config);
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind).await?;
    info!(address = %config.bind, "Folio server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                warn!(error = %err, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
