//! Site-wide handlers: health, languages, contact form, images and social
//! media links.

use super::AppState;
use super::error::{ApiError, ApiResult, found};
use super::extract::{Admin, Lang, Localized, Param, Payload};
use axum::Json;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::{
    ContactRead, ContactSubmission, LanguageCode, LanguageCreate, LanguageRead, SocialMediaCreate,
    SocialMediaRead,
};
use serde::Serialize;
use std::path::PathBuf;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".into())
}

// =============================================================================
// LANGUAGES
// =============================================================================

pub async fn list_languages(State(state): State<AppState>) -> ApiResult<Json<Vec<LanguageRead>>> {
    let items = state.db.call(|s| s.list_languages()).await?;
    Ok(Json(items))
}

pub async fn create_language(
    _admin: Admin,
    State(state): State<AppState>,
    Payload(payload): Payload<LanguageCreate>,
) -> ApiResult<(StatusCode, Json<LanguageRead>)> {
    let code = LanguageCode::parse(&payload.iso639_1).ok_or_else(|| {
        ApiError::BadRequest(format!("invalid language code '{}'", payload.iso639_1))
    })?;
    let created = state
        .db
        .call(move |s| s.add_language(&code, payload.name.as_deref()))
        .await?;
    info!(code = %created.iso639_1, "language registered");
    Ok((StatusCode::CREATED, Json(created)))
}

// =============================================================================
// CONTACT
// =============================================================================

/// Store a contact inquiry. The written language must already be registered.
pub async fn submit_contact(
    State(state): State<AppState>,
    lang: Lang,
    Payload(submission): Payload<ContactSubmission>,
) -> ApiResult<Localized<ContactSubmission>> {
    if state.contact_limiter.check().is_err() {
        warn!("contact form rate limit exceeded");
        return Err(ApiError::RateLimited);
    }

    let code = lang.code();
    let saved = state
        .db
        .call(move |s| s.save_contact(&submission, &code))
        .await?;
    info!(id = saved.id, lang = %lang.0, "contact inquiry stored");

    Ok(lang.created(ContactSubmission {
        name: saved.name,
        email: saved.email,
        message: saved.message,
    }))
}

pub async fn list_contacts(
    _admin: Admin,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ContactRead>>> {
    let items = state.db.call(|s| s.list_contacts()).await?;
    Ok(Json(items))
}

// =============================================================================
// IMAGES
// =============================================================================

/// Stream a registered image with a content type guessed from its extension.
pub async fn get_image(
    State(state): State<AppState>,
    Param(id): Param<i64>,
    request: Request,
) -> ApiResult<Response> {
    let image = found(state.db.call(move |s| s.get_image(id)).await?, "Image")?;
    let path = PathBuf::from(&image.filepath);

    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        warn!(id, path = %path.display(), "registered image is missing on disk");
        return Err(ApiError::NotFound("Image file missing on disk".into()));
    }

    match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => Ok(response.map(Body::new).into_response()),
        Err(never) => match never {},
    }
}

// =============================================================================
// SOCIAL MEDIA
// =============================================================================

pub async fn list_social_media(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SocialMediaRead>>> {
    let items = state.db.call(|s| s.list_social_media()).await?;
    Ok(Json(items))
}

pub async fn get_social_media(
    State(state): State<AppState>,
    Param(id): Param<i64>,
) -> ApiResult<Json<SocialMediaRead>> {
    let item = state.db.call(move |s| s.get_social_media(id)).await?;
    Ok(Json(found(item, "Social media")?))
}

pub async fn create_social_media(
    _admin: Admin,
    State(state): State<AppState>,
    Payload(payload): Payload<SocialMediaCreate>,
) -> ApiResult<(StatusCode, Json<SocialMediaRead>)> {
    let created = state
        .db
        .call(move |s| s.create_social_media(&payload))
        .await?;
    info!(id = created.id, "social media link created");
    Ok((StatusCode::CREATED, Json(created)))
}
