//! Request extractors and localized responses.
//!
//! - [`Lang`]: the negotiated content language of a request.
//! - [`Admin`]: proof that the request carried the admin bearer key.
//! - [`Payload`]: a JSON body whose rejections render as 400 `{"detail"}`.
//! - [`Param`]: a path parameter, rejected the same way.

use super::AppState;
use super::error::ApiError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use folio_core::{LanguageCode, negotiate};
use serde::Serialize;
use std::convert::Infallible;
use subtle::ConstantTimeEq;
use tracing::warn;

// =============================================================================
// LANGUAGE
// =============================================================================

/// Content language taken from `Accept-Language`.
#[derive(Debug, Clone)]
pub struct Lang(pub LanguageCode);

impl Lang {
    /// Owned copy of the code, for moving into store calls.
    pub fn code(&self) -> LanguageCode {
        self.0.clone()
    }

    /// `200 OK` with `value` as JSON in this language.
    pub fn respond<T: Serialize>(self, value: T) -> Localized<T> {
        Localized {
            lang: self.0,
            status: StatusCode::OK,
            body: value,
        }
    }

    /// `201 Created` with `value` as JSON in this language.
    pub fn created<T: Serialize>(self, value: T) -> Localized<T> {
        Localized {
            lang: self.0,
            status: StatusCode::CREATED,
            body: value,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Lang {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        Ok(Self(negotiate(header)))
    }
}

/// JSON response tagged with `Content-Language`.
#[derive(Debug)]
pub struct Localized<T> {
    lang: LanguageCode,
    status: StatusCode,
    body: T,
}

impl<T: Serialize> IntoResponse for Localized<T> {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        if let Ok(value) = HeaderValue::from_str(self.lang.as_str()) {
            response.headers_mut().insert(header::CONTENT_LANGUAGE, value);
        }
        response
    }
}

// =============================================================================
// ADMIN
// =============================================================================

/// Guard for admin routes.
///
/// Expects `Authorization: Bearer <key>`. Without a configured key every
/// admin request is refused with 403.
#[derive(Debug, Clone, Copy)]
pub struct Admin;

impl FromRequestParts<AppState> for Admin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_key.as_deref() else {
            warn!(path = %parts.uri.path(), "admin route called but no admin key is configured");
            return Err(ApiError::Forbidden);
        };

        let presented = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token);

        match presented {
            Some(token) if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) => Ok(Self),
            _ => {
                warn!(path = %parts.uri.path(), "rejected admin request");
                Err(ApiError::Unauthorized)
            }
        }
    }
}

/// Token of a `Bearer` credential. The scheme is matched case-insensitively.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim_start().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|token| !token.is_empty())
}

// =============================================================================
// JSON BODY
// =============================================================================

/// JSON request body.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

// =============================================================================
// PATH PARAMETERS
// =============================================================================

/// Path parameter, e.g. the `{id}` of `/education/{id}`.
#[derive(Debug, Clone)]
pub struct Param<T>(pub T);

impl<S, T> FromRequestParts<S> for Param<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
