use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::db::LanguageStore;
use crate::error::{ApiError, MISSING_FIELDS, NO_DATA};
use crate::models::{Language, NewLanguage, UpdateLanguage};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: LanguageStore,
}

/// Build the application router.
///
/// CORS allows any origin. Requests are traced through `tower_http`.
pub fn build_router(store: LanguageStore) -> Router {
    Router::new()
        .route(
            "/api/languages",
            get(list_languages)
                .post(create_language)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/languages/:id",
            get(get_language)
                .put(update_language)
                .delete(delete_language)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store })
}

/// Ids that are not non-negative integers are treated like an unmatched route
fn language_id(path: Result<Path<u64>, PathRejection>) -> Result<i64, ApiError> {
    match path {
        Ok(Path(id)) => i64::try_from(id).map_err(|_| ApiError::RouteNotFound),
        Err(rejection) => {
            debug!("Rejected language id: {}", rejection);
            Err(ApiError::RouteNotFound)
        }
    }
}

/// `GET /api/languages`
async fn list_languages(State(state): State<AppState>) -> Result<Json<Vec<Language>>, ApiError> {
    let languages = state.store.list().await?;
    Ok(Json(languages))
}

/// `GET /api/languages/{id}`
async fn get_language(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Language>, ApiError> {
    let id = language_id(path)?;
    let language = state.store.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(language))
}

/// `POST /api/languages`
async fn create_language(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Language>), ApiError> {
    let new = NewLanguage::from_body(&body).ok_or(ApiError::InvalidInput(MISSING_FIELDS))?;
    let language = state.store.create(&new).await?;

    info!("Created language {} ({})", language.id, language.name);
    Ok((StatusCode::CREATED, Json(language)))
}

/// `PUT /api/languages/{id}`
async fn update_language(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    body: Bytes,
) -> Result<Json<Language>, ApiError> {
    let id = language_id(path)?;

    let Some(update) = UpdateLanguage::from_body(&body) else {
        // An unknown id is reported ahead of the empty body
        state.store.get(id).await?.ok_or(ApiError::NotFound)?;
        return Err(ApiError::InvalidInput(NO_DATA));
    };
    if update.is_noop() {
        debug!("Update for language {} carries no known fields", id);
    }

    let language = state
        .store
        .update(id, &update)
        .await?
        .ok_or(ApiError::NotFound)?;

    info!("Updated language {}", id);
    Ok(Json(language))
}

/// `DELETE /api/languages/{id}`
async fn delete_language(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = language_id(path)?;

    if !state.store.delete(id).await? {
        return Err(ApiError::NotFound);
    }

    info!("Deleted language {}", id);
    Ok(Json(json!({ "message": "Language deleted successfully" })))
}

/// `GET /health`
async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.store.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
