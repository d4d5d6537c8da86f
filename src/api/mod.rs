//! API handlers for Book API REST endpoints

pub mod books;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, OriginalUri, Request},
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{error::AppError, models::problem::ValidationProblem, AppState};

/// JSON body extractor that runs validation before the handler is called
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Nested routers strip their prefix from `req.uri()`
        let instance = match req.extensions().get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri.path().to_string(),
            None => req.uri().path().to_string(),
        };

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::UnreadableBody {
                status: rejection.status(),
                instance: instance.clone(),
                detail: rejection.body_text(),
            })?;

        value.validate().map_err(|errors| {
            tracing::debug!("Rejected {}: {}", instance, errors);
            AppError::Validation(ValidationProblem::from_validation_errors(instance.clone(), &errors))
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
