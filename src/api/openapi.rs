//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::books;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book API",
        version = "0.1.0",
        description = "REST API for book records",
        license(name = "GPL-3.0-or-later", url = "https://www.gnu.org/licenses/gpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "Book API")
    ),
    paths(
        books::list_books,
        books::create_book,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::NewBook,
            crate::models::problem::ValidationProblem,
            crate::models::problem::FieldError,
            crate::models::problem::ProblemDetail,
        )
    ),
    tags(
        (name = "books", description = "Book management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
