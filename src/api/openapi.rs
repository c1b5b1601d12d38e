//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mi Biblioteca API",
        version = "0.1.0",
        description = "Personal library catalog REST API"
    ),
    paths(
        // Health
        health::welcome,
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::patch_book,
        books::delete_book,
        books::get_book_metadata,
        // Search
        books::search_by_title,
        books::search_by_author,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::BookPatch,
            crate::models::BookQuery,
            crate::models::BookResponse,
            crate::models::BookMetadata,
            crate::models::MetadataBlock,
            crate::models::Genre,
            crate::models::BookStatus,
            // Health
            health::WelcomeResponse,
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "search", description = "Book search")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
