use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes mounted at `/catalog`.
///
/// ```text
/// GET /categories        -> list_categories
/// GET /variants          -> list_variants
/// GET /items             -> list_items
/// GET /items/{item_id}   -> get_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::list_categories))
        .route("/variants", get(catalog::list_variants))
        .route("/items", get(catalog::list_items))
        .route("/items/{item_id}", get(catalog::get_item))
}
