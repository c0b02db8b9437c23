pub mod catalog;
pub mod health;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /catalog/categories                        list clothing-panel tabs
/// /catalog/variants                          list body variants
/// /catalog/items                             list items (?category, ?variant)
/// /catalog/items/{item_id}                   get item
///
/// /sessions                                  create (POST)
/// /sessions/{id}                             get, delete
/// /sessions/{id}/items                       apply item (POST)
/// /sessions/{id}/drop                        apply drag payload (POST)
/// /sessions/{id}/reset                       clear all slots (POST)
/// /sessions/{id}/variant                     switch body variant (PUT)
/// /sessions/{id}/layers                      rendered layers
/// /sessions/{id}/favorites                   list favourites
/// /sessions/{id}/favorites/{item_id}/toggle  star / unstar (POST)
/// /sessions/{id}/settings                    get, update (PUT)
/// /sessions/{id}/ws                          WebSocket notifications
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/sessions", session::router())
}
