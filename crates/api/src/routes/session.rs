use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;
use crate::ws;

/// Session routes mounted at `/sessions`.
///
/// ```text
/// POST   /                                   -> create_session
/// GET    /{id}                               -> get_session
/// DELETE /{id}                               -> delete_session
/// POST   /{id}/items                         -> apply_item
/// POST   /{id}/drop                          -> drop_item
/// POST   /{id}/reset                         -> reset_avatar
/// PUT    /{id}/variant                       -> select_variant
/// GET    /{id}/layers                        -> get_layers
/// GET    /{id}/favorites                     -> list_favorites
/// POST   /{id}/favorites/{item_id}/toggle    -> toggle_favorite
/// GET    /{id}/settings                      -> get_settings
/// PUT    /{id}/settings                      -> update_settings
/// GET    /{id}/ws                            -> session_ws_handler
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(session::create_session))
        .route(
            "/{id}",
            get(session::get_session).delete(session::delete_session),
        )
        .route("/{id}/items", post(session::apply_item))
        .route("/{id}/drop", post(session::drop_item))
        .route("/{id}/reset", post(session::reset_avatar))
        .route("/{id}/variant", put(session::select_variant))
        .route("/{id}/layers", get(session::get_layers))
        .route("/{id}/favorites", get(session::list_favorites))
        .route(
            "/{id}/favorites/{item_id}/toggle",
            post(session::toggle_favorite),
        )
        .route(
            "/{id}/settings",
            get(session::get_settings).put(session::update_settings),
        )
        .route("/{id}/ws", get(ws::session_ws_handler))
}
