//! Handlers for styling sessions.
//!
//! Every mutating endpoint runs under the session's lock via
//! [`SessionManager::update`](crate::sessions::SessionManager::update) and
//! publishes an [`AvatarEvent`] describing the outcome, so WebSocket
//! followers of the session can show a notification.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dressup_core::error::CoreError;
use dressup_core::types::{ItemId, SessionId, Timestamp};
use dressup_core::{
    Applied, AvatarState, ClothingItem, DressUpEngine, DressUpSettings, Layer, UpdateSettings,
};
use dressup_events::bus::{ACTION_FAILED, AVATAR_RESET, ITEM_APPLIED, VARIANT_CHANGED};
use dressup_events::AvatarEvent;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::sessions::Session;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /sessions`. Both fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSession {
    /// Body variant for a fresh avatar.
    pub variant: Option<String>,
    /// Previously saved avatar to resume from.
    pub state: Option<AvatarState>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyItem {
    pub item_id: ItemId,
}

#[derive(Debug, Deserialize)]
pub struct SelectVariant {
    pub variant: String,
}

/// A session as returned to clients: the avatar with its rendered layers.
#[derive(Debug, Serialize)]
pub struct SessionView<'a> {
    pub id: SessionId,
    pub avatar: &'a AvatarState,
    pub layers: Vec<Layer<'a>>,
    pub settings: DressUpSettings,
    pub favorites: &'a IndexSet<ItemId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl<'a> SessionView<'a> {
    pub fn new(engine: &'a DressUpEngine, session: &'a Session) -> Self {
        Self {
            id: session.id,
            avatar: &session.avatar,
            layers: engine.render_layers(&session.avatar).collect(),
            settings: session.settings,
            favorites: &session.favorites,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// Result of an apply or drop.
#[derive(Debug, Serialize)]
pub struct AppliedView<'a> {
    pub item: &'a ClothingItem,
    /// `false` when the item was already worn.
    pub changed: bool,
    pub session: SessionView<'a>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteToggled {
    pub item_id: ItemId,
    pub favorite: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Publish an `avatar.action_failed` event for a rejected intent.
///
/// A missing session has nobody to notify and is passed through silently.
fn report_failure(state: &AppState, session_id: SessionId, err: CoreError) -> AppError {
    if !matches!(err, CoreError::NotFound { entity: "Session", .. }) {
        tracing::debug!(%session_id, error = %err, "Avatar action rejected");
        state.event_bus.publish(
            AvatarEvent::new(ACTION_FAILED, session_id)
                .with_payload(json!({ "message": err.to_string() })),
        );
    }
    AppError::Core(err)
}

fn publish_applied(state: &AppState, session_id: SessionId, applied: &Applied<'_>) {
    state.event_bus.publish(
        AvatarEvent::new(ITEM_APPLIED, session_id)
            .with_item(applied.item.id.clone())
            .with_payload(json!({
                "item_name": applied.item.name,
                "category": applied.item.category,
                "changed": applied.changed,
            })),
    );
}

fn applied_response(
    state: &AppState,
    session_id: SessionId,
    result: Result<(Applied<'_>, Session), CoreError>,
) -> AppResult<Response> {
    let (applied, session) = result.map_err(|e| report_failure(state, session_id, e))?;
    publish_applied(state, session_id, &applied);

    let view = AppliedView {
        item: applied.item,
        changed: applied.changed,
        session: SessionView::new(&state.engine, &session),
    };
    Ok(Json(DataResponse { data: view }).into_response())
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions
///
/// Opens a session. With `state` the saved avatar is validated and resumed;
/// otherwise an empty avatar of `variant` (or the configured default) is
/// created.
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSession>>,
) -> AppResult<Response> {
    let input = body.map(|Json(b)| b).unwrap_or_default();

    let avatar = match input.state {
        Some(saved) => {
            if let Some(variant) = input.variant.as_deref() {
                if variant != saved.body_variant() {
                    return Err(AppError::BadRequest(format!(
                        "variant '{variant}' does not match saved state variant '{}'",
                        saved.body_variant()
                    )));
                }
            }
            state.engine.restore(saved)?
        }
        None => {
            let variant = input
                .variant
                .as_deref()
                .or(state.config.default_variant.as_deref());
            state.engine.new_state(variant)?
        }
    };

    let session = state.sessions.create(avatar).await?;
    tracing::info!(
        session_id = %session.id,
        variant = session.avatar.body_variant(),
        "Session created"
    );

    let view = SessionView::new(&state.engine, &session);
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })).into_response())
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<Response> {
    let session = state.sessions.snapshot(session_id).await?;
    let view = SessionView::new(&state.engine, &session);
    Ok(Json(DataResponse { data: view }).into_response())
}

/// DELETE /api/v1/sessions/{id}
///
/// Closes the session and any WebSocket connections following it.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<StatusCode> {
    if !state.sessions.remove(session_id).await {
        return Err(CoreError::NotFound {
            entity: "Session",
            id: session_id.to_string(),
        }
        .into());
    }
    let closed = state.ws_manager.close_session(session_id).await;
    tracing::info!(%session_id, closed, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Styling intents
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions/{id}/items
pub async fn apply_item(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    Json(input): Json<ApplyItem>,
) -> AppResult<Response> {
    let engine = &state.engine;
    let result = state
        .sessions
        .update(session_id, |s| engine.apply_item(&mut s.avatar, &input.item_id))
        .await;
    applied_response(&state, session_id, result)
}

/// POST /api/v1/sessions/{id}/drop
///
/// The body is the raw drag-and-drop payload exactly as the browser
/// delivered it. It is decoded and checked against the catalog before
/// anything is worn.
pub async fn drop_item(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    body: Bytes,
) -> AppResult<Response> {
    let engine = &state.engine;
    let result = state
        .sessions
        .update(session_id, |s| {
            if !s.settings.enable_drag_drop {
                return Err(CoreError::Validation(
                    "Drag and drop is disabled for this session".to_string(),
                ));
            }
            engine.resolve_drop(&mut s.avatar, &body)
        })
        .await;
    applied_response(&state, session_id, result)
}

/// POST /api/v1/sessions/{id}/reset
pub async fn reset_avatar(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<Response> {
    let engine = &state.engine;
    let ((), session) = state
        .sessions
        .update(session_id, |s| {
            engine.reset(&mut s.avatar);
            Ok(())
        })
        .await?;

    state
        .event_bus
        .publish(AvatarEvent::new(AVATAR_RESET, session_id));

    let view = SessionView::new(engine, &session);
    Ok(Json(DataResponse { data: view }).into_response())
}

/// PUT /api/v1/sessions/{id}/variant
///
/// Switches body variant. Worn items of the previous variant stay in the
/// avatar but drop out of the rendered layers until switched back.
pub async fn select_variant(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    Json(input): Json<SelectVariant>,
) -> AppResult<Response> {
    let engine = &state.engine;
    let ((), session) = state
        .sessions
        .update(session_id, |s| engine.select_variant(&mut s.avatar, &input.variant))
        .await
        .map_err(|e| report_failure(&state, session_id, e))?;

    let display_name = engine
        .catalog()
        .variant(session.avatar.body_variant())
        .map(|v| v.display_name.clone())
        .unwrap_or_default();
    state.event_bus.publish(
        AvatarEvent::new(VARIANT_CHANGED, session_id).with_payload(json!({
            "variant": session.avatar.body_variant(),
            "display_name": display_name,
        })),
    );

    let view = SessionView::new(engine, &session);
    Ok(Json(DataResponse { data: view }).into_response())
}

/// GET /api/v1/sessions/{id}/layers
///
/// Visible layers in draw order, bottom first.
pub async fn get_layers(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<Response> {
    let session = state.sessions.snapshot(session_id).await?;
    let layers: Vec<Layer<'_>> = state.engine.render_layers(&session.avatar).collect();
    Ok(Json(DataResponse { data: layers }).into_response())
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// GET /api/v1/sessions/{id}/favorites
///
/// Favourite catalog items in the order they were starred.
pub async fn list_favorites(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.snapshot(session_id).await?;
    let catalog = state.engine.catalog();
    let items: Vec<ClothingItem> = session
        .favorites
        .iter()
        .filter_map(|id| catalog.find(id))
        .cloned()
        .collect();
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/sessions/{id}/favorites/{item_id}/toggle
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path((session_id, item_id)): Path<(SessionId, ItemId)>,
) -> AppResult<impl IntoResponse> {
    state.engine.catalog().get(&item_id)?;
    let (favorite, _) = state
        .sessions
        .update(session_id, |s| Ok(s.toggle_favorite(&item_id)))
        .await?;
    Ok(Json(DataResponse {
        data: FavoriteToggled { item_id, favorite },
    }))
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// GET /api/v1/sessions/{id}/settings
pub async fn get_settings(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.snapshot(session_id).await?;
    Ok(Json(DataResponse {
        data: session.settings,
    }))
}

/// PUT /api/v1/sessions/{id}/settings
///
/// Partial update; omitted fields keep their value.
pub async fn update_settings(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
    Json(input): Json<UpdateSettings>,
) -> AppResult<impl IntoResponse> {
    let (settings, _) = state
        .sessions
        .update(session_id, |s| {
            s.settings.merge(&input);
            Ok(s.settings)
        })
        .await?;
    tracing::debug!(%session_id, ?settings, "Session settings updated");
    Ok(Json(DataResponse { data: settings }))
}
