//! Read-only catalog queries.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use dressup_core::{Category, ClothingItem};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /catalog/items`.
#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    /// Category name, singular or plural (`top`, `tops`, ...).
    pub category: Option<String>,
    /// Body variant name.
    pub variant: Option<String>,
}

/// One clothing-panel tab.
#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub id: Category,
    pub label: &'static str,
    /// Items in this category across all variants.
    pub item_count: usize,
}

/// GET /api/v1/catalog/categories
///
/// Categories in tab order with their display labels.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let catalog = state.engine.catalog();
    let categories: Vec<CategoryInfo> = Category::ALL
        .iter()
        .map(|&category| CategoryInfo {
            id: category,
            label: category.label(),
            item_count: catalog.items_for(Some(category), None).count(),
        })
        .collect();
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/catalog/variants
pub async fn list_variants(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let variants = state.engine.catalog().variants().to_vec();
    Ok(Json(DataResponse { data: variants }))
}

/// GET /api/v1/catalog/items?category=tops&variant=barbie
///
/// Items in catalog order, optionally narrowed by category and variant.
/// An unknown variant yields an empty list; an unknown category is an error.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemQuery>,
) -> AppResult<impl IntoResponse> {
    let category = params
        .category
        .as_deref()
        .map(Category::from_str)
        .transpose()?;

    let items: Vec<ClothingItem> = state
        .engine
        .catalog()
        .items_for(category, params.variant.as_deref())
        .cloned()
        .collect();

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/catalog/items/{item_id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let item = state.engine.catalog().get(&item_id)?.clone();
    Ok(Json(DataResponse { data: item }))
}
