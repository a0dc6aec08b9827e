use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::RestError;
use crate::hn::{ItemId, StoryType, UserView};
use crate::http::response::{ItemView, StoriesPage, UserPage};
use crate::http::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    id: Option<String>,
    view: Option<String>,
    page: Option<String>,
}

/// Anything missing, unparseable or below 1 means the first page.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|page| page.trim().parse::<usize>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or(1)
}

pub async fn stories(
    story_type: StoryType,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<StoriesPage>, RestError> {
    let page = parse_page(query.page.as_deref());
    let items_per_page = state.client.config().items_per_page;

    let stories = state.client.get_stories_for_page(story_type, page).await?;
    debug!("Serving {} page {} with {} stories", story_type, page, stories.len());

    Ok(Json(StoriesPage::new(
        story_type,
        page,
        items_per_page,
        &stories,
        Utc::now(),
    )))
}

pub async fn item(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<ItemView>, RestError> {
    let id: ItemId = query
        .id
        .as_deref()
        .and_then(|id| id.trim().parse().ok())
        .ok_or(RestError::InvalidItemId)?;

    let item = state.client.get_item(id).await?;

    Ok(Json(ItemView::new(&item, Utc::now())))
}

pub async fn user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserPage>, RestError> {
    let id = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(RestError::MissingUserId)?;
    let page = parse_page(query.page.as_deref());
    let view = query.view.as_deref().and_then(|view| view.parse::<UserView>().ok());
    let items_per_page = state.client.config().items_per_page;

    let user = state
        .client
        .get_user(id)
        .await
        .map_err(RestError::UserNotFound)?;

    let profile = UserPage::new(&user, page, items_per_page);

    let Some(view) = view else {
        return Ok(Json(profile));
    };

    let items = state.client.get_user_items(&user, view, page).await;
    Ok(Json(profile.with_items(view, &items, Utc::now())))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Unknown.")
}
