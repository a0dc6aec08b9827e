pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, MethodRouter},
    Router,
};
use http::StatusCode;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::hn::{HnClient, StoryType};

#[derive(Clone)]
pub struct AppState {
    pub client: HnClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(client: HnClient, config: Config) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

fn stories_route(story_type: StoryType) -> MethodRouter<AppState> {
    get(
        move |state: State<AppState>, query: Query<handlers::PageQuery>| {
            handlers::stories(story_type, state, query)
        },
    )
}

pub fn router(state: AppState) -> Router {
    let timeout = state.config.request_timeout;

    Router::new()
        .route("/", stories_route(StoryType::Top))
        .route("/new", stories_route(StoryType::New))
        .route("/ask", stories_route(StoryType::Ask))
        .route("/show", stories_route(StoryType::Show))
        .route("/job", stories_route(StoryType::Job))
        .route("/item", get(handlers::item))
        .route("/user", get(handlers::user))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
