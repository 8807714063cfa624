pub mod api;
pub mod posts;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: HTML pages, JSON read API and health
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let pages = Router::new()
        .route("/", get(posts::index))
        .route("/add", get(posts::add_form).post(posts::add))
        .route("/update/:id", get(posts::update_form).post(posts::update))
        .route("/delete/:id", post(posts::delete))
        .route("/like/:id", post(posts::like))
        .route("/comment/:id", post(posts::comment));

    let api = Router::new()
        .route("/api/posts", get(api::list_posts))
        .route("/api/posts/:id", get(api::get_post));

    // Compose
    pages
        .merge(api)
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
