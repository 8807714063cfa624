use axum::{extract::{Path, State}, http::StatusCode, Json};
use service::posts::Post;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// 列出所有文章
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, JsonApiError> {
    Ok(Json(state.posts.list().await?))
}

/// 获取指定文章
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, JsonApiError> {
    state
        .posts
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("post {id} not found"))))
}
