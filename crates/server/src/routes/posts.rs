//! HTML handlers: list, add, edit, delete, like and comment.
//!
//! Every mutation answers with `303 See Other` back to the list view.

use axum::{
    extract::{Path, State},
    response::{Redirect, Response},
    Form,
};
use serde::Deserialize;
use service::posts::PostInput;

use crate::errors::WebError;
use crate::state::AppState;
use crate::views::{render_template, AddView, IndexView, UpdateView};

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub comment: String,
}

pub async fn index(State(state): State<AppState>) -> Result<Response, WebError> {
    let posts = state.posts.list().await?;
    Ok(render_template(IndexView { posts }))
}

pub async fn add_form() -> Response {
    render_template(AddView::default())
}

pub async fn add(
    State(state): State<AppState>,
    Form(input): Form<PostInput>,
) -> Result<Redirect, WebError> {
    state.posts.add(input).await?;
    Ok(Redirect::to("/"))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    match state.posts.get(&id).await? {
        Some(post) => Ok(render_template(UpdateView { post })),
        None => Err(WebError::NotFound("post not found".into())),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<PostInput>,
) -> Result<Redirect, WebError> {
    state.posts.update(&id, input).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    state.posts.delete(&id).await?;
    Ok(Redirect::to("/"))
}

pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    state.posts.like(&id).await?;
    Ok(Redirect::to("/"))
}

pub async fn comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, WebError> {
    state.posts.add_comment(&id, form.comment).await?;
    Ok(Redirect::to("/"))
}
