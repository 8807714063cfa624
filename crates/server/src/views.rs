//! Askama view models and rendering helpers for the HTML pages.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use service::posts::Post;

/// List of all posts with like/comment/delete controls.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView {
    pub posts: Vec<Post>,
}

/// Empty form for a new post.
#[derive(Template)]
#[template(path = "add.html")]
pub struct AddView {
    pub heading: &'static str,
}

impl Default for AddView {
    fn default() -> Self {
        Self { heading: "Add a post" }
    }
}

/// Edit form pre-filled with an existing post.
#[derive(Template)]
#[template(path = "update.html")]
pub struct UpdateView {
    pub post: Post,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorView {
    pub heading: String,
    pub message: String,
}

/// Render a template as a 200 HTML response.
pub fn render_template<T: Template>(template: T) -> Response {
    render_with_status(StatusCode::OK, template)
}

/// Render a template with the given status, falling back to plain text
/// if rendering itself fails.
pub fn render_with_status<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> Post {
        Post {
            id: "p1".into(),
            title: title.into(),
            author: "Ann".into(),
            content: "Body".into(),
            likes: 2,
            comments: vec!["great".into()],
        }
    }

    #[test]
    fn index_lists_posts_and_comments() {
        let html = IndexView { posts: vec![post("Hello")] }.render().unwrap();
        assert!(html.contains("Hello"));
        assert!(html.contains("great"));
        assert!(html.contains("/like/p1"));
        assert!(html.contains("Like (2)"));
    }

    #[test]
    fn index_escapes_user_text() {
        let html = IndexView { posts: vec![post("<script>x</script>")] }.render().unwrap();
        assert!(!html.contains("<script>x</script>"));
    }

    #[test]
    fn empty_index_says_so() {
        let html = IndexView { posts: vec![] }.render().unwrap();
        assert!(html.contains("No posts yet"));
    }

    #[test]
    fn update_form_is_prefilled() {
        let html = UpdateView { post: post("Edit me") }.render().unwrap();
        assert!(html.contains("Edit me"));
        assert!(html.contains("/update/p1"));
    }

    #[test]
    fn render_with_status_keeps_status() {
        let res = render_with_status(
            StatusCode::NOT_FOUND,
            ErrorView { heading: "Not Found".into(), message: "post not found".into() },
        );
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn add_form_posts_to_add() {
        let html = AddView::default().render().unwrap();
        assert!(html.contains("action=\"/add\""));
    }
}
