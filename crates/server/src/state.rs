use std::sync::Arc;

use service::posts::PostRepository;

/// Shared handler state: the post store behind its trait.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}
