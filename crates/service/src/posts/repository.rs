use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::posts::model::{Post, PostInput};

/// Trait abstraction over post persistence, held by the HTTP layer as `Arc<dyn PostRepository>`.
///
/// `delete`, `like` and `add_comment` silently ignore unknown ids while
/// `update` reports `NotFound`.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Post>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<Post>, ServiceError>;
    async fn add(&self, input: PostInput) -> Result<Post, ServiceError>;
    async fn update(&self, id: &str, input: PostInput) -> Result<Post, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
    async fn like(&self, id: &str) -> Result<(), ServiceError>;
    async fn add_comment(&self, id: &str, text: String) -> Result<(), ServiceError>;
}
