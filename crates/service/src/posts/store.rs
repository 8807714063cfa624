use std::{path::PathBuf, sync::Arc};

use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::posts::model::{Post, PostInput};
use crate::posts::repository::PostRepository;
use crate::storage::json_file_store::JsonFileStore;

/// File storage for blog posts: a JSON array re-read on every call.
#[derive(Clone)]
pub struct PostStore {
    store: Arc<JsonFileStore<Post>>,
}

impl PostStore {
    /// Open the store and create the file with an empty array if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = Self::open(path).await?;
        store.store.ensure_initialized().await?;
        Ok(store)
    }

    /// Open the store without touching the file; `load` fails until it exists.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonFileStore::<Post>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub async fn load(&self) -> Result<Vec<Post>, ServiceError> {
        self.store.load().await
    }

    pub async fn save(&self, posts: &[Post]) -> Result<(), ServiceError> {
        self.store.save(posts).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Post>, ServiceError> {
        Ok(self.load().await?.into_iter().find(|p| p.id == id))
    }

    pub async fn add(&self, input: PostInput) -> Result<Post, ServiceError> {
        let created = self
            .store
            .transact(|posts| {
                let mut post = Post::new(input);
                while posts.iter().any(|p| p.id == post.id) {
                    post.id = Uuid::new_v4().to_string();
                }
                posts.push(post.clone());
                Ok(post)
            })
            .await?;
        info!(post_id = %created.id, "post added");
        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let removed = self
            .store
            .transact(|posts| {
                let before = posts.len();
                posts.retain(|p| p.id != id);
                Ok(before - posts.len())
            })
            .await?;
        debug!(post_id = %id, removed, "post delete");
        Ok(())
    }

    pub async fn update(&self, id: &str, input: PostInput) -> Result<Post, ServiceError> {
        let updated = self
            .store
            .transact(|posts| {
                let post = posts
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| ServiceError::not_found("post"))?;
                post.apply(input);
                Ok(post.clone())
            })
            .await?;
        info!(post_id = %id, "post updated");
        Ok(updated)
    }

    pub async fn like(&self, id: &str) -> Result<(), ServiceError> {
        let likes = self
            .store
            .transact(|posts| {
                Ok(posts.iter_mut().find(|p| p.id == id).map(|p| {
                    p.likes = p.likes.saturating_add(1);
                    p.likes
                }))
            })
            .await?;
        debug!(post_id = %id, ?likes, "post like");
        Ok(())
    }

    pub async fn add_comment(&self, id: &str, text: String) -> Result<(), ServiceError> {
        let found = self
            .store
            .transact(|posts| {
                Ok(match posts.iter_mut().find(|p| p.id == id) {
                    Some(p) => {
                        p.comments.push(text);
                        true
                    }
                    None => false,
                })
            })
            .await?;
        debug!(post_id = %id, found, "post comment");
        Ok(())
    }
}

#[async_trait::async_trait]
impl PostRepository for PostStore {
    async fn list(&self) -> Result<Vec<Post>, ServiceError> { self.load().await }
    async fn get(&self, id: &str) -> Result<Option<Post>, ServiceError> { self.get(id).await }
    async fn add(&self, input: PostInput) -> Result<Post, ServiceError> { self.add(input).await }
    async fn update(&self, id: &str, input: PostInput) -> Result<Post, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: &str) -> Result<(), ServiceError> { self.delete(id).await }
    async fn like(&self, id: &str) -> Result<(), ServiceError> { self.like(id).await }
    async fn add_comment(&self, id: &str, text: String) -> Result<(), ServiceError> { self.add_comment(id, text).await }
}
