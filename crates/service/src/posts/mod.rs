//! Blog posts: the record type, the file-backed store and the trait the
//! HTTP layer calls through.

pub mod model;
pub mod repository;
pub mod store;

pub use model::{Post, PostInput};
pub use repository::PostRepository;
pub use store::PostStore;
