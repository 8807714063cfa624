//! Service layer for the blog: post persistence on top of a JSON file.
//! - `storage` holds the generic JSON array file store.
//! - `posts` holds the `Post` model, `PostStore` and the `PostRepository` trait.
//! - Errors are reported through `errors::ServiceError`.

pub mod errors;
pub mod storage;
pub mod posts;
