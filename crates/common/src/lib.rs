//! Shared building blocks for the blog workspace: health payload and
//! logging bootstrap.

pub mod types;
pub mod utils;
