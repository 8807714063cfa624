//! Storage abstractions for service layer
//!
//! Contains the file-backed JSON array store that every post operation
//! goes through.

pub mod json_file_store;
