//! Data models for corganize API entities.

pub mod file;
pub mod user_config;

pub use file::{DeleteFilesRequest, FileRecord, FileView};
