//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic file records.

use serde_json::{json, Value};

use crate::FileRecord;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Create a complete, inactive file record.
    pub fn stored_file(fileid: &str, filename: &str) -> FileRecord {
        FileRecord::with_id(fileid)
            .with_field("filename", filename)
            .with_field("size", 1_048_576)
            .with_field("storageservice", "s3")
            .with_field("locationref", format!("corganize-files/{fileid}"))
            .with_field("isactive", false)
            .with_field("isstale", false)
    }

    /// Create a file currently marked active.
    pub fn active_file(fileid: &str, filename: &str) -> FileRecord {
        Self::stored_file(fileid, filename).with_field("isactive", true)
    }

    /// Create a file marked stale.
    pub fn stale_file(fileid: &str, filename: &str) -> FileRecord {
        Self::stored_file(fileid, filename).with_field("isstale", true)
    }

    /// Create a file that has not been uploaded to storage yet.
    pub fn incomplete_file(fileid: &str, filename: &str) -> FileRecord {
        FileRecord::with_id(fileid)
            .with_field("filename", filename)
            .with_field("isactive", false)
            .with_field("isstale", false)
    }

    /// A small batch of stored files with predictable ids (`file-0`, `file-1`, ...).
    pub fn numbered_files(count: usize) -> Vec<FileRecord> {
        (0..count)
            .map(|i| Self::stored_file(&format!("file-{i}"), &format!("video-{i}.mp4")))
            .collect()
    }

    /// A typical user configuration document.
    pub fn user_config() -> Value {
        json!({
            "userid": "test-user",
            "storageservice": "s3",
            "bucket": "corganize-files",
            "maxactivefiles": 20
        })
    }

    /// Get the default scenario with common test data.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// Default test scenario with pre-configured data.
pub struct DefaultScenario {
    /// Files, newest first.
    pub files: Vec<FileRecord>,
    pub user_config: Value,
}

impl DefaultScenario {
    fn new() -> Self {
        let files = vec![
            Fixtures::active_file("f-001", "holiday.mp4"),
            Fixtures::stored_file("f-002", "lecture.mkv"),
            Fixtures::stale_file("f-003", "old-show.avi"),
            Fixtures::incomplete_file("f-004", "partial.mp4"),
            Fixtures::active_file("f-005", "concert.mp4"),
            Fixtures::stale_file("f-006", "archive.mov"),
        ];

        Self {
            files,
            user_config: Fixtures::user_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_file_is_complete() {
        let file = Fixtures::stored_file("f1", "a.mp4");
        assert_eq!(file.fileid(), Some("f1"));
        assert!(file.get("storageservice").is_some());
        assert!(file.get("locationref").is_some());
    }

    #[test]
    fn test_incomplete_file_lacks_storage() {
        let file = Fixtures::incomplete_file("f1", "a.mp4");
        assert!(file.get("storageservice").is_none());
    }

    #[test]
    fn test_numbered_files() {
        let files = Fixtures::numbered_files(3);
        let ids: Vec<_> = files.iter().filter_map(|f| f.fileid()).collect();
        assert_eq!(ids, vec!["file-0", "file-1", "file-2"]);
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.files.len(), 6);
        assert_eq!(scenario.user_config["userid"], "test-user");
    }
}
