//! Mock server state management.
//!
//! Provides the in-memory data store for the mock corganize server.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::{FileRecord, FileView};

/// Page size used unless a test overrides it.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Shared state for the mock server.
///
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// File records, newest first.
    pub files: Vec<FileRecord>,

    /// Document served from `/config`.
    pub user_config: Value,

    /// Maximum records per listing page.
    pub page_size: usize,

    /// Optional API key. If set, requests must carry it in `apikey`.
    pub required_api_key: Option<String>,

    /// Number of listing pages served so far.
    pub pages_served: usize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            user_config: Value::Object(Default::default()),
            page_size: DEFAULT_PAGE_SIZE,
            required_api_key: None,
            pages_served: 0,
        }
    }
}

/// Outcome of a bulk insert.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BulkInsert {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Append a file (it becomes the oldest record).
    pub fn with_file(mut self, file: FileRecord) -> Self {
        self.files.push(file);
        self
    }

    /// Set the `/config` document.
    pub fn with_user_config(mut self, config: Value) -> Self {
        self.user_config = config;
        self
    }

    /// Set the listing page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the required API key.
    pub fn with_required_api_key(mut self, api_key: &str) -> Self {
        self.required_api_key = Some(api_key.to_string());
        self
    }

    /// Whether a request carrying `api_key` is allowed.
    pub fn is_authorized(&self, api_key: Option<&str>) -> bool {
        match &self.required_api_key {
            Some(required) => api_key == Some(required.as_str()),
            None => true,
        }
    }

    /// Get a file by id.
    pub fn get_file(&self, fileid: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.fileid() == Some(fileid))
    }

    /// All files in a view, in listing order.
    pub fn list_view(&self, view: FileView) -> Vec<&FileRecord> {
        self.files.iter().filter(|f| matches_view(f, view)).collect()
    }

    /// One page of a view starting at `offset`, plus the offset of the
    /// following page when there is one.
    pub fn page(&self, view: FileView, offset: usize) -> (Vec<FileRecord>, Option<usize>) {
        let matching = self.list_view(view);
        let end = offset.saturating_add(self.page_size).min(matching.len());

        let items = if offset < matching.len() {
            matching[offset..end].iter().map(|f| (*f).clone()).collect()
        } else {
            vec![]
        };
        let next = (end < matching.len()).then_some(end);

        (items, next)
    }

    /// Insert records at the front, newest first. Records without a `fileid`
    /// or with an id already present are skipped.
    pub fn insert_files(&mut self, files: Vec<FileRecord>) -> BulkInsert {
        let mut outcome = BulkInsert::default();
        let mut seen: HashSet<String> = self
            .files
            .iter()
            .filter_map(|f| f.fileid().map(str::to_string))
            .collect();
        let mut inserted = Vec::new();

        for file in files {
            match file.fileid().map(str::to_string) {
                Some(id) if seen.insert(id.clone()) => {
                    outcome.created.push(id);
                    inserted.push(file);
                }
                Some(id) => outcome.skipped.push(id),
                None => outcome.skipped.push(String::new()),
            }
        }

        self.files.splice(0..0, inserted);
        outcome
    }

    /// Merge the fields of `patch` into the stored record with the same id.
    ///
    /// Returns the updated record, or `None` if no record has that id.
    pub fn update_file(&mut self, patch: FileRecord) -> Option<&FileRecord> {
        let fileid = patch.fileid()?.to_string();
        let index = self
            .files
            .iter()
            .position(|f| f.fileid() == Some(fileid.as_str()))?;

        let stored = &mut self.files[index];
        for (key, value) in patch.into_inner() {
            stored.insert(key, value);
        }
        Some(&self.files[index])
    }

    /// Remove files by id, returning how many were removed.
    pub fn delete_files(&mut self, fileids: &[String]) -> usize {
        let before = self.files.len();
        self.files
            .retain(|f| !f.fileid().is_some_and(|id| fileids.iter().any(|d| d == id)));
        before - self.files.len()
    }
}

/// View membership used by the mock listings.
fn matches_view(file: &FileRecord, view: FileView) -> bool {
    let flag = |key: &str| file.get(key).and_then(Value::as_bool).unwrap_or(false);
    match view {
        FileView::Recent => true,
        FileView::Active => flag("isactive"),
        FileView::Stale => flag("isstale"),
        FileView::Incomplete => {
            file.get("storageservice").is_none() || file.get("locationref").is_none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file(id: &str) -> FileRecord {
        FileRecord::with_id(id)
            .with_field("storageservice", "s3")
            .with_field("locationref", format!("bucket/{id}"))
    }

    #[test]
    fn test_state_add_and_get_file() {
        let state = MockState::new().with_file(file("f1"));

        let found = state.get_file("f1");
        assert!(found.is_some());
        assert_eq!(found.unwrap().get("storageservice"), Some(&json!("s3")));
        assert!(state.get_file("missing").is_none());
    }

    #[test]
    fn test_views_filter_records() {
        let state = MockState::new()
            .with_file(file("a").with_field("isactive", true))
            .with_file(file("b").with_field("isstale", true))
            .with_file(FileRecord::with_id("c"));

        let ids = |view: FileView| -> Vec<String> {
            state
                .list_view(view)
                .iter()
                .filter_map(|f| f.fileid().map(str::to_string))
                .collect()
        };

        assert_eq!(ids(FileView::Recent), vec!["a", "b", "c"]);
        assert_eq!(ids(FileView::Active), vec!["a"]);
        assert_eq!(ids(FileView::Stale), vec!["b"]);
        assert_eq!(ids(FileView::Incomplete), vec!["c"]);
    }

    #[test]
    fn test_page_offsets() {
        let state = MockState::new()
            .with_page_size(2)
            .with_file(file("a"))
            .with_file(file("b"))
            .with_file(file("c"));

        let (items, next) = state.page(FileView::Recent, 0);
        assert_eq!(items.len(), 2);
        assert_eq!(next, Some(2));

        let (items, next) = state.page(FileView::Recent, 2);
        assert_eq!(items[0].fileid(), Some("c"));
        assert_eq!(next, None);

        let (items, next) = state.page(FileView::Recent, 10);
        assert!(items.is_empty());
        assert_eq!(next, None);
    }

    #[test]
    fn test_page_at_max_offset_is_empty() {
        let state = MockState::new().with_page_size(2).with_file(file("a"));

        let (items, next) = state.page(FileView::Recent, usize::MAX);
        assert!(items.is_empty());
        assert_eq!(next, None);
    }

    #[test]
    fn test_insert_files_prepends_and_skips_duplicates() {
        let mut state = MockState::new().with_file(file("old"));

        let outcome = state.insert_files(vec![file("n1"), file("old"), file("n2"), file("n1")]);

        assert_eq!(outcome.created, vec!["n1", "n2"]);
        assert_eq!(outcome.skipped, vec!["old", "n1"]);
        let order: Vec<_> = state.files.iter().filter_map(|f| f.fileid()).collect();
        assert_eq!(order, vec!["n1", "n2", "old"]);
    }

    #[test]
    fn test_update_file_merges_fields() {
        let mut state = MockState::new().with_file(file("f1"));

        let updated = state
            .update_file(FileRecord::with_id("f1").with_field("isactive", true))
            .unwrap();
        assert_eq!(updated.get("isactive"), Some(&json!(true)));
        assert_eq!(updated.get("storageservice"), Some(&json!("s3")));

        assert!(state.update_file(FileRecord::with_id("nope")).is_none());
    }

    #[test]
    fn test_delete_files() {
        let mut state = MockState::new()
            .with_file(file("a"))
            .with_file(file("b"))
            .with_file(file("c"));

        let removed = state.delete_files(&["a".to_string(), "c".to_string(), "zz".to_string()]);
        assert_eq!(removed, 2);
        assert_eq!(state.files.len(), 1);
        assert_eq!(state.files[0].fileid(), Some("b"));
    }

    #[test]
    fn test_authorization() {
        let open = MockState::new();
        assert!(open.is_authorized(None));

        let locked = MockState::new().with_required_api_key("k");
        assert!(locked.is_authorized(Some("k")));
        assert!(!locked.is_authorized(Some("other")));
        assert!(!locked.is_authorized(None));
    }
}
