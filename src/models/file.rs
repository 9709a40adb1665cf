//! File record model and file operations.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::CorganizeClient;
use crate::error::Result;
use crate::pagination::{Page, PageResponse, RequestOptions};
use crate::traits::List;

/// A catalog entry as stored by the corganize service.
///
/// The record is an opaque JSON object. The client does not validate or
/// interpret its fields; it is passed through as-is in both directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileRecord(Map<String, Value>);

impl FileRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record with only its `fileid` set.
    pub fn with_id(fileid: impl Into<String>) -> Self {
        Self::new().with_field("fileid", fileid.into())
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The record's `fileid`, when present as a string.
    pub fn fileid(&self) -> Option<&str> {
        self.get("fileid").and_then(Value::as_str)
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Unwrap into the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for FileRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One of the service's file listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileView {
    /// `/files`: most recently added files.
    Recent,
    /// `/files/active`
    Active,
    /// `/files/stale`
    Stale,
    /// `/files/incomplete`
    Incomplete,
}

impl FileView {
    /// All views, in endpoint order.
    pub const ALL: [FileView; 4] = [Self::Recent, Self::Active, Self::Stale, Self::Incomplete];

    /// Resource path of the listing endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Self::Recent => "/files",
            Self::Active => "/files/active",
            Self::Stale => "/files/stale",
            Self::Incomplete => "/files/incomplete",
        }
    }
}

impl fmt::Display for FileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Recent => "recent",
            Self::Active => "active",
            Self::Stale => "stale",
            Self::Incomplete => "incomplete",
        };
        f.write_str(name)
    }
}

/// Body of `DELETE /files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFilesRequest {
    pub fileids: Vec<String>,
}

#[async_trait]
impl List for FileRecord {
    type Query = FileView;

    #[tracing::instrument(skip(client, options), fields(next_token = options.next_token()))]
    async fn list_page(
        client: &CorganizeClient,
        view: &FileView,
        options: &RequestOptions,
    ) -> Result<Page<Self>> {
        let response = client.get_with_options(view.path(), options).await?;
        let body = response.text().await?;
        let data: PageResponse<FileRecord> = serde_json::from_str(&body)?;
        Ok(data.into())
    }
}

impl CorganizeClient {
    /// Fetch up to `limit` records from a listing, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    pub async fn list_files(&self, view: FileView, limit: usize) -> Result<Vec<FileRecord>> {
        self.list_files_with_options(view, &RequestOptions::new(), limit)
            .await
    }

    /// Like [`list_files`](Self::list_files), sending the extra headers in
    /// `options` with every page request.
    pub async fn list_files_with_options(
        &self,
        view: FileView,
        options: &RequestOptions,
        limit: usize,
    ) -> Result<Vec<FileRecord>> {
        FileRecord::list_up_to(self, &view, options, limit).await
    }

    /// Most recently added files (`GET /files`).
    pub async fn get_recent_files(&self, limit: usize) -> Result<Vec<FileRecord>> {
        self.list_files(FileView::Recent, limit).await
    }

    /// Active files (`GET /files/active`).
    pub async fn get_active_files(&self, limit: usize) -> Result<Vec<FileRecord>> {
        self.list_files(FileView::Active, limit).await
    }

    /// Stale files (`GET /files/stale`).
    pub async fn get_stale_files(&self, limit: usize) -> Result<Vec<FileRecord>> {
        self.list_files(FileView::Stale, limit).await
    }

    /// Files with incomplete metadata (`GET /files/incomplete`).
    pub async fn get_incomplete_files(&self, limit: usize) -> Result<Vec<FileRecord>> {
        self.list_files(FileView::Incomplete, limit).await
    }

    /// Create records in bulk (`POST /files/bulk`).
    ///
    /// Returns the service's JSON response unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CorganizeError::ApiError`](crate::CorganizeError::ApiError)
    /// with the response body as message on a non-success status.
    #[tracing::instrument(skip(self, files), fields(count = files.len()))]
    pub async fn create_files(&self, files: &[FileRecord]) -> Result<Value> {
        let response = self.post("/files/bulk", files).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Update one record (`PATCH /files`).
    #[tracing::instrument(skip(self, file), fields(fileid = file.fileid()))]
    pub async fn update_file(&self, file: &FileRecord) -> Result<()> {
        self.patch("/files", file).await?;
        Ok(())
    }

    /// Delete records by id (`DELETE /files`).
    #[tracing::instrument(skip(self, fileids), fields(count = fileids.len()))]
    pub async fn delete_files<S: AsRef<str>>(&self, fileids: &[S]) -> Result<()> {
        let body = DeleteFilesRequest {
            fileids: fileids.iter().map(|id| id.as_ref().to_string()).collect(),
        };
        self.delete("/files", &body).await?;
        Ok(())
    }

    /// Delete a single record by id.
    pub async fn delete_file(&self, fileid: &str) -> Result<()> {
        self.delete_files(&[fileid]).await
    }
}
