//! Pagination utilities for corganize API responses.
//!
//! The service pages listings with an opaque continuation token. The token
//! comes back in the response's `metadata.nexttoken` and goes out again in
//! the `nexttoken` request header.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::NEXT_TOKEN_HEADER;

/// A page of results from the corganize API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page, in server order.
    pub items: Vec<T>,
    /// Continuation token for the following page.
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Create a new page. An empty token is treated as no token.
    #[must_use]
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self {
            items,
            next_token: next_token.filter(|t| !t.is_empty()),
        }
    }

    /// Whether the service reported more pages.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_token: self.next_token,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Wire shape of a listing response.
///
/// Both keys are required; a body without them fails to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub files: Vec<T>,
    pub metadata: PageMetadata,
}

/// Metadata block of a listing response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nexttoken: Option<String>,
}

impl<T> From<PageResponse<T>> for Page<T> {
    fn from(response: PageResponse<T>) -> Self {
        Page::new(response.files, response.metadata.nexttoken)
    }
}

/// Extra headers for a listing request.
///
/// Values are immutable: the builder methods return a new value and leave
/// the receiver untouched, so a caller's options survive pagination as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: BTreeMap<String, String>,
}

impl RequestOptions {
    /// Options with no extra headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `name` set to `value`.
    #[must_use]
    pub fn with_header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = self.headers.clone();
        headers.insert(name.into().to_ascii_lowercase(), value.into());
        Self { headers }
    }

    /// Return a copy that requests the page after `token`.
    #[must_use]
    pub fn with_next_token(&self, token: impl Into<String>) -> Self {
        self.with_header(NEXT_TOKEN_HEADER, token)
    }

    /// The continuation token these options carry, if any.
    pub fn next_token(&self) -> Option<&str> {
        self.headers.get(NEXT_TOKEN_HEADER).map(String::as_str)
    }

    /// Header name/value pairs, names lowercased.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
