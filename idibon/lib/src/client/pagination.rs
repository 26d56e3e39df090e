//! Cursor-driven document listing.

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::IdibonClient;
use crate::builders::DocumentQueryOptions;
use crate::error::{ApiError, ClientError};
use crate::method::RestMethod;
use crate::path::encode_path;

/// Page size used when the query sets no `count`.
pub const DEFAULT_PAGE_SIZE: u64 = 1000;

/// Totals for a completed [`fetch_documents`](IdibonClient::fetch_documents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Requests issued.
    pub pages: usize,
    /// Documents delivered to the callback.
    pub documents: usize,
}

/// Mutable request state carried between pages.
#[derive(Debug)]
struct PageCursor {
    query: Map<String, Value>,
    cursor: Value,
    start: u64,
    page_size: u64,
}

impl PageCursor {
    fn new(options: Option<&DocumentQueryOptions>) -> Result<Self, ApiError> {
        let (query, start, page_size) = match options {
            Some(options) => {
                let query = match serde_json::to_value(options).map_err(ClientError::Serialize)? {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                (
                    query,
                    options.start.unwrap_or(0),
                    options.count.unwrap_or(DEFAULT_PAGE_SIZE),
                )
            }
            None => (Map::new(), 0, DEFAULT_PAGE_SIZE),
        };

        Ok(Self {
            query,
            cursor: Value::Null,
            start,
            page_size,
        })
    }

    /// The request body for the next page.
    fn body(&self) -> Value {
        let mut body = self.query.clone();
        body.insert("cursor".to_string(), self.cursor.clone());
        body.insert("start".to_string(), Value::from(self.start));
        Value::Object(body)
    }

    /// Records a page response. Returns `true` while another page follows.
    fn advance(&mut self, response: &Value) -> bool {
        self.cursor = response.get("cursor").cloned().unwrap_or(Value::Null);
        self.start = self.start.saturating_add(self.page_size);
        matches!(&self.cursor, Value::String(cursor) if !cursor.is_empty())
    }
}

impl IdibonClient {
    /// Streams every document of `collection` to `on_item`, one page at a
    /// time.
    ///
    /// Each request carries the query fields plus the current `cursor`
    /// (`null` for the first page) and `start` offset. After each page the
    /// cursor is taken from the response and `start` advances by the page
    /// size; the loop continues while the response cursor is a non-empty
    /// string. Pages are strictly sequential: all items of a page are
    /// delivered before the next page is requested.
    ///
    /// ## Errors
    ///
    /// On a failed request, `on_item` receives the error once, the loop stops
    /// and the error is returned. Documents already delivered stay delivered.
    /// The failed page's parsed body, if any, is reachable through
    /// [`ApiError::response_body`], and an unparseable one through
    /// [`ResponseError::raw_body`](crate::ResponseError::raw_body).
    pub async fn fetch_documents<F>(
        &self,
        collection: &str,
        options: Option<&DocumentQueryOptions>,
        mut on_item: F,
    ) -> Result<FetchSummary, ApiError>
    where
        F: FnMut(Result<Value, &ApiError>),
    {
        let path = encode_path("/%s/*", &[collection])?;
        let mut state = PageCursor::new(options)?;
        let mut summary = FetchSummary::default();

        loop {
            let response = match self
                .call_api(RestMethod::Get, &path, Some(&state.body()))
                .await
            {
                Ok(response) => response,
                Err(err) => {
                    on_item(Err(&err));
                    return Err(err);
                }
            };

            summary.pages += 1;
            let more = state.advance(&response);

            let documents = match response {
                Value::Object(mut body) => match body.remove("documents") {
                    Some(Value::Array(documents)) => documents,
                    _ => Vec::new(),
                },
                _ => Vec::new(),
            };

            debug!(
                page = summary.pages,
                items = documents.len(),
                has_cursor = more,
                "fetched document page"
            );

            summary.documents += documents.len();
            for document in documents {
                on_item(Ok(document));
            }

            if !more {
                break;
            }
        }

        info!(
            collection,
            pages = summary.pages,
            documents = summary.documents,
            "document fetch complete"
        );
        Ok(summary)
    }
}
