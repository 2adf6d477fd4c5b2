//! Range reads and batch writes against the Google Sheets v4 values API.

use crate::error::{SheetsError, SheetsResult};
use crate::token::TokenSource;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use rollcall_primitives::SheetRange;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Rows of cells as returned by the API. Trailing empty cells and rows are
/// absent, not empty strings.
pub type Rows = Vec<Vec<Value>>;

/// Default base URL of the Sheets REST API.
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4/";

/// A write of one value into one cell. Strings, numbers and booleans are
/// sent as JSON as-is; the sheet parses them as typed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub range: SheetRange,
    pub value: Value,
}

impl CellUpdate {
    pub fn new(range: SheetRange, value: impl Into<Value>) -> Self {
        Self {
            range,
            value: value.into(),
        }
    }
}

/// Access to cell ranges of one spreadsheet document.
#[async_trait]
pub trait RangeClient: Send + Sync {
    /// Read a rectangular range as rows of cells.
    async fn read_range(&self, range: &SheetRange) -> SheetsResult<Rows>;

    /// Write every update in one request, with values interpreted as if typed
    /// by a user. Returns the number of cells the backend reports as updated.
    async fn batch_write(&self, updates: &[CellUpdate]) -> SheetsResult<usize>;
}

/// Options for [`SheetsClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: 30,
        }
    }
}

/// HTTP client for one spreadsheet document.
pub struct SheetsClient {
    client: Client,
    base: Url,
    spreadsheet_id: String,
    tokens: Arc<dyn TokenSource>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Rows,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateRequest<'a> {
    value_input_option: &'static str,
    data: Vec<BatchUpdateData<'a>>,
}

#[derive(Debug, Serialize)]
struct BatchUpdateData<'a> {
    range: String,
    values: [[&'a Value; 1]; 1],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateResponse {
    #[serde(default)]
    total_updated_cells: usize,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl SheetsClient {
    /// Constructs a client for `spreadsheet_id` with the default API base and
    /// a 30-second timeout.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::Http` if building the underlying HTTP client fails.
    pub fn new(
        spreadsheet_id: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> SheetsResult<Self> {
        Self::with_options(spreadsheet_id, tokens, ClientOptions::default())
    }

    /// Constructs a client with explicit options.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::Http` if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn with_options(
        spreadsheet_id: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
        options: ClientOptions,
    ) -> SheetsResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()?;

        let base = Url::parse(&options.base_url)
            .map_err(|e| SheetsError::Http(format!("invalid API base URL: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(SheetsError::Http(format!(
                "invalid API base URL: {}",
                options.base_url
            )));
        }

        Ok(Self {
            client,
            base,
            spreadsheet_id: spreadsheet_id.into(),
            tokens,
        })
    }

    /// Identifier of the spreadsheet document this client addresses.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// `<base>/spreadsheets/<id>/<segments..>`, each segment percent-encoded
    /// on its own so a range like `'Lớp 6'!B5:B50` stays one segment.
    fn document_url(&self, segments: &[&str]) -> SheetsResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| SheetsError::Http(format!("invalid API base URL: {}", self.base)))?
            .pop_if_empty()
            .extend(["spreadsheets", self.spreadsheet_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn check(response: Response) -> SheetsResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| {
                format!(
                    "HTTP {} - {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )
            });
        Err(SheetsError::api(status.as_u16(), message))
    }
}

#[async_trait]
impl RangeClient for SheetsClient {
    async fn read_range(&self, range: &SheetRange) -> SheetsResult<Rows> {
        let a1 = range.to_a1();
        let url = self.document_url(&["values", &a1])?;
        let token = self.tokens.access_token().await?;

        tracing::debug!(range = %a1, "reading range");
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[("majorDimension", "ROWS")])
            .send()
            .await?;

        let body: ValueRange = Self::check(response).await?.json().await?;
        tracing::debug!(range = %a1, rows = body.values.len(), "range read");
        Ok(body.values)
    }

    async fn batch_write(&self, updates: &[CellUpdate]) -> SheetsResult<usize> {
        let url = self.document_url(&["values:batchUpdate"])?;
        let token = self.tokens.access_token().await?;

        let request = BatchUpdateRequest {
            value_input_option: "USER_ENTERED",
            data: updates
                .iter()
                .map(|update| BatchUpdateData {
                    range: update.range.to_a1(),
                    values: [[&update.value]],
                })
                .collect(),
        };

        tracing::debug!(cells = updates.len(), "writing batch");
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let body: BatchUpdateResponse = Self::check(response).await?.json().await?;
        tracing::debug!(updated = body.total_updated_cells, "batch written");
        Ok(body.total_updated_cells)
    }
}
