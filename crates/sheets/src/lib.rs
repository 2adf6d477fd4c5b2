//! # rollcall-sheets
//!
//! Client for the Google Sheets v4 values API.
//!
//! This crate provides:
//! - service-account credential parsing and OAuth token sources
//! - the [`RangeClient`] trait: read a rectangular range, write a batch of
//!   single-cell updates
//! - [`SheetsClient`], the reqwest-backed implementation of that trait

/// HTTP client and the range client trait.
pub mod client;
/// Service-account credentials.
pub mod credentials;
/// Error types and result aliases.
pub mod error;
/// In-memory range client for tests (`test-util` feature).
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
/// OAuth access token sources.
pub mod token;

pub use client::{CellUpdate, ClientOptions, RangeClient, Rows, SheetsClient};
pub use credentials::{parse_credentials, SPREADSHEETS_SCOPE};
pub use error::{SheetsError, SheetsResult};
#[cfg(any(test, feature = "test-util"))]
pub use memory::{MemoryRangeClient, RecordedCall};
pub use token::{ServiceAccountTokens, StaticToken, TokenSource};

/// Re-export of the primitives every caller of this crate needs.
pub use rollcall_primitives::{CellAddress, CellRange, SheetRange};
