//! Command-line and environment configuration.

use clap::Parser;
use rollcall_sheets::client::DEFAULT_API_BASE;
use rollcall_sheets::{ClientOptions, ServiceAccountTokens, SheetsClient, SheetsResult};
use std::net::SocketAddr;
use std::sync::Arc;

/// Spreadsheet holding the attendance tabs.
pub const DEFAULT_SPREADSHEET_ID: &str = "1HRPzyWjgxLh_JLyM0EHs7scenOwMhzGOFlZnYf_CnpM";

/// rollcall-server - attendance API over a Google spreadsheet
#[derive(Parser)]
#[command(name = "rollcall-server")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "ROLLCALL_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Spreadsheet document id
    #[arg(long, env = "ROLLCALL_SPREADSHEET_ID", default_value = DEFAULT_SPREADSHEET_ID)]
    pub spreadsheet_id: String,

    /// Service-account key, JSON-encoded
    #[arg(long, env = "GOOGLE_CREDENTIALS", hide_env_values = true)]
    pub credentials: String,

    /// Timeout for each Sheets API request, in seconds
    #[arg(long, env = "ROLLCALL_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Base URL of the Sheets REST API
    #[arg(long, env = "ROLLCALL_SHEETS_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

impl Config {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.api_base.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Parse the credentials and build the Sheets client. No network traffic
    /// happens until the first request.
    pub fn build_client(&self) -> SheetsResult<SheetsClient> {
        let tokens = ServiceAccountTokens::from_json(&self.credentials)?;
        tracing::info!(client_email = tokens.client_email(), "loaded service account");
        SheetsClient::with_options(
            self.spreadsheet_id.clone(),
            Arc::new(tokens),
            self.client_options(),
        )
    }
}
