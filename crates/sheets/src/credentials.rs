use crate::error::{SheetsError, SheetsResult};
use yup_oauth2::ServiceAccountKey;

/// OAuth scope granting read/write access to spreadsheets.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Parse a JSON-encoded service-account key (the file Google hands out, as a
/// string).
pub fn parse_credentials(json: &str) -> SheetsResult<ServiceAccountKey> {
    if json.trim().is_empty() {
        return Err(SheetsError::Credentials(
            "service account JSON is empty".to_string(),
        ));
    }
    yup_oauth2::parse_service_account_key(json).map_err(|e| SheetsError::Credentials(e.to_string()))
}
