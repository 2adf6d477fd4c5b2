use crate::credentials::{parse_credentials, SPREADSHEETS_SCOPE};
use crate::error::{SheetsError, SheetsResult};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

/// Something that can hand out a bearer token for the Sheets API.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> SheetsResult<String>;
}

/// A fixed, pre-issued token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(..)")
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> SheetsResult<String> {
        Ok(self.0.clone())
    }
}

type TokenFetcher = Box<dyn Fn() -> BoxFuture<'static, SheetsResult<String>> + Send + Sync>;

/// Service-account token source.
///
/// The OAuth authenticator is built on the first call to
/// [`access_token`](TokenSource::access_token) and shared by every request
/// afterwards; it caches tokens and refreshes them before expiry.
pub struct ServiceAccountTokens {
    key: ServiceAccountKey,
    fetcher: OnceCell<TokenFetcher>,
}

impl ServiceAccountTokens {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            fetcher: OnceCell::new(),
        }
    }

    /// Build from the JSON-encoded key.
    pub fn from_json(json: &str) -> SheetsResult<Self> {
        parse_credentials(json).map(Self::new)
    }

    /// Service account the tokens are issued for.
    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// True once the authenticator has been built.
    pub fn is_initialized(&self) -> bool {
        self.fetcher.initialized()
    }
}

impl fmt::Debug for ServiceAccountTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountTokens")
            .field("client_email", &self.key.client_email)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokens {
    async fn access_token(&self) -> SheetsResult<String> {
        let fetch = self
            .fetcher
            .get_or_try_init(|| build_fetcher(self.key.clone()))
            .await?;
        fetch().await
    }
}

async fn build_fetcher(key: ServiceAccountKey) -> SheetsResult<TokenFetcher> {
    tracing::info!(client_email = %key.client_email, "building service account authenticator");
    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| SheetsError::Auth(e.to_string()))?;
    let auth = Arc::new(auth);

    Ok(Box::new(move || {
        let auth = Arc::clone(&auth);
        Box::pin(async move {
            let token = auth
                .token(&[SPREADSHEETS_SCOPE])
                .await
                .map_err(|e| SheetsError::Auth(e.to_string()))?;
            token
                .token()
                .map(str::to_owned)
                .ok_or_else(|| SheetsError::Auth("token response had no access token".to_string()))
        })
    }))
}
