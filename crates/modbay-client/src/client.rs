//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

use crate::api::{ConversationsApi, HealthApi, LicensesApi, MessagesApi, UpdatesApi};
use crate::auth::{AuthToken, TokenKind};
use crate::envelope::{Envelope, EnvelopeError, RawEnvelope};
use crate::error::{Error, Result};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.modbay.io/";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API secret for [`ModbayClient::from_env`].
const ENV_TOKEN: &str = "MODBAY_TOKEN";

/// Environment variable selecting the token kind for [`ModbayClient::from_env`].
const ENV_TOKEN_KIND: &str = "MODBAY_TOKEN_KIND";

/// Modbay API client.
///
/// Provides typed access to the Modbay marketplace endpoints. Every call
/// resolves to an [`Envelope`] mirroring the server's verdict; transport
/// faults surface as [`Error`] instead.
///
/// The client is cheap to clone and safe to share: all configuration is
/// fixed at build time, so concurrent calls on one instance need no
/// locking.
///
/// # Example
///
/// ```no_run
/// use modbay_client::{ModbayClient, TokenKind};
///
/// # async fn example() -> modbay_client::Result<()> {
/// let client = ModbayClient::new(TokenKind::Private, "secret")?;
///
/// let health = client.health().check().await?;
/// if health.is_success() {
///     let conversations = client.conversations().unread().await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ModbayClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client. Carries the auth header for every request.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests.
    pub(crate) base_url: Url,
    /// Request timeout.
    pub(crate) timeout: Duration,
    /// Kind of the credential the client was built with.
    pub(crate) token_kind: TokenKind,
}

impl ModbayClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the production API from a token kind and secret.
    pub fn new(kind: TokenKind, secret: impl Into<String>) -> Result<Self> {
        Self::builder().token(kind, secret).build()
    }

    /// Create a client from the environment.
    ///
    /// Reads the secret from `MODBAY_TOKEN` and the kind from
    /// `MODBAY_TOKEN_KIND` (`public` or `private`, defaulting to private
    /// when unset).
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var(ENV_TOKEN)
            .map_err(|_| Error::Config(format!("{} is not set", ENV_TOKEN)))?;
        let kind = match std::env::var(ENV_TOKEN_KIND) {
            Ok(value) => value.parse()?,
            Err(_) => TokenKind::Private,
        };
        Self::builder().token(kind, secret).build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Kind of the credential this client signs requests with.
    pub fn token_kind(&self) -> TokenKind {
        self.inner.token_kind
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the conversations API.
    pub fn conversations(&self) -> ConversationsApi {
        ConversationsApi::new(self.clone())
    }

    /// Access the messages API.
    pub fn messages(&self) -> MessagesApi {
        MessagesApi::new(self.clone())
    }

    /// Access the licenses API.
    pub fn licenses(&self) -> LicensesApi {
        LicensesApi::new(self.clone())
    }

    /// Access the updates API.
    pub fn updates(&self) -> UpdatesApi {
        UpdatesApi::new(self.clone())
    }

    /// Access the health API.
    pub fn health(&self) -> HealthApi {
        HealthApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner
            .base_url
            .join(&format!("v1/{}", path))
            .map_err(Error::from)
    }

    /// Make a GET request expecting a payload-carrying envelope.
    pub(crate) async fn get<T>(&self, path: &str) -> Result<Envelope<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.url(path)?;
        self.execute(self.inner.http.get(url)).await
    }

    /// Make a GET request, substituting `T::default()` when the server
    /// sends a success with absent or `null` data.
    pub(crate) async fn get_or_default<T>(&self, path: &str) -> Result<Envelope<T>>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let url = self.url(path)?;
        self.execute_or_default(self.inner.http.get(url)).await
    }

    /// Make a GET request with query parameters, defaulting absent data.
    pub(crate) async fn get_with_query_or_default<T, Q>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Envelope<T>>
    where
        T: serde::de::DeserializeOwned + Default,
        Q: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.execute_or_default(self.inner.http.get(url).query(query))
            .await
    }

    /// Make a POST request expecting a payload-carrying envelope.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.execute(self.inner.http.post(url).json(body)).await
    }

    /// Make a POST request whose success carries no payload.
    pub(crate) async fn post_or_default<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>>
    where
        T: serde::de::DeserializeOwned + Default,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.execute_or_default(self.inner.http.post(url).json(body))
            .await
    }

    /// Make a PATCH request whose success carries no payload.
    pub(crate) async fn patch_or_default<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>>
    where
        T: serde::de::DeserializeOwned + Default,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.execute_or_default(self.inner.http.patch(url).json(body))
            .await
    }

    /// Send a request and parse the body as a strict envelope.
    async fn execute<T>(&self, request: reqwest::RequestBuilder) -> Result<Envelope<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let (status, raw) = self.read_raw(request).await?;
        Envelope::from_raw(raw).map_err(|e| envelope_error(status, e))
    }

    /// Send a request and parse the body as an envelope, defaulting absent
    /// success data.
    async fn execute_or_default<T>(&self, request: reqwest::RequestBuilder) -> Result<Envelope<T>>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let (status, raw) = self.read_raw(request).await?;
        Envelope::from_raw_or_default(raw).map_err(|e| envelope_error(status, e))
    }

    /// Send a request and deserialize the response body into the raw
    /// envelope shape.
    ///
    /// The HTTP status never decides success or failure here: the envelope's
    /// `result` field is authoritative, so a 4xx/5xx with a well-formed
    /// failure envelope parses cleanly. The status only annotates the error
    /// when the body cannot be parsed at all.
    async fn read_raw<T>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, RawEnvelope<T>)>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = request.timeout(self.inner.timeout).build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "sending API request");

        let response = self.inner.http.execute(request).await?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "received API response");

        let body = response.text().await?;
        let raw = serde_json::from_str(&body).map_err(|e| Error::protocol(status, e))?;
        Ok((status, raw))
    }
}

/// Build the protocol error for an envelope that parsed but broke the
/// success/failure contract.
fn envelope_error(status: StatusCode, err: EnvelopeError) -> Error {
    tracing::debug!(status = status.as_u16(), error = %err, "response violated the envelope contract");
    Error::protocol(status, err)
}

/// Builder for creating a ModbayClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    token: Option<AuthToken>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the base URL. Defaults to the production API endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the credential from a token kind and secret.
    pub fn token(mut self, kind: TokenKind, secret: impl Into<String>) -> Self {
        self.token = Some(AuthToken::new(kind, secret));
        self
    }

    /// Set the credential from an existing [`AuthToken`].
    pub fn auth_token(mut self, token: AuthToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ModbayClient> {
        let token = self
            .token
            .ok_or_else(|| Error::Config("auth token is required".to_string()))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut auth_value = HeaderValue::from_str(&token.header_value())
            .map_err(|_| Error::Config("auth secret contains invalid header characters".to_string()))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        // Build HTTP client
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("modbay-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(ModbayClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                token_kind: token.kind(),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
