//! HTTP client for the auto-api.com car listings API.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    query::{OffersQuery, Query},
    types::{ChangeIdResponse, ChangesResponse, OffersResponse},
    Error,
};

/// Production endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api1.auto-api.com";
/// API version segment used by every GET endpoint unless overridden.
pub const DEFAULT_API_VERSION: &str = "v2";
/// Request timeout for the HTTP client the `Client` builds for itself.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum number of body characters quoted in decode errors and logs.
const BODY_SNIPPET_CHARS: usize = 200;

const USER_AGENT: &str = concat!("auto_api/", env!("CARGO_PKG_VERSION"));

/// Client for the auto-api.com API.
///
/// GET endpoints authenticate with an `api_key` query parameter, the
/// offer-by-URL lookup with an `x-api-key` header. Every call is a single
/// attempt; retry policy belongs to the caller.
///
/// The client is cheap to share: calls only read its configuration and the
/// underlying `reqwest::Client`, so wrap it in an `Arc` and issue requests
/// concurrently.
pub struct Client {
    http: reqwest::Client,
    /// Whether `http` was built by this client rather than handed in.
    owns_http: bool,
    api_key: String,
    base_url: Url,
    api_version: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("owns_http", &self.owns_http)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`], obtained from [`Client::builder`].
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    api_version: String,
    timeout: Duration,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Overrides the API host. A trailing slash is ignored.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Overrides the version segment of GET endpoints (`v2` by default).
    pub fn api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.to_string();
        self
    }

    /// Request timeout of the HTTP client built by [`ClientBuilder::build`].
    /// Ignored when an external client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Uses an existing `reqwest::Client` instead of building one.
    ///
    /// The caller keeps ownership: closing or dropping the [`Client`] never
    /// shuts the supplied client down.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let trimmed = self.base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", trimmed, e);
            Error::InvalidBaseUrl(format!("{}: {}", trimmed, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(trimmed.to_string()));
        }

        let (http, owns_http) = match self.http_client {
            Some(http) => (http, false),
            None => {
                let http = reqwest::Client::builder()
                    .user_agent(USER_AGENT)
                    .timeout(self.timeout)
                    .build()
                    .map_err(|e| {
                        tracing::error!("Failed to build HTTP client: {}", e);
                        Error::Transport(e)
                    })?;
                (http, true)
            }
        };

        Ok(Client {
            http,
            owns_http,
            api_key: self.api_key,
            base_url,
            api_version: self.api_version,
        })
    }
}

#[derive(Serialize)]
struct OfferInfoRequest<'a> {
    url: &'a str,
}

impl Client {
    /// Creates a client for the production API with default settings.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Self::builder(api_key).base_url(base_url).build()
    }

    pub fn builder(api_key: &str) -> ClientBuilder {
        ClientBuilder {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: REQUEST_TIMEOUT,
            http_client: None,
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// True when the HTTP client was built by this client and is released with it.
    pub fn owns_transport(&self) -> bool {
        self.owns_http
    }

    /// Releases the client. An HTTP client built by [`ClientBuilder::build`]
    /// is shut down with it; one supplied through
    /// [`ClientBuilder::http_client`] stays usable by its owner.
    ///
    /// Equivalent to dropping the client: `reqwest::Client` is reference
    /// counted and its connection pool goes away with the last handle.
    pub fn close(self) {
        if self.owns_http {
            tracing::debug!("Releasing owned HTTP client");
        } else {
            tracing::debug!("Leaving externally supplied HTTP client open");
        }
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn source_url(&self, source: &str, endpoint: &str) -> Result<Url, Error> {
        self.endpoint_url(&["api", self.api_version.as_str(), source, endpoint])
    }

    async fn get<T>(&self, mut url: Url) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("GET {}", url.path());
        url.query_pairs_mut().append_pair("api_key", &self.api_key);

        let resp = self.http.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to get resource: {}", e);
            Error::Transport(e)
        })?;

        handle_response(resp).await
    }

    async fn post<T, B>(&self, url: Url, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::debug!("POST {}", url.path());

        let resp = self
            .http
            .post(url)
            .header("x-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Failed to post resource: {}", e);
                Error::Transport(e)
            })?;

        handle_response(resp).await
    }

    /// Fetches the filter metadata (brands, models, body types, ...) of a source.
    ///
    /// The shape differs per source, so the raw JSON is returned.
    pub async fn get_filters(&self, source: &str) -> Result<serde_json::Value, Error> {
        let url = self.source_url(source, "filters")?;
        self.get(url).await
    }

    /// Fetches a page of offers.
    ///
    /// Without a query only the API key is sent and the API picks its default
    /// page. With a query, `page` is always sent along with the filters that
    /// are set.
    pub async fn get_offers(
        &self,
        source: &str,
        query: Option<&OffersQuery>,
    ) -> Result<OffersResponse, Error> {
        let url = self.source_url(source, "offers")?;
        let url = match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        };
        self.get(url).await
    }

    /// Fetches a single offer by the marketplace's own identifier.
    pub async fn get_offer(&self, source: &str, inner_id: &str) -> Result<OffersResponse, Error> {
        let mut url = self.source_url(source, "offer")?;
        url.query_pairs_mut().append_pair("inner_id", inner_id);
        self.get(url).await
    }

    /// Returns the change feed cursor for a date formatted as `yyyy-mm-dd`.
    ///
    /// The date is passed through as is. `0` is a valid cursor.
    pub async fn get_change_id(&self, source: &str, date: &str) -> Result<i64, Error> {
        let mut url = self.source_url(source, "change_id")?;
        url.query_pairs_mut().append_pair("date", date);
        let resp: ChangeIdResponse = self.get(url).await?;
        Ok(resp.change_id)
    }

    /// Same as [`Client::get_change_id`] for a calendar date.
    pub async fn get_change_id_on(&self, source: &str, date: NaiveDate) -> Result<i64, Error> {
        let date_str = date.format("%Y-%m-%d").to_string();
        self.get_change_id(source, &date_str).await
    }

    /// Fetches the batch of change events starting at `change_id`.
    pub async fn get_changes(&self, source: &str, change_id: i64) -> Result<ChangesResponse, Error> {
        let mut url = self.source_url(source, "changes")?;
        url.query_pairs_mut()
            .append_pair("change_id", &change_id.to_string());
        self.get(url).await
    }

    /// Resolves an offer from its marketplace URL.
    ///
    /// Always served by the v1 API, whatever version the client is configured
    /// with. The key travels in the `x-api-key` header only.
    pub async fn get_offer_by_url(&self, offer_url: &str) -> Result<serde_json::Value, Error> {
        let url = self.endpoint_url(&["api", "v1", "offer", "info"])?;
        self.post(url, &OfferInfoRequest { url: offer_url }).await
    }
}

/// Runs `call` until it completes or `signal` resolves, whichever is first.
///
/// On cancellation the call future is dropped, which aborts its in-flight
/// request, and [`Error::Cancelled`] is returned.
///
/// ```no_run
/// # async fn run(client: auto_api::Client) -> Result<(), auto_api::Error> {
/// let (cancel, cancelled) = tokio::sync::oneshot::channel::<()>();
/// let filters = auto_api::cancellable(client.get_filters("encar"), async {
///     let _ = cancelled.await;
/// });
/// drop(cancel);
/// assert!(filters.await.unwrap_err().is_cancelled());
/// # Ok(())
/// # }
/// ```
pub async fn cancellable<T, F, S>(call: F, signal: S) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
    S: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = signal => {
            tracing::debug!("Request cancelled by caller");
            Err(Error::Cancelled)
        }
        result = call => result,
    }
}

async fn handle_response<T>(resp: reqwest::Response) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let status = resp.status();
    let body = resp.text().await.map_err(|e| {
        let e = e.without_url();
        tracing::error!("Failed to read response body: {}", e);
        Error::Transport(e)
    })?;

    if !status.is_success() {
        let message =
            error_message(&body).unwrap_or_else(|| format!("API error: {}", status.as_u16()));
        tracing::error!(
            "Request failed with status {}: {}",
            status,
            truncate_body(&body)
        );
        return Err(Error::from_status(status.as_u16(), message, body));
    }

    serde_json::from_str::<T>(&body).map_err(|e| {
        let snippet = truncate_body(&body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::Api {
            status: status.as_u16(),
            message: format!("Invalid JSON response: {}", snippet),
            body,
        }
    })
}

/// Extracts the string `message` field of an error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

fn truncate_body(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}
