//! Resource directory clients.
//!
//! The registrar talks to the directory through the [`DirectoryClient`] trait.
//! [`HttpDirectoryClient`] is the production implementation; tests substitute
//! in-memory clients.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use std::time::Duration;
use tracing::debug;

use super::descriptor::RegistrationDescriptor;
use super::error::{DirectoryError, DirectoryResult};
use crate::domains::resources::{Link, link::parse_links};

/// Well-known discovery path of a directory authority.
pub const DISCOVERY_PATH: &str = "/.well-known/core";

/// Registration path of a directory authority.
pub const REGISTRATION_PATH: &str = "/rd";

/// Media type of registration bodies and discovery listings.
pub const LINK_FORMAT_MEDIA_TYPE: &str = "application/link-format";

/// The directory's answer to a registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationResponse {
    /// Status code returned by the directory.
    pub status: u16,

    /// Where the directory now hosts the registration, if it said so.
    pub location: Option<String>,
}

impl RegistrationResponse {
    /// Whether the directory accepted the registration.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The directory's answer to a discovery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// The parsed link-format listing.
    Listing(Vec<Link>),

    /// The directory was reached but answered with a non-success status.
    UnexpectedStatus { status: u16 },
}

/// Parse a discovery body, reporting unparsable listings as malformed.
pub fn parse_listing(body: &str) -> DirectoryResult<Vec<Link>> {
    parse_links(body).map_err(|e| DirectoryError::malformed(e.to_string()))
}

/// Request/response access to a directory authority.
///
/// Each call is one exchange bounded by the client's own timeout. Errors are
/// transport-level faults; a rejected registration is a successful exchange
/// carrying a non-success status.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch and parse the directory's link-format listing.
    async fn discover(&self) -> DirectoryResult<DiscoveryOutcome>;

    /// Submit one registration descriptor.
    async fn register(
        &self,
        descriptor: &RegistrationDescriptor,
    ) -> DirectoryResult<RegistrationResponse>;
}

/// Directory client speaking HTTP.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: reqwest::Client,
    base: Url,
}

impl HttpDirectoryClient {
    /// Create a client for the directory at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> DirectoryResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| DirectoryError::invalid_address(base_url, e.to_string()))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(DirectoryError::invalid_address(
                base_url,
                "expected an http or https URL",
            ));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// The directory's base URL.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append `path` to the base URL, keeping any base path prefix.
    fn url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let prefix = self.base.path().trim_end_matches('/');
        url.set_path(&format!("{}{}", prefix, path));
        url.set_query(None);
        url
    }
}

/// Classify a failed exchange: connection and timeout failures mean the
/// directory could not be reached at all.
fn request_error(error: reqwest::Error) -> DirectoryError {
    if error.is_connect() || error.is_timeout() {
        DirectoryError::unreachable(error.to_string())
    } else {
        DirectoryError::Request(error)
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn discover(&self) -> DirectoryResult<DiscoveryOutcome> {
        let url = self.url(DISCOVERY_PATH);
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Ok(DiscoveryOutcome::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(request_error)?;
        Ok(DiscoveryOutcome::Listing(parse_listing(&body)?))
    }

    async fn register(
        &self,
        descriptor: &RegistrationDescriptor,
    ) -> DirectoryResult<RegistrationResponse> {
        let url = self.url(REGISTRATION_PATH);
        let endpoint = descriptor.endpoint();
        debug!("POST {}?ep={}", url, endpoint);

        let response = self
            .client
            .post(url)
            .query(&[("ep", endpoint.as_str())])
            .header(CONTENT_TYPE, LINK_FORMAT_MEDIA_TYPE)
            .body(descriptor.to_link_format())
            .send()
            .await
            .map_err(request_error)?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(RegistrationResponse {
            status: response.status().as_u16(),
            location,
        })
    }
}
