// # HTTP Range Source
//
// This crate provides an HTTP-based range source for the IP-range refresh
// cache.
//
// ## Purpose
//
// Fetches lists of CIDR range expressions from one or more HTTP(S) endpoints,
// one per address family. Each endpoint is expected to return a JSON array of
// strings, e.g. `["1.2.3.0/24", "5.6.7.8"]` — the bunny.net edge server list
// format.
//
// ## Responsibility Boundary
//
// This crate only performs the outward calls and returns raw expressions in
// endpoint order. Parsing, validation, scheduling and caching all live in
// `iprange-core`; in particular the all-or-nothing parse policy is enforced
// there, not here.

use async_trait::async_trait;
use iprange_core::{Error, RangeSource, Result};
use tracing::debug;

/// bunny.net edge server list, IPv4
pub const BUNNY_EDGE_IPV4_URL: &str = "https://api.bunny.net/system/edgeserverlist";

/// bunny.net edge server list, IPv6
pub const BUNNY_EDGE_IPV6_URL: &str = "https://api.bunny.net/system/edgeserverlist/ipv6";

/// HTTP-based range source
///
/// Queries a fixed set of endpoints in order and concatenates their entries,
/// preserving order. Any endpoint failure fails the whole fetch; the caller's
/// refresh cycle treats that as a transient error.
pub struct HttpRangeSource {
    /// Endpoints to query, in order
    urls: Vec<String>,

    /// HTTP client (connection pooling, TLS)
    client: reqwest::Client,
}

impl HttpRangeSource {
    /// Create a source querying the given endpoints
    pub fn new(urls: Vec<String>) -> Self {
        Self::with_client(urls, reqwest::Client::new())
    }

    /// Create a source with a caller-supplied client
    ///
    /// Note that a client-level timeout stacks with the cache's per-fetch
    /// deadline; leave the client unbounded if the cache owns the deadline.
    pub fn with_client(urls: Vec<String>, client: reqwest::Client) -> Self {
        Self { urls, client }
    }

    /// Source for the bunny.net edge server lists, both address families
    pub fn bunny_edge_list() -> Self {
        Self::new(vec![
            BUNNY_EDGE_IPV4_URL.to_string(),
            BUNNY_EDGE_IPV6_URL.to_string(),
        ])
    }

    /// The endpoints this source queries
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    async fn fetch_one(&self, url: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::source(format!("request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::source(format!(
                "{url} returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::source(format!("failed to read response from {url}: {e}")))?;

        let entries: Vec<String> = serde_json::from_str(&body)
            .map_err(|e| Error::source(format!("{url} returned invalid JSON: {e}")))?;

        debug!(url, entries = entries.len(), "fetched range list");
        Ok(entries)
    }
}

#[async_trait]
impl RangeSource for HttpRangeSource {
    async fn fetch_ranges(&self) -> Result<Vec<String>> {
        let mut ranges = Vec::new();
        for url in &self.urls {
            ranges.extend(self.fetch_one(url).await?);
        }
        Ok(ranges)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
