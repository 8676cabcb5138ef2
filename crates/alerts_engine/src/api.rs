use std::sync::Arc;

use alerts_core::{LookupResponse, SearchResult};
use alerts_logging::alert_warn;
use serde_json::from_slice;
use url::Url;

use crate::fetch::Fetcher;
use crate::{FailureKind, FetchError};

pub const DEFAULT_API_BASE: &str = "https://functions.zacharyseguin.ca/function";

const LOOKUP_ENDPOINT: &str = "cap-get";
const SEARCH_ENDPOINT: &str = "cap-search";

/// Locations of the lookup and search functions under one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base: Url,
}

impl ApiEndpoints {
    pub fn new(base: Url) -> Result<Self, FetchError> {
        if base.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{base} cannot be used as an API base"),
            ));
        }
        Ok(Self { base })
    }

    pub fn parse(base: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Self::new(base)
    }

    /// `<base>/cap-get?id=<alert_id>`
    pub fn lookup_url(&self, alert_id: &str) -> Url {
        let mut url = self.endpoint(LOOKUP_ENDPOINT);
        url.query_pairs_mut().append_pair("id", alert_id);
        url
    }

    /// `<base>/cap-search?<query>`, without `?` when the query is empty.
    pub fn search_url(&self, query: &str) -> Url {
        let mut url = self.endpoint(SEARCH_ENDPOINT);
        url.set_query((!query.is_empty()).then_some(query));
        url
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }
}

/// Typed access to the CAP lookup and search functions.
#[derive(Clone)]
pub struct CapClient {
    endpoints: ApiEndpoints,
    fetcher: Arc<dyn Fetcher>,
}

impl CapClient {
    pub fn new(endpoints: ApiEndpoints, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { endpoints, fetcher }
    }

    pub async fn lookup(&self, alert_id: &str) -> Result<LookupResponse, FetchError> {
        let url = self.endpoints.lookup_url(alert_id);
        self.get_json(&url).await
    }

    pub async fn search(&self, query: &str) -> Result<SearchResult, FetchError> {
        let url = self.endpoints.search_url(query);
        self.get_json(&url).await
    }

    async fn get_json<T>(&self, url: &Url) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let output = self.fetcher.fetch(url.as_str()).await?;
        from_slice(&output.bytes).map_err(|err| {
            alert_warn!("undecodable body from {}: {}", url, err);
            FetchError::new(FailureKind::Decode, err.to_string())
        })
    }
}
