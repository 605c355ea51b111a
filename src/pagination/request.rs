//! Request construction
//!
//! Everything about a request that does not change between pages is
//! resolved once, when the paginator is created. Per page only the offset,
//! the count and the session token vary.

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use url::Url;

/// Subscription key header
pub const API_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
/// Session affinity header, sent and received
pub const CLIENT_ID_HEADER: &str = "X-MSEdge-ClientID";
/// Client IP hint header
pub const CLIENT_IP_HEADER: &str = "X-MSEdge-ClientIP";
/// Client location hint header
pub const LOCATION_HEADER: &str = "X-Search-Location";

const ACCEPT_JSON: &str = "application/json";

/// Ordered query parameters where a later `set` replaces in place
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub(crate) fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub(crate) fn set_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Pre-validated request parts for one run
#[derive(Debug, Clone)]
pub(crate) struct RequestTemplate {
    endpoint: Url,
    filters: QueryParams,
    extra_params: QueryParams,
    headers: HeaderMap,
    extra_headers: HeaderMap,
}

impl RequestTemplate {
    pub(crate) fn new(config: &SearchConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| Error::invalid_value("endpoint", e.to_string()))?;

        let mut filters = QueryParams::default();
        filters.set("q", &config.query);
        filters.set_opt("mkt", config.market.as_ref());
        filters.set_opt("safeSearch", config.safe_search);
        filters.set_opt("aspect", config.aspect);
        filters.set_opt("color", config.color);
        filters.set_opt("imageContent", config.image_content);
        filters.set_opt("imageType", config.image_type);
        filters.set_opt("license", config.license);
        filters.set_opt("freshness", config.freshness);
        filters.set_opt("size", config.size);
        filters.set_opt("width", config.width);
        filters.set_opt("height", config.height);
        filters.set_opt("minWidth", config.min_width);
        filters.set_opt("minHeight", config.min_height);
        filters.set_opt("maxWidth", config.max_width);
        filters.set_opt("maxHeight", config.max_height);
        filters.set_opt("minFileSize", config.min_file_size);
        filters.set_opt("maxFileSize", config.max_file_size);

        let mut extra_params = QueryParams::default();
        for (key, value) in &config.query_params {
            extra_params.set(key.as_str(), value);
        }

        let mut headers = HeaderMap::new();
        insert_header(&mut headers, API_KEY_HEADER, config.key.as_deref())?;
        insert_header(&mut headers, CLIENT_IP_HEADER, config.client_ip.as_deref())?;
        insert_header(&mut headers, LOCATION_HEADER, config.location.as_deref())?;
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        // A caller-supplied token must be sendable before the first request
        if let Some(client_id) = &config.client_id {
            header_value(CLIENT_ID_HEADER, client_id)?;
        }

        let mut extra_headers = HeaderMap::new();
        for (key, value) in &config.header_params {
            insert_header(&mut extra_headers, key, Some(value))?;
        }

        Ok(Self {
            endpoint,
            filters,
            extra_params,
            headers,
            extra_headers,
        })
    }

    /// Full URL for the page at `offset` holding at most `count` results
    pub(crate) fn url(&self, offset: u64, count: u32) -> String {
        let mut params = self.filters.clone();
        params.set("offset", offset);
        params.set("count", count);
        for (key, value) in self.extra_params.iter() {
            params.set(key, value);
        }

        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(params.iter());
        url.to_string()
    }

    /// Headers for the next request
    pub(crate) fn headers(&self, client_id: Option<&str>) -> Result<HeaderMap> {
        let mut headers = self.headers.clone();
        insert_header(&mut headers, CLIENT_ID_HEADER, client_id)?;
        for (name, value) in &self.extra_headers {
            headers.insert(name.clone(), value.clone());
        }
        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::invalid_value(name, format!("invalid header value: {e}")))
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::invalid_value(name, format!("invalid header name: {e}")))?;
    headers.insert(header_name, header_value(name, value)?);
    Ok(())
}
