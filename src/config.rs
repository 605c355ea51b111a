//! Search configuration
//!
//! `SearchConfig` is the immutable input of a pagination run. Field names
//! serialize in camelCase so a YAML or JSON file reads like the query string
//! the API receives.

use crate::error::{Error, Result};
use crate::types::{
    Aspect, Color, Freshness, ImageContent, ImageSize, ImageType, License, SafeSearch,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default image search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.cognitive.microsoft.com/bing/v7.0/images/search";

/// Default number of results requested per call
pub const DEFAULT_COUNT: u32 = 150;

/// Default total number of results for a run
pub const DEFAULT_AMOUNT: i64 = 2000;

// ============================================================================
// Search Config
// ============================================================================

/// Complete description of one image search run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Subscription key sent as `Ocp-Apim-Subscription-Key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Search terms (`q`)
    #[serde(default)]
    pub query: String,

    /// Market code, e.g. `en-US` (`mkt`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_search: Option<SafeSearch>,

    // Categorical filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<Aspect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_content: Option<ImageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_type: Option<ImageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freshness: Option<Freshness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,

    // Numeric filters (pixels)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,

    // Numeric filters (bytes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,

    /// Offset of the first result to fetch
    #[serde(default)]
    pub offset: u64,

    /// Upper bound on results per request
    #[serde(default = "default_count")]
    pub count: u32,

    /// Total number of results wanted; zero or negative yields nothing
    #[serde(default = "default_amount")]
    pub amount: i64,

    /// Session affinity token to start the run with (`X-MSEdge-ClientID`).
    /// When absent, the token returned by the first response is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Client IP hint (`X-MSEdge-ClientIP`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,

    /// Location hint (`X-Search-Location`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Extra query parameters, applied after the built-in ones
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_params: BTreeMap<String, String>,

    /// Extra request headers, applied after the built-in ones
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub header_params: BTreeMap<String, String>,

    /// Endpoint the requests are sent to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_count() -> u32 {
    DEFAULT_COUNT
}

fn default_amount() -> i64 {
    DEFAULT_AMOUNT
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            key: None,
            query: String::new(),
            market: None,
            safe_search: None,
            aspect: None,
            color: None,
            image_content: None,
            image_type: None,
            license: None,
            freshness: None,
            size: None,
            width: None,
            height: None,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
            min_file_size: None,
            max_file_size: None,
            offset: 0,
            count: DEFAULT_COUNT,
            amount: DEFAULT_AMOUNT,
            client_id: None,
            client_ip: None,
            location: None,
            query_params: BTreeMap::new(),
            header_params: BTreeMap::new(),
            endpoint: default_endpoint(),
        }
    }
}

impl SearchConfig {
    /// Create a config for `query` authenticated with `key`
    pub fn new(key: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            query: query.into(),
            ..Default::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Parse a config from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Load a config file; `.json` files are read as JSON, everything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Check the config before any request is made
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(Error::missing_field("query"));
        }

        if self.count == 0 {
            return Err(Error::invalid_value("count", "must be greater than zero"));
        }

        if matches!(self.key.as_deref(), Some(k) if k.is_empty()) {
            return Err(Error::invalid_value("key", "must not be empty"));
        }

        check_range("width", self.min_width, self.max_width)?;
        check_range("height", self.min_height, self.max_height)?;
        check_range("fileSize", self.min_file_size, self.max_file_size)?;

        url::Url::parse(&self.endpoint)
            .map_err(|e| Error::invalid_value("endpoint", e.to_string()))?;

        Ok(())
    }
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    field: &str,
    min: Option<T>,
    max: Option<T>,
) -> Result<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(Error::invalid_value(
            field,
            format!("minimum {min} exceeds maximum {max}"),
        )),
        _ => Ok(()),
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`SearchConfig`]
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Set the subscription key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.config.key = Some(key.into());
        self
    }

    /// Set the search terms
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.config.query = query.into();
        self
    }

    /// Set the market
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.config.market = Some(market.into());
        self
    }

    /// Set the adult content filter
    pub fn safe_search(mut self, safe_search: SafeSearch) -> Self {
        self.config.safe_search = Some(safe_search);
        self
    }

    /// Set the aspect filter
    pub fn aspect(mut self, aspect: Aspect) -> Self {
        self.config.aspect = Some(aspect);
        self
    }

    /// Set the color filter
    pub fn color(mut self, color: Color) -> Self {
        self.config.color = Some(color);
        self
    }

    /// Set the content filter
    pub fn image_content(mut self, content: ImageContent) -> Self {
        self.config.image_content = Some(content);
        self
    }

    /// Set the image type filter
    pub fn image_type(mut self, image_type: ImageType) -> Self {
        self.config.image_type = Some(image_type);
        self
    }

    /// Set the license filter
    pub fn license(mut self, license: License) -> Self {
        self.config.license = Some(license);
        self
    }

    /// Set the freshness filter
    pub fn freshness(mut self, freshness: Freshness) -> Self {
        self.config.freshness = Some(freshness);
        self
    }

    /// Set the size filter
    pub fn size(mut self, size: ImageSize) -> Self {
        self.config.size = Some(size);
        self
    }

    /// Require an exact width and height
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.config.width = Some(width);
        self.config.height = Some(height);
        self
    }

    /// Bound the width in pixels
    pub fn width_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.config.min_width = min;
        self.config.max_width = max;
        self
    }

    /// Bound the height in pixels
    pub fn height_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.config.min_height = min;
        self.config.max_height = max;
        self
    }

    /// Bound the file size in bytes
    pub fn file_size_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.config.min_file_size = min;
        self.config.max_file_size = max;
        self
    }

    /// Set the starting offset
    pub fn offset(mut self, offset: u64) -> Self {
        self.config.offset = offset;
        self
    }

    /// Set the per-request page cap
    pub fn count(mut self, count: u32) -> Self {
        self.config.count = count;
        self
    }

    /// Set the total number of results wanted
    pub fn amount(mut self, amount: i64) -> Self {
        self.config.amount = amount;
        self
    }

    /// Start the run with a known session affinity token
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.client_id = Some(client_id.into());
        self
    }

    /// Set the client IP hint
    pub fn client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.config.client_ip = Some(client_ip.into());
        self
    }

    /// Set the location hint
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.config.location = Some(location.into());
        self
    }

    /// Add an extra query parameter
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.query_params.insert(key.into(), value.into());
        self
    }

    /// Add an extra header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.header_params.insert(key.into(), value.into());
        self
    }

    /// Override the endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Build the config
    pub fn build(self) -> SearchConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.offset, 0);
        assert_eq!(config.count, 150);
        assert_eq!(config.amount, 2000);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.key.is_none());
        assert!(config.client_id.is_none());
        assert!(config.query_params.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::builder()
            .key("secret")
            .query("kittens")
            .market("en-US")
            .safe_search(SafeSearch::Strict)
            .color(Color::Monochrome)
            .width_range(Some(200), Some(1200))
            .count(50)
            .amount(120)
            .query_param("cc", "US")
            .header("User-Agent", "test")
            .build();

        assert_eq!(config.key.as_deref(), Some("secret"));
        assert_eq!(config.query, "kittens");
        assert_eq!(config.market.as_deref(), Some("en-US"));
        assert_eq!(config.safe_search, Some(SafeSearch::Strict));
        assert_eq!(config.color, Some(Color::Monochrome));
        assert_eq!(config.min_width, Some(200));
        assert_eq!(config.max_width, Some(1200));
        assert_eq!(config.count, 50);
        assert_eq!(config.amount, 120);
        assert_eq!(config.query_params.get("cc"), Some(&"US".to_string()));
        assert_eq!(config.header_params.get("User-Agent"), Some(&"test".to_string()));
    }

    #[test]
    fn test_from_yaml_applies_defaults() {
        let yaml = r"
key: abc
query: red panda
safeSearch: Moderate
imageType: AnimatedGif
minFileSize: 1024
queryParams:
  cc: DE
";
        let config = SearchConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.key.as_deref(), Some("abc"));
        assert_eq!(config.query, "red panda");
        assert_eq!(config.safe_search, Some(SafeSearch::Moderate));
        assert_eq!(config.image_type, Some(ImageType::AnimatedGif));
        assert_eq!(config.min_file_size, Some(1024));
        assert_eq!(config.count, DEFAULT_COUNT);
        assert_eq!(config.amount, DEFAULT_AMOUNT);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.query_params.get("cc"), Some(&"DE".to_string()));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_filter_value() {
        let yaml = "query: x\nlicense: Whatever\n";
        assert!(matches!(
            SearchConfig::from_yaml_str(yaml),
            Err(Error::YamlParse(_))
        ));
    }

    #[test]
    fn test_from_file_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("search.json");
        let mut file = fs::File::create(&json_path).unwrap();
        write!(file, r#"{{"query": "owls", "amount": 30, "count": 10}}"#).unwrap();
        let config = SearchConfig::from_file(&json_path).unwrap();
        assert_eq!(config.query, "owls");
        assert_eq!(config.amount, 30);
        assert_eq!(config.count, 10);

        let yaml_path = dir.path().join("search.yaml");
        fs::write(&yaml_path, "query: owls\nfreshness: Week\n").unwrap();
        let config = SearchConfig::from_file(&yaml_path).unwrap();
        assert_eq!(config.freshness, Some(Freshness::Week));
    }

    #[test]
    fn test_from_file_missing() {
        let err = SearchConfig::from_file("/nonexistent/search.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate() {
        assert!(SearchConfig::new("k", "cats").validate().is_ok());

        let err = SearchConfig::new("k", "  ").validate().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "query"));

        let mut config = SearchConfig::new("k", "cats");
        config.count = 0;
        assert!(config.validate().unwrap_err().is_config());

        let config = SearchConfig::new("", "cats");
        assert!(config.validate().is_err());

        let config = SearchConfig::builder()
            .query("cats")
            .width_range(Some(800), Some(100))
            .build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("width"));

        let config = SearchConfig::builder().query("cats").endpoint("not a url").build();
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let yaml = serde_yaml::to_string(&SearchConfig::new("k", "cats")).unwrap();
        assert!(yaml.contains("query: cats"));
        assert!(!yaml.contains("safeSearch"));
        assert!(!yaml.contains("queryParams"));
    }
}
