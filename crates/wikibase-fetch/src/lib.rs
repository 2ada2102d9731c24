//! Blocking retrieval of Wikibase entity JSON.
//!
//! Every call takes its [`FetchConfig`] explicitly. There is no shared
//! client and no process-wide setting, so different threads can fetch with
//! different user agents or proxies at the same time.
//!
//! ```no_run
//! use wikibase_fetch::{FetchConfig, fetch_entity_document};
//! use wikibase_json::DecodeContext;
//!
//! let config = FetchConfig::default().with_timeout_secs(30);
//! let doc = fetch_entity_document("https://www.wikidata.org", "Q42", &DecodeContext::wikidata(), &config)?;
//! # Ok::<(), wikibase_fetch::FetchError>(())
//! ```

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value as Json;
use thiserror::Error;
use tracing::{debug, info};
use wikibase_json::codec::{DecodeContext, decode_document};
use wikibase_json::{DecodeError, EntityDocument};

/// Errors from a fetch. Transport errors are passed through unchanged.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid proxy {proxy:?}: {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP request or response failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("server returned status {0}")]
    BadStatus(u16),

    #[error("response has no entity {id:?}")]
    MissingEntity { id: String },

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Settings for a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Sent as the `User-Agent` header. Wikimedia sites reject requests
    /// without a descriptive one.
    pub user_agent: String,
    /// Proxy URL applied to all schemes.
    pub proxy: Option<String>,
    /// Whole-request timeout; none means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("wikibase-fetch/{}", env!("CARGO_PKG_VERSION")),
            proxy: None,
            timeout_secs: None,
        }
    }
}

impl FetchConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    fn client(&self) -> Result<Client, FetchError> {
        let mut builder = Client::builder().user_agent(self.user_agent.as_str());
        if let Some(proxy) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str()).map_err(|source| FetchError::InvalidProxy {
                proxy: proxy.clone(),
                source,
            })?;
            builder = builder.proxy(proxy);
        }
        // Blocking clients default to a 30s timeout; `None` here means no limit.
        builder = builder.timeout(self.timeout_secs.map(Duration::from_secs));
        Ok(builder.build()?)
    }
}

/// Performs one blocking GET and returns the response if its status is 2xx.
///
/// No retries are made.
pub fn fetch(url: &str, config: &FetchConfig) -> Result<Response, FetchError> {
    debug!(url, user_agent = %config.user_agent, proxy = ?config.proxy, "fetching");

    let response = config.client()?.get(url).send()?;
    let status = response.status();
    info!(url, status = status.as_u16(), "fetched");

    if !status.is_success() {
        return Err(FetchError::BadStatus(status.as_u16()));
    }
    Ok(response)
}

/// URL of the JSON export of one entity, e.g.
/// `https://www.wikidata.org/wiki/Special:EntityData/Q42.json`.
pub fn entity_data_url(base: &str, id: &str) -> String {
    format!("{}/wiki/Special:EntityData/{}.json", base.trim_end_matches('/'), id)
}

/// Picks the entity out of an EntityData response.
///
/// Looks up `entities.<id>`. A redirected id is answered under the target's
/// id, so a response holding exactly one entity is accepted as well.
pub fn extract_entity<'a>(json: &'a Json, id: &str) -> Result<&'a Json, FetchError> {
    let missing = || FetchError::MissingEntity { id: id.to_string() };
    let entities = json
        .get("entities")
        .and_then(Json::as_object)
        .ok_or_else(missing)?;

    if let Some(entity) = entities.get(id) {
        return Ok(entity);
    }
    match entities.values().collect::<Vec<_>>().as_slice() {
        [only] => {
            debug!(requested = id, "entity answered under a different id");
            Ok(only)
        }
        _ => Err(missing()),
    }
}

/// Fetches and decodes one entity document from a Wikibase site.
pub fn fetch_entity_document(
    base: &str,
    id: &str,
    ctx: &DecodeContext,
    config: &FetchConfig,
) -> Result<EntityDocument, FetchError> {
    let response = fetch(&entity_data_url(base, id), config)?;
    let json: Json = response.json()?;
    let entity = extract_entity(&json, id)?;
    Ok(decode_document(entity, ctx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wikibase_json::TermedStatementDocument;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert!(config.user_agent.starts_with("wikibase-fetch/"));
        assert_eq!(config.proxy, None);
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_config_setters() {
        let config = FetchConfig::default()
            .with_user_agent("my-bot/1.0 (admin@example.org)")
            .with_proxy("http://proxy.local:3128")
            .with_timeout_secs(10);
        assert_eq!(config.user_agent, "my-bot/1.0 (admin@example.org)");
        assert_eq!(config.proxy.as_deref(), Some("http://proxy.local:3128"));
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: FetchConfig = serde_json::from_value(json!({"timeout_secs": 5})).unwrap();
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.user_agent, FetchConfig::default().user_agent);
    }

    #[test]
    fn test_invalid_proxy() {
        let config = FetchConfig::default().with_proxy("not a url");
        match config.client() {
            Err(FetchError::InvalidProxy { proxy, .. }) => assert_eq!(proxy, "not a url"),
            other => panic!("Expected InvalidProxy, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_entity_data_url() {
        assert_eq!(
            entity_data_url("https://www.wikidata.org/", "Q42"),
            "https://www.wikidata.org/wiki/Special:EntityData/Q42.json"
        );
        assert_eq!(
            entity_data_url("http://localhost:8181", "P31"),
            "http://localhost:8181/wiki/Special:EntityData/P31.json"
        );
    }

    #[test]
    fn test_extract_entity() {
        let response = json!({"entities": {"Q42": {"id": "Q42"}, "Q1": {"id": "Q1"}}});
        assert_eq!(extract_entity(&response, "Q42").unwrap()["id"], "Q42");
        assert!(matches!(
            extract_entity(&response, "Q5"),
            Err(FetchError::MissingEntity { .. })
        ));
        assert!(matches!(
            extract_entity(&json!({"error": "x"}), "Q42"),
            Err(FetchError::MissingEntity { .. })
        ));
    }

    #[test]
    fn test_extract_redirected_entity() {
        let response = json!({"entities": {"Q5": {"type": "item", "id": "Q5"}}});
        let entity = extract_entity(&response, "Q215627").unwrap();
        let doc = decode_document(entity, &DecodeContext::wikidata()).unwrap();
        assert_eq!(doc.entity_id().id(), "Q5");
    }

    #[test]
    fn test_decode_error_wraps() {
        let err: FetchError = decode_document(&json!([]), &DecodeContext::wikidata())
            .unwrap_err()
            .into();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
