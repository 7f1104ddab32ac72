use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::ApiError;
use crate::xml::XmlNode;

const API_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A response as handed over by the fetch layer.
#[derive(Debug, Clone, Default)]
pub struct EveApiData {
    pub data: Vec<u8>,
    /// Served from the local cache instead of the network.
    pub locally_cached: bool,
    /// Fetch problem that was worked around, e.g. stale cache served after
    /// a network failure.
    pub exception: Option<String>,
}

impl EveApiData {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(ApiError::from)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self {
            data,
            locally_cached: true,
            exception: None,
        })
    }
}

/// Envelope metadata shared by every `<eveapi>` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiBase {
    pub server_time: Option<DateTime<Utc>>,
    pub cached_until: Option<DateTime<Utc>>,
    pub locally_cached: bool,
}

impl ApiBase {
    /// Validates the `<eveapi>` envelope and returns its metadata together
    /// with the `<result>` element.
    pub fn read_envelope(root: &XmlNode) -> Result<(Self, &XmlNode), ApiError> {
        if !root.is("eveapi") {
            return Err(ApiError::malformed(format!(
                "expected <eveapi> root, found <{}>",
                root.name
            )));
        }

        let mut base = ApiBase::default();
        let mut result = None;

        for node in &root.children {
            match node.name.as_str() {
                "currentTime" => base.server_time = parse_api_time(node.text()),
                "cachedUntil" => base.cached_until = parse_api_time(node.text()),
                "error" => {
                    return Err(ApiError::Remote {
                        code: node.parse_attr("code")?.unwrap_or(0),
                        message: node.text().to_string(),
                    })
                }
                "result" => result = Some(node),
                _ => {}
            }
        }

        let result = result.ok_or_else(|| ApiError::malformed("missing <result> element"))?;
        Ok((base, result))
    }

    /// When the document may be fetched again, never sooner than
    /// `min_cache_secs` after the server time.
    pub fn effective_cached_until(&self, min_cache_secs: i64) -> Option<DateTime<Utc>> {
        let floor = self
            .server_time
            .map(|t| t + Duration::seconds(min_cache_secs));
        match (self.cached_until, floor) {
            (Some(until), Some(floor)) => Some(until.max(floor)),
            (until, floor) => until.or(floor),
        }
    }
}

pub fn parse_api_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), API_TIME_FORMAT)
        .ok()
        .map(|t| t.and_utc())
}
