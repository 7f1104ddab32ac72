use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::api::API_CHAR_SHEET_MIN_CACHE_TIME;

pub const SKILL_TREE_VAR: &str = "SKILLMON_SKILL_TREE";
pub const CERT_TREE_VAR: &str = "SKILLMON_CERT_TREE";
pub const MIN_CACHE_SECS_VAR: &str = "SKILLMON_MIN_CACHE_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub skill_tree_path: Option<PathBuf>,
    pub cert_tree_path: Option<PathBuf>,
    pub min_cache_secs: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skill_tree_path: None,
            cert_tree_path: None,
            min_cache_secs: API_CHAR_SHEET_MIN_CACHE_TIME,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let min_cache_secs = match non_empty(MIN_CACHE_SECS_VAR) {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .with_context(|| format!("{} must be a number of seconds", MIN_CACHE_SECS_VAR))?
                // The API never allows refreshing the sheet sooner than this.
                .max(API_CHAR_SHEET_MIN_CACHE_TIME),
            None => API_CHAR_SHEET_MIN_CACHE_TIME,
        };

        Ok(Self {
            skill_tree_path: non_empty(SKILL_TREE_VAR).map(PathBuf::from),
            cert_tree_path: non_empty(CERT_TREE_VAR).map(PathBuf::from),
            min_cache_secs,
        })
    }
}
