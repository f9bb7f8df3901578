use std::path::PathBuf;

use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.zotero.org";
pub const DEFAULT_OUTPUT: &str = "publications.qmd";

/// Run settings, taken from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub user_id: String,
    pub api_key: Option<String>,
    pub api_url: Url,
    pub output: PathBuf,
    /// Extra acronyms to force to upper case in titles, already lowercased.
    pub acronyms: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let user_id = var("ZOTERO_USER_ID").ok_or(Error::MissingUserId)?;
        let api_key = var("ZOTERO_API_KEY");

        let raw_url = var("ZOTERO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url).map_err(|source| Error::InvalidUrl {
            url: raw_url.clone(),
            source,
        })?;

        let output = var("PUBLICATIONS_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let acronyms = var("PUBLICATIONS_ACRONYMS")
            .map(|list| {
                list.split(',')
                    .map(|a| a.trim().to_lowercase())
                    .filter(|a| !a.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            user_id,
            api_key,
            api_url,
            output,
            acronyms,
        })
    }
}
