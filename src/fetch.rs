use log::{debug, warn};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use crate::{
    config::Config,
    error::{Error, Result},
    item::RawItem,
};

const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub const PAGE_SIZE: usize = 100;

/// Upper bound on requests per run, in case `Total-Results` is wrong.
const MAX_PAGES: usize = 1000;

const ITEM_TYPE: &str = "journalArticle";

/// Client for a user's public "My Publications" collection.
pub struct Zotero {
    agent: ureq::Agent,
    base: Url,
    user_id: String,
    api_key: Option<String>,
}

impl Zotero {
    pub fn new(config: &Config) -> Self {
        let cfg = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Zotero {
            agent: ureq::Agent::new_with_config(cfg),
            base: config.api_url.clone(),
            user_id: config.user_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetch every journal article, one page at a time, in API order.
    ///
    /// `on_page` is called after each page with the running count and the
    /// reported total.
    pub fn journal_articles<F>(&self, mut on_page: F) -> Result<Vec<RawItem>>
    where
        F: FnMut(usize, usize),
    {
        let mut items = Vec::new();
        let mut start = 0;

        for _ in 0..MAX_PAGES {
            let (batch, total) = self.page(start)?;
            let received = batch.len();
            items.extend(batch);
            on_page(items.len(), total);
            debug!("page at {start}: {received} items, {total} total");

            start += PAGE_SIZE;
            if start >= total || received == 0 {
                return Ok(items);
            }
        }

        warn!(
            "stopped after {MAX_PAGES} pages with {} items; results may be incomplete",
            items.len()
        );
        Ok(items)
    }

    fn page(&self, start: usize) -> Result<(Vec<RawItem>, usize)> {
        let url = self.page_url(start)?;
        let mut req = self
            .agent
            .get(url.as_str())
            .header("Zotero-API-Version", "3");
        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }

        let mut res = req.call()?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let total = res
            .headers()
            .get("Total-Results")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        let body = res.body_mut().read_to_string()?;
        let batch: Vec<RawItem> = serde_json::from_str(&body)?;
        Ok((batch, total))
    }

    fn page_url(&self, start: usize) -> Result<Url> {
        let user = utf8_percent_encode(&self.user_id, PATH_SEGMENT_ENCODE_SET);
        let path = format!("users/{user}/publications/items");
        let mut url = self.base.join(&path).map_err(|source| Error::InvalidUrl {
            url: format!("{}{path}", self.base),
            source,
        })?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("itemType", ITEM_TYPE)
            .append_pair("limit", &PAGE_SIZE.to_string())
            .append_pair("start", &start.to_string());
        Ok(url)
    }
}
