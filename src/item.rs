use serde::Deserialize;

/// One record as returned by the Zotero items endpoint. Only `data` is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawItem {
    pub key: String,
    pub data: ItemData,
}

/// Bibliographic fields of a record. Absent fields deserialize to empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemData {
    pub creators: Vec<Creator>,
    pub title: Option<String>,
    pub journal_abbreviation: String,
    pub publication_title: String,
    pub date: String,
    pub volume: String,
    pub issue: String,
    pub pages: String,
    #[serde(rename = "DOI")]
    pub doi: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Creator {
    pub creator_type: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Single-field name, used by Zotero for institutional creators.
    pub name: Option<String>,
}

impl Creator {
    pub fn is_author(&self) -> bool {
        self.creator_type == "author"
    }
}
