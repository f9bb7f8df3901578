use once_cell::sync::Lazy;
use regex::Regex;

use crate::item::{Creator, RawItem};

pub mod title;

pub use title::TitleCase;

/// Authors listed before the remainder is replaced by "et al.".
const MAX_AUTHORS: usize = 3;

/// A rendered citation together with the year it is filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedCitation {
    pub year: Option<i32>,
    pub text: String,
}

/// Render one record in the site's citation style:
///
/// `Authors. Title. *Journal*. Year;Vol(Issue):Pages. [DOI](url)`
///
/// Missing fields drop their segment instead of failing. A record without
/// authors starts directly at the title, with no leading space.
pub fn format(item: &RawItem, rules: &TitleCase) -> FormattedCitation {
    let data = &item.data;

    let title = data.title.as_deref().unwrap_or("Untitled");
    let title = rules.apply(title.trim_end_matches('.'));

    let journal = if data.journal_abbreviation.is_empty() {
        data.publication_title.as_str()
    } else {
        data.journal_abbreviation.as_str()
    };
    let year = extract_year(&data.date);
    let loc = locator(&data.volume, &data.issue, &data.pages);

    let mut parts = Vec::new();
    let authors = format_authors(&data.creators);
    if !authors.is_empty() {
        parts.push(authors);
    }
    parts.push(format!("{title}."));
    if !journal.is_empty() {
        parts.push(format!("*{journal}*."));
    }
    if let Some(year) = year {
        match loc {
            Some(loc) => parts.push(format!("{year};{loc}.")),
            None => parts.push(format!("{year}.")),
        }
    }
    if let Some(link) = doi_link(&data.doi) {
        parts.push(link);
    }

    FormattedCitation {
        year,
        text: parts.join(" "),
    }
}

/// "Smith JP, Doe J, Roe R, et al." style author list. Non-author creators are skipped.
pub fn format_authors(creators: &[Creator]) -> String {
    let names: Vec<String> = creators
        .iter()
        .filter(|c| c.is_author())
        .map(format_author)
        .collect();

    if names.len() > MAX_AUTHORS {
        format!("{}, et al.", names[..MAX_AUTHORS].join(", "))
    } else {
        names.join(", ")
    }
}

fn format_author(creator: &Creator) -> String {
    let last = creator
        .last_name
        .as_deref()
        .or(creator.name.as_deref())
        .unwrap_or_default();
    // Initials are always upper case, even when the first name is stored lowercase.
    let initials: String = creator
        .first_name
        .as_deref()
        .unwrap_or_default()
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        last.to_string()
    } else {
        format!("{last} {initials}")
    }
}

/// First standalone 19xx or 20xx in a free-text date.
pub fn extract_year(date: &str) -> Option<i32> {
    static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").unwrap());

    YEAR_RE
        .captures(date)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// `vol(issue):pages`, or nothing when there is no volume.
fn locator(volume: &str, issue: &str, pages: &str) -> Option<String> {
    if volume.is_empty() {
        return None;
    }
    let mut loc = volume.to_string();
    if !issue.is_empty() {
        loc.push_str(&format!("({issue})"));
    }
    if !pages.is_empty() {
        loc.push(':');
        loc.push_str(&pages.replace('\u{2013}', "-"));
    }
    Some(loc)
}

fn doi_link(doi: &str) -> Option<String> {
    if doi.is_empty() {
        return None;
    }
    if doi.starts_with("http") {
        Some(format!("[DOI]({doi})"))
    } else {
        Some(format!("[DOI](https://doi.org/{doi})"))
    }
}
