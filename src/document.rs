use std::{fs, path::Path};

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    citation::{self, FormattedCitation, TitleCase},
    error::{Error, Result},
    item::RawItem,
};

pub const FRONT_MATTER: &str = r#"---
title: "Publications"
---

Full publication list available on [Google Scholar](https://scholar.google.ca/citations?user=iWPPB7AAAAAJ&hl) and [PubMed](https://pubmed.ncbi.nlm.nih.gov/?term=richer+l&sort=date).

---
"#;

/// The publications page: front matter, then citations grouped under year headers.
#[derive(Debug)]
pub struct Document {
    blocks: Vec<String>,
    publications: usize,
}

impl Document {
    /// Format every item and lay out the page. Items without a year are left out.
    pub fn from_items(items: &[RawItem], rules: &TitleCase) -> Self {
        let citations = items
            .iter()
            .map(|item| {
                let c = citation::format(item, rules);
                if c.year.is_none() {
                    warn!(
                        "skipping {} ({}): no publication year",
                        item.key,
                        item.data.title.as_deref().unwrap_or("untitled")
                    );
                }
                c
            })
            .collect();
        Self::from_citations(citations)
    }

    /// Newest year first; within a year, citations in plain string order.
    pub fn from_citations(citations: Vec<FormattedCitation>) -> Self {
        let mut dated: Vec<(i32, String)> = citations
            .into_iter()
            .filter_map(|c| c.year.map(|y| (y, c.text)))
            .collect();
        dated.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        let mut blocks = vec![FRONT_MATTER.to_string()];
        let mut current = None;
        for (year, text) in &dated {
            if current != Some(*year) {
                current = Some(*year);
                blocks.push(format!("### {year}\n"));
            }
            blocks.push(format!("{text}\n"));
        }

        Document {
            blocks,
            publications: dated.len(),
        }
    }

    /// Number of citations on the page.
    pub fn publications(&self) -> usize {
        self.publications
    }

    pub fn render(&self) -> String {
        static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").unwrap());
        BLANK_RUN
            .replace_all(&self.blocks.join("\n"), "\n\n\n")
            .into_owned()
    }

    /// Replace the file at `path` with the rendered page.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cite(year: Option<i32>, text: &str) -> FormattedCitation {
        FormattedCitation {
            year,
            text: text.to_string(),
        }
    }

    #[test]
    fn groups_by_year_descending_and_sorts_within_year() {
        let doc = Document::from_citations(vec![
            cite(Some(2019), "Beta."),
            cite(Some(2021), "Zeta."),
            cite(None, "Undated."),
            cite(Some(2021), "Alpha."),
            cite(Some(2019), "Alpha."),
        ]);
        assert_eq!(doc.publications(), 4);
        let expected = format!(
            "{FRONT_MATTER}\n### 2021\n\nAlpha.\n\nZeta.\n\n### 2019\n\nAlpha.\n\nBeta.\n"
        );
        assert_eq!(doc.render(), expected);
    }

    #[test]
    fn empty_page_is_front_matter_only() {
        let doc = Document::from_citations(vec![cite(None, "x")]);
        assert_eq!(doc.publications(), 0);
        assert_eq!(doc.render(), FRONT_MATTER);
    }

    #[test]
    fn long_blank_runs_are_collapsed() {
        let doc = Document::from_citations(vec![cite(Some(2020), "\n\nPadded.\n")]);
        let out = doc.render();
        assert!(!out.contains("\n\n\n\n"));
        assert!(out.contains("### 2020\n\n\nPadded."));
    }

    #[test]
    fn year_headers_are_strictly_descending() {
        proptest::proptest!(|(entries in proptest::collection::vec((1990i32..2030, "[A-Za-z ]{1,12}"), 0..40))| {
            let doc = Document::from_citations(
                entries.iter().map(|(y, t)| cite(Some(*y), t)).collect(),
            );
            let out = doc.render();
            let years: Vec<i32> = out
                .lines()
                .filter_map(|l| l.strip_prefix("### "))
                .map(|y| y.parse().unwrap())
                .collect();
            proptest::prop_assert!(years.windows(2).all(|w| w[0] > w[1]));

            let mut sections = out.split("### ").skip(1);
            for _ in &years {
                let section = sections.next().unwrap();
                let lines: Vec<&str> = section.lines().skip(1).filter(|l| !l.is_empty()).collect();
                let mut sorted = lines.clone();
                sorted.sort();
                proptest::prop_assert_eq!(lines, sorted);
            }
        })
    }

    #[test]
    fn write_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("publications.qmd");
        fs::write(&path, "old content that is much longer than needed").unwrap();
        let doc = Document::from_citations(vec![cite(Some(2022), "New.")]);
        doc.write_to(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), doc.render());
    }
}
