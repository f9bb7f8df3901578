use std::fs;

use crate::{
    citation::TitleCase,
    config::Config,
    document::Document,
    error::Error,
    fetch::Zotero,
    report::FetchProgress,
};

mod citation;
mod config;
mod document;
mod error;
mod fetch;
mod item;
mod report;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env()?;
    let client = Zotero::new(&config);

    let progress = FetchProgress::start();
    let fetched = client.journal_articles(|n, total| progress.update(n, total));
    progress.finish();
    let items = fetched?;

    report::success(format!("Fetched {} items from Zotero.", items.len()));
    if items.is_empty() {
        return Err(Error::NoItems {
            path: config.output.clone(),
        }
        .into());
    }

    let rules = TitleCase::default().with_acronyms(&config.acronyms);
    let doc = Document::from_items(&items, &rules);
    doc.write_to(&config.output)?;

    let written = fs::canonicalize(&config.output).unwrap_or_else(|_| config.output.clone());
    report::success(format!(
        "Wrote {} publications to {}",
        doc.publications(),
        written.display()
    ));
    Ok(())
}
