use std::{fmt::Display, io::IsTerminal};

use indicatif::ProgressBar;
use owo_colors::OwoColorize;

fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Print a progress line for the operator on stdout.
pub fn success(msg: impl Display) {
    if color_enabled() {
        println!("{} {}", "✓".green().bold(), msg);
    } else {
        println!("✓ {msg}");
    }
}

/// Spinner shown on stderr while pages are being fetched.
pub struct FetchProgress {
    bar: ProgressBar,
}

impl FetchProgress {
    pub fn start() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_message("fetching publications from Zotero");
        FetchProgress { bar }
    }

    pub fn update(&self, fetched: usize, total: usize) {
        self.bar.set_message(format!("fetched {fetched} of {total} items"));
        self.bar.tick();
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
