use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Articles, conjunctions and short prepositions kept lowercase mid-title.
const SMALL_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "if", "in", "nor", "of", "on", "or", "so",
    "the", "to", "up", "via", "vs", "yet", "with", "from", "into", "over", "upon",
];

/// Medical and scientific acronyms that are always written in capitals.
const ACRONYMS: &[&str] = &[
    "covid", "pots", "mri", "nhl", "adhd", "adem", "nmda", "dna", "rna", "hiv", "aids", "copd",
    "icu", "ecg", "eeg", "ans", "cns", "pns", "emg", "bmi", "cfi", "cihr", "pecarn",
];

static DEFAULT_RULES: Lazy<TitleCase> = Lazy::new(|| TitleCase {
    small_words: SMALL_WORDS.iter().map(|w| w.to_string()).collect(),
    acronyms: ACRONYMS.iter().map(|w| w.to_string()).collect(),
});

/// Word lists driving title casing. Entries are stored lowercase.
#[derive(Debug, Clone)]
pub struct TitleCase {
    small_words: HashSet<String>,
    acronyms: HashSet<String>,
}

impl Default for TitleCase {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

impl TitleCase {
    /// Extend the acronym set with extra entries (matched case-insensitively).
    pub fn with_acronyms<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.acronyms
            .extend(extra.into_iter().map(|a| a.as_ref().to_lowercase()));
        self
    }

    /// Title-case `title` word by word.
    ///
    /// The first word, the last word and any word following a colon are always
    /// capitalized; other small words are lowercased. Known acronyms are
    /// uppercased wherever they appear and words already in capitals are left
    /// alone.
    pub fn apply(&self, title: &str) -> String {
        let words: Vec<&str> = title.split_whitespace().collect();
        let last = words.len().saturating_sub(1);
        let mut out = Vec::with_capacity(words.len());
        let mut after_colon = false;
        for (i, word) in words.iter().enumerate() {
            let force = i == 0 || i == last || after_colon;
            out.push(self.word(word, force));
            after_colon = word.ends_with(':');
        }
        out.join(" ")
    }

    fn word(&self, w: &str, force: bool) -> String {
        let sep = if w.contains('\u{2013}') {
            Some('\u{2013}')
        } else if w.contains('-') {
            Some('-')
        } else {
            None
        };
        if let Some(sep) = sep {
            return w
                .split(sep)
                .map(|part| self.word(part, true))
                .collect::<Vec<_>>()
                .join(&sep.to_string());
        }

        let lower = w.to_lowercase();
        if self
            .acronyms
            .contains(lower.trim_end_matches(['.', ',', ';', ':']))
        {
            return w.to_uppercase();
        }
        if is_upper(w) && w.chars().count() >= 2 {
            return w.to_string();
        }
        if !force && self.small_words.contains(&lower) {
            return lower;
        }
        capitalize(w)
    }
}

/// True when `w` has at least one cased character and no lowercase ones.
fn is_upper(w: &str) -> bool {
    w.chars().any(|c| c.is_uppercase()) && !w.chars().any(|c| c.is_lowercase())
}

/// Upper-case the first character and lowercase the rest.
///
/// When the upper-case form of the first character expands (`ß` to `SS`, `ﬁ` to
/// `FI`), only its first character stays upper case, so `ßtudy` becomes `Sstudy`.
fn capitalize(w: &str) -> String {
    let mut chars = w.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let mut out = String::with_capacity(w.len());
    out.extend(upper.next());
    out.extend(upper.flat_map(char::to_lowercase));
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tc(s: &str) -> String {
        TitleCase::default().apply(s)
    }

    #[test]
    fn small_words_stay_lowercase_mid_title() {
        assert_eq!(
            tc("treatment of adhd and nmda receptor disorders"),
            "Treatment of ADHD and NMDA Receptor Disorders"
        );
    }

    #[test]
    fn first_last_and_post_colon_words_are_capitalized() {
        assert_eq!(tc("a review of the"), "A Review of The");
        assert_eq!(tc("outcomes: a review"), "Outcomes: A Review");
        assert_eq!(tc("of"), "Of");
    }

    #[test]
    fn hyphenated_parts_are_each_capitalized() {
        assert_eq!(tc("covid-19 outcomes: a review"), "COVID-19 Outcomes: A Review");
        assert_eq!(tc("long-term follow-up of mri"), "Long-Term Follow-Up of MRI");
        assert_eq!(tc("pre\u{2013}and post"), "Pre\u{2013}And Post");
    }

    #[test]
    fn acronyms_match_through_trailing_punctuation() {
        assert_eq!(tc("the role of eeg, emg and ecg."), "The Role of EEG, EMG and ECG.");
    }

    #[test]
    fn existing_capitals_are_kept() {
        assert_eq!(tc("the SARS-CoV-2 and PTSD link"), "The SARS-Cov-2 and PTSD Link");
        assert_eq!(tc("USA data"), "USA Data");
    }

    #[test]
    fn mixed_case_words_are_normalised() {
        assert_eq!(tc("the hEART study"), "The Heart Study");
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(tc("  many   spaces\there "), "Many Spaces Here");
        assert_eq!(tc(""), "");
    }

    #[test]
    fn extra_acronyms_are_honoured() {
        let rules = TitleCase::default().with_acronyms(["PTSD", "fmri"]);
        assert_eq!(rules.apply("fmri in ptsd"), "FMRI in PTSD");
        assert_eq!(tc("fmri in ptsd"), "Fmri in Ptsd");
    }

    #[test]
    fn expanding_capitals_keep_one_upper_letter() {
        assert_eq!(tc("straße ßtudy"), "Straße Sstudy");
        assert_eq!(tc("\u{fb01}nal report"), "Final Report");
        assert_eq!(tc(&tc("straße ßtudy")), "Straße Sstudy");
        assert_eq!(tc("été ß"), "Été Ss");
    }

    #[test]
    fn title_case_is_idempotent() {
        proptest::proptest!(|(title in "[a-zA-Zßé\u{fb01}:,.\u{2013}-]{1,10}( [a-zA-Zßé\u{fb01}:,.\u{2013}-]{1,10}){0,8}")| {
            let once = tc(&title);
            let twice = tc(&once);
            proptest::prop_assert_eq!(once, twice);
        })
    }

    #[test]
    fn small_words_idempotent_in_any_position() {
        let words: Vec<&str> = SMALL_WORDS.iter().chain(ACRONYMS.iter()).copied().collect();
        proptest::proptest!(|(picked in proptest::collection::vec(proptest::sample::select(words.clone()), 1..8))| {
            let title = picked.join(" ");
            let once = tc(&title);
            proptest::prop_assert_eq!(tc(&once), once);
        })
    }
}
