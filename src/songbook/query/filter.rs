use crate::model::{parse_date, Song, UNKNOWN_LABEL};
use chrono::NaiveDate;

/// Language and genre drop-down filters.
///
/// A blank label means the filter is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilters {
    pub language: String,
    pub genre: String,
}

impl CategoryFilters {
    pub fn new(language: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            genre: genre.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.language.trim().is_empty() && self.genre.trim().is_empty()
    }

    pub fn matches(&self, song: &Song) -> bool {
        label_matches(&song.languages, &self.language) && label_matches(&song.genres, &self.genre)
    }
}

/// Whether `labels` passes a category filter set to `selected`.
///
/// The unknown sentinel also admits songs whose list is empty.
pub fn label_matches(labels: &[String], selected: &str) -> bool {
    let selected = selected.trim();
    if selected.is_empty() {
        return true;
    }
    if selected == UNKNOWN_LABEL {
        return labels.is_empty() || labels.iter().any(|l| l == UNKNOWN_LABEL);
    }
    labels.iter().any(|l| l == selected)
}

/// Field-by-field predicate used by the `search` command.
///
/// Every populated criterion must hold. Text criteria are case-insensitive
/// substrings, language and genre are exact, and the count range is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancedFilter {
    pub title: String,
    pub performer: String,
    pub lyricist: String,
    pub composer: String,
    pub arranger: String,
    pub language: String,
    pub genre: String,
    pub min_count: u64,
    pub max_count: u64,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl Default for AdvancedFilter {
    fn default() -> Self {
        Self {
            title: String::new(),
            performer: String::new(),
            lyricist: String::new(),
            composer: String::new(),
            arranger: String::new(),
            language: String::new(),
            genre: String::new(),
            min_count: 0,
            max_count: u64::MAX,
            date_from: None,
            date_to: None,
        }
    }
}

impl AdvancedFilter {
    pub fn matches(&self, song: &Song) -> bool {
        if !self.title.is_empty()
            && !song
                .primary
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase())
        {
            return false;
        }

        if !any_contains(&song.performers, &self.performer)
            || !any_contains(&song.lyricists, &self.lyricist)
            || !any_contains(&song.composers, &self.composer)
            || !any_contains(&song.arrangers, &self.arranger)
        {
            return false;
        }

        if !self.language.is_empty() && !song.languages.contains(&self.language) {
            return false;
        }
        if !self.genre.is_empty() && !song.genres.contains(&self.genre) {
            return false;
        }

        let count = song.performance_count() as u64;
        if count < self.min_count || count > self.max_count {
            return false;
        }

        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(latest) = song
                .latest_performance()
                .and_then(|live| parse_date(&live.date))
            else {
                return false;
            };
            if self.date_from.is_some_and(|from| latest < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| latest > to) {
                return false;
            }
        }

        true
    }
}

fn any_contains(values: &[String], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    values.iter().any(|v| v.to_lowercase().contains(&needle))
}

/// Parses a performance-count bound typed by the user.
///
/// Leading digits are taken (`"12x"` is 12); blank or non-numeric input yields
/// `default`.
pub fn parse_count_bound(text: &str, default: u64) -> u64 {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(default)
}
