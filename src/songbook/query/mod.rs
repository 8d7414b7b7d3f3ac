//! # Query Pipeline
//!
//! Pure functions that turn the catalog into a view: the ordered subset of songs
//! shown to the user. Nothing here touches the store; callers pass the records
//! and a [`ViewQuery`] and get borrowed songs back.
//!
//! Stages run in a fixed order:
//!
//! 1. Free-text search ([`search`])
//! 2. Language and genre filters ([`filter::CategoryFilters`])
//! 3. Advanced field filter ([`filter::AdvancedFilter`])
//! 4. Stable sort ([`sort`])
//!
//! Calling [`view`] twice with the same input yields the same output.

use crate::model::{Song, UNKNOWN_LABEL};

pub mod filter;
pub mod search;
pub mod sort;

pub use filter::{parse_count_bound, AdvancedFilter, CategoryFilters};
pub use sort::{SortDirection, SortField, SortSpec};

/// Everything that determines a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: Option<String>,
    pub filters: CategoryFilters,
    pub advanced: Option<AdvancedFilter>,
    pub sort: SortSpec,
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn with_filters(mut self, filters: CategoryFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_advanced(mut self, advanced: AdvancedFilter) -> Self {
        self.advanced = Some(advanced);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }
}

pub fn view<'a>(records: &'a [Song], query: &ViewQuery) -> Vec<&'a Song> {
    let keywords = query
        .search
        .as_deref()
        .map(search::keywords)
        .unwrap_or_default();

    let mut songs: Vec<&Song> = records
        .iter()
        .filter(|song| search::matches(song, &keywords))
        .filter(|song| query.filters.matches(song))
        .filter(|song| query.advanced.as_ref().map_or(true, |adv| adv.matches(song)))
        .collect();

    sort::sort_songs(&mut songs, query.sort);
    songs
}

/// Distinct labels of one category in first-seen order.
///
/// The unknown label is appended when some song has no label at all.
pub fn eligible_labels<'a, F>(records: &'a [Song], labels: F) -> Vec<String>
where
    F: Fn(&'a Song) -> &'a [String],
{
    let mut seen: Vec<String> = Vec::new();
    let mut any_empty = false;
    for song in records {
        let list = labels(song);
        if list.is_empty() {
            any_empty = true;
        }
        for label in list {
            if !label.trim().is_empty() && !seen.contains(label) {
                seen.push(label.clone());
            }
        }
    }
    if any_empty && !seen.iter().any(|l| l == UNKNOWN_LABEL) {
        seen.push(UNKNOWN_LABEL.to_string());
    }
    seen
}

pub fn language_labels(records: &[Song]) -> Vec<String> {
    eligible_labels(records, |song| song.languages.as_slice())
}

pub fn genre_labels(records: &[Song]) -> Vec<String> {
    eligible_labels(records, |song| song.genres.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaLink;

    fn catalog() -> Vec<Song> {
        let mut moon = Song::new("Moon Song");
        moon.performers = vec!["Ann".into()];
        moon.languages = vec!["英语".into()];
        moon.lives = vec![MediaLink::new("http://a", "", "2024-01-01")];

        let mut sun = Song::new("Sun Song");
        sun.performers = vec!["Ann".into()];
        sun.genres = vec!["流行".into()];

        let mut rain = Song::new("Rain");
        rain.performers = vec!["Bea".into()];
        rain.languages = vec!["日语".into()];
        rain.genres = vec!["流行".into()];
        rain.lives = vec![
            MediaLink::new("", "", "2022-01-01"),
            MediaLink::new("", "", "2023-01-01"),
        ];

        vec![moon, sun, rain]
    }

    fn titles(view: &[&Song]) -> Vec<String> {
        view.iter().map(|s| s.title().to_string()).collect()
    }

    #[test]
    fn empty_query_returns_catalog_order() {
        let songs = catalog();
        let q = ViewQuery::new();
        assert_eq!(titles(&view(&songs, &q)), vec!["Moon Song", "Sun Song", "Rain"]);
    }

    #[test]
    fn stages_combine() {
        let songs = catalog();
        let q = ViewQuery::new()
            .with_search("song")
            .with_filters(CategoryFilters::new(UNKNOWN_LABEL, "流行"));
        assert_eq!(titles(&view(&songs, &q)), vec!["Sun Song"]);
    }

    #[test]
    fn advanced_then_sort() {
        let songs = catalog();
        let q = ViewQuery::new()
            .with_advanced(AdvancedFilter {
                min_count: 1,
                ..Default::default()
            })
            .with_sort(SortSpec::new(SortField::Performance, SortDirection::Desc));
        assert_eq!(titles(&view(&songs, &q)), vec!["Rain", "Moon Song"]);
    }

    #[test]
    fn view_is_repeatable() {
        let songs = catalog();
        let q = ViewQuery::new().with_sort(SortSpec::new(SortField::Date, SortDirection::Desc));
        assert_eq!(titles(&view(&songs, &q)), titles(&view(&songs, &q)));
        assert_eq!(titles(&view(&songs, &q)), vec!["Moon Song", "Rain", "Sun Song"]);
    }

    #[test]
    fn labels_are_first_seen_with_sentinel() {
        let songs = catalog();
        assert_eq!(language_labels(&songs), vec!["英语", "日语", UNKNOWN_LABEL]);
        assert_eq!(genre_labels(&songs), vec!["流行", UNKNOWN_LABEL]);
    }

    #[test]
    fn sentinel_not_duplicated() {
        let mut songs = catalog();
        for song in &mut songs {
            song.genres = vec![UNKNOWN_LABEL.to_string()];
        }
        songs.push(Song::new("bare"));
        assert_eq!(genre_labels(&songs), vec![UNKNOWN_LABEL]);
    }
}
