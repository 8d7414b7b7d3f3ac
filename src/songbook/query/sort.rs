use crate::error::{Result, SongbookError};
use crate::model::{date_timestamp, Song};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    /// Catalog (insertion) order.
    #[default]
    Id,
    Title,
    Artist,
    Language,
    Genre,
    Performance,
    Date,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Artist => "artist",
            SortField::Language => "language",
            SortField::Genre => "genre",
            SortField::Performance => "performance",
            SortField::Date => "date",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = SongbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "id" | "" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "artist" | "performer" => Ok(SortField::Artist),
            "language" => Ok(SortField::Language),
            "genre" => Ok(SortField::Genre),
            "performance" | "count" => Ok(SortField::Performance),
            "date" => Ok(SortField::Date),
            other => Err(SongbookError::Api(format!("Unknown sort field: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = SongbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(SongbookError::Api(format!(
                "Unknown sort direction: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

enum SortKey<'a> {
    Text(&'a str),
    Count(usize),
    Time(i64),
}

fn key(song: &Song, field: SortField) -> SortKey<'_> {
    match field {
        SortField::Title => SortKey::Text(song.title()),
        SortField::Artist => SortKey::Text(song.first_performer()),
        SortField::Language => SortKey::Text(song.first_language()),
        SortField::Genre => SortKey::Text(song.first_genre()),
        SortField::Performance => SortKey::Count(song.performance_count()),
        SortField::Date => SortKey::Time(date_timestamp(song.latest_performance_date()).unwrap_or(0)),
        SortField::Id => SortKey::Text(song.id.as_str()),
    }
}

fn compare(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    match (a, b) {
        (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        (SortKey::Count(a), SortKey::Count(b)) => a.cmp(b),
        (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// Stable in-place sort of a view.
///
/// `songs` must arrive in catalog order: sorting by [`SortField::Id`] keeps that
/// order (or reverses it). Equal keys keep their input order in both directions.
pub fn sort_songs(songs: &mut [&Song], spec: SortSpec) {
    if spec.field == SortField::Id {
        if spec.direction == SortDirection::Desc {
            songs.reverse();
        }
        return;
    }

    songs.sort_by(|a, b| {
        let ord = compare(&key(a, spec.field), &key(b, spec.field));
        match spec.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaLink;

    fn with_live(title: &str, date: &str) -> Song {
        Song {
            lives: vec![MediaLink::new("http://x", "", date)],
            ..Song::new(title)
        }
    }

    fn titles(songs: &[&Song]) -> Vec<String> {
        songs.iter().map(|s| s.title().to_string()).collect()
    }

    #[test]
    fn date_sort_puts_empty_first() {
        let songs = [
            with_live("a", "2024-01-01"),
            with_live("b", ""),
            with_live("c", "2023-05-05"),
        ];
        let mut view: Vec<&Song> = songs.iter().collect();
        sort_songs(&mut view, SortSpec::new(SortField::Date, SortDirection::Asc));
        let dates: Vec<&str> = view.iter().map(|s| s.lives[0].date.as_str()).collect();
        assert_eq!(dates, vec!["", "2023-05-05", "2024-01-01"]);
    }

    #[test]
    fn invalid_dates_compare_as_epoch() {
        let songs = [with_live("late", "2024-01-01"), with_live("bad", "someday"), Song::new("none")];
        let mut view: Vec<&Song> = songs.iter().collect();
        sort_songs(&mut view, SortSpec::new(SortField::Date, SortDirection::Asc));
        assert_eq!(titles(&view), vec!["bad", "none", "late"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let mut songs = vec![Song::new("b"), Song::new("a"), Song::new("c")];
        songs[0].performers = vec!["Same".into()];
        songs[1].performers = vec!["Same".into()];
        songs[2].performers = vec!["Other".into()];

        let mut view: Vec<&Song> = songs.iter().collect();
        sort_songs(&mut view, SortSpec::new(SortField::Artist, SortDirection::Asc));
        assert_eq!(titles(&view), vec!["c", "b", "a"]);

        let mut view: Vec<&Song> = songs.iter().collect();
        sort_songs(&mut view, SortSpec::new(SortField::Artist, SortDirection::Desc));
        assert_eq!(titles(&view), vec!["b", "a", "c"]);
    }

    #[test]
    fn missing_values_sort_first() {
        let mut songs = vec![Song::new("has"), Song::new("none")];
        songs[0].genres = vec!["流行".into()];
        let mut view: Vec<&Song> = songs.iter().collect();
        sort_songs(&mut view, SortSpec::new(SortField::Genre, SortDirection::Asc));
        assert_eq!(titles(&view), vec!["none", "has"]);
    }

    #[test]
    fn performance_sorts_numerically() {
        let mut songs = vec![Song::new("ten"), Song::new("two")];
        songs[0].lives = vec![MediaLink::default(); 10];
        songs[1].lives = vec![MediaLink::default(); 2];
        let mut view: Vec<&Song> = songs.iter().collect();
        sort_songs(&mut view, SortSpec::new(SortField::Performance, SortDirection::Asc));
        assert_eq!(titles(&view), vec!["two", "ten"]);
    }

    #[test]
    fn id_sort_is_catalog_order() {
        let songs = vec![Song::new("first"), Song::new("second"), Song::new("third")];
        let mut view: Vec<&Song> = songs.iter().collect();
        sort_songs(&mut view, SortSpec::default());
        assert_eq!(titles(&view), vec!["first", "second", "third"]);

        sort_songs(&mut view, SortSpec::new(SortField::Id, SortDirection::Desc));
        assert_eq!(titles(&view), vec!["third", "second", "first"]);
    }

    #[test]
    fn fields_parse_by_name() {
        assert_eq!("date".parse::<SortField>().unwrap(), SortField::Date);
        assert_eq!("Artist".parse::<SortField>().unwrap(), SortField::Artist);
        assert!("colour".parse::<SortField>().is_err());
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
    }
}
