use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Song;
use crate::query::{genre_labels, language_labels};
use crate::store::DataStore;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageShare {
    pub language: String,
    pub songs: usize,
    /// Rounded share of all language tags, 0..=100.
    pub percent: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub song_count: usize,
    pub performer_count: usize,
    pub languages: Vec<LanguageShare>,
    /// Values accepted by the language filter, `未知` included.
    pub language_labels: Vec<String>,
    pub genres: Vec<String>,
}

impl CatalogStats {
    pub fn compute(songs: &[Song]) -> Self {
        let performers: HashSet<&str> = songs
            .iter()
            .flat_map(|s| s.performers.iter().map(String::as_str))
            .collect();

        let mut counts: Vec<(String, usize)> = Vec::new();
        for language in songs.iter().flat_map(|s| s.languages.iter()) {
            match counts.iter_mut().find(|(l, _)| l == language) {
                Some((_, n)) => *n += 1,
                None => counts.push((language.clone(), 1)),
            }
        }
        let total: usize = counts.iter().map(|(_, n)| n).sum();

        let languages = counts
            .into_iter()
            .map(|(language, songs)| LanguageShare {
                language,
                songs,
                percent: ((songs as f64 / total as f64) * 100.0).round() as u32,
            })
            .collect();

        Self {
            song_count: songs.len(),
            performer_count: performers.len(),
            languages,
            language_labels: language_labels(songs),
            genres: genre_labels(songs),
        }
    }
}

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let songs = store.list_songs()?;
    Ok(CmdResult::default().with_stats(CatalogStats::compute(&songs)))
}
