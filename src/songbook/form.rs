//! Editable form of a song.
//!
//! [`SongDraft`] holds what a user types when adding or editing a song. It is
//! what the `add` flags fill in and what `edit` hands to the external editor as
//! JSON. [`SongDraft::into_song`] normalizes and validates it.

use crate::error::{Result, SongbookError};
use crate::model::{MediaLink, Song, SongId, SongTitle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongDraft {
    pub title: String,
    /// Language of the primary title, also the first entry of `languages`.
    pub language: String,
    pub other_languages: Vec<String>,
    pub performers: Vec<String>,
    pub lyricists: Vec<String>,
    pub composers: Vec<String>,
    pub arrangers: Vec<String>,
    pub genres: Vec<String>,
    pub aliases: Vec<SongTitle>,
    pub videos: Vec<MediaLink>,
    pub lives: Vec<MediaLink>,
    pub clips: Vec<MediaLink>,
    pub note: String,
}

impl SongDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// The editable form of an existing song.
    pub fn from_song(song: &Song) -> Self {
        let language = if song.primary.language.is_empty() {
            song.first_language().to_string()
        } else {
            song.primary.language.clone()
        };
        let other_languages = song
            .languages
            .iter()
            .filter(|l| **l != language)
            .cloned()
            .collect();

        Self {
            title: song.primary.title.clone(),
            language,
            other_languages,
            performers: song.performers.clone(),
            lyricists: song.lyricists.clone(),
            composers: song.composers.clone(),
            arrangers: song.arrangers.clone(),
            genres: song.genres.clone(),
            aliases: song.aliases.clone(),
            videos: song.videos.clone(),
            lives: song.lives.clone(),
            clips: song.clips.clone(),
            note: song.note.clone(),
        }
    }

    /// Validates the draft and builds a song carrying `id`.
    ///
    /// Entries are trimmed and blanks dropped. Only presence is checked: the
    /// title and at least one performer are required.
    pub fn into_song(self, id: SongId) -> Result<Song> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(SongbookError::Validation("title is required".to_string()));
        }
        let performers = clean_list(self.performers);
        if performers.is_empty() {
            return Err(SongbookError::Validation(
                "at least one performer is required".to_string(),
            ));
        }

        let language = self.language.trim().to_string();
        let mut languages: Vec<String> = Vec::new();
        for lang in std::iter::once(language.clone()).chain(clean_list(self.other_languages)) {
            if !lang.is_empty() && !languages.contains(&lang) {
                languages.push(lang);
            }
        }

        let aliases = self
            .aliases
            .into_iter()
            .filter_map(|alias| {
                let title = alias.title.trim();
                (!title.is_empty()).then(|| SongTitle::new(title, alias.language.trim()))
            })
            .collect();

        Ok(Song {
            id,
            primary: SongTitle::new(title, language),
            aliases,
            performers,
            lyricists: clean_list(self.lyricists),
            composers: clean_list(self.composers),
            arrangers: clean_list(self.arrangers),
            languages,
            genres: clean_list(self.genres),
            videos: clean_links(self.videos),
            lives: clean_links(self.lives),
            clips: clean_links(self.clips),
            note: self.note.trim().to_string(),
        })
    }
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn clean_links(links: Vec<MediaLink>) -> Vec<MediaLink> {
    links
        .into_iter()
        .map(|link| MediaLink {
            url: link.url.trim().to_string(),
            title: link.title.trim().to_string(),
            date: link.date.trim().to_string(),
            note: link.note.trim().to_string(),
            kind: link.kind.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()),
        })
        .filter(|link| {
            !(link.url.is_empty() && link.title.is_empty() && link.date.is_empty() && link.note.is_empty())
        })
        .collect()
}
