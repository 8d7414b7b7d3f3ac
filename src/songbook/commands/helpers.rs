use crate::commands::DisplaySong;
use crate::error::{Result, SongbookError};
use crate::model::{Song, SongId};
use crate::store::DataStore;

/// Resolves a user-typed id: an exact id wins, otherwise a unique prefix.
pub fn resolve_id<S: DataStore>(store: &S, input: &str) -> Result<SongId> {
    let input = input.trim();
    let songs = store.list_songs()?;

    if let Some(song) = songs.iter().find(|s| s.id.as_str() == input) {
        return Ok(song.id.clone());
    }
    if input.is_empty() {
        return Err(SongbookError::SongNotFound(SongId::new(input)));
    }

    let mut matches = songs.iter().filter(|s| s.id.as_str().starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(song), None) => Ok(song.id.clone()),
        (Some(_), Some(_)) => Err(SongbookError::AmbiguousId(input.to_string())),
        (None, _) => Err(SongbookError::SongNotFound(SongId::new(input))),
    }
}

pub fn numbered<'a, I>(songs: I) -> Vec<DisplaySong>
where
    I: IntoIterator<Item = &'a Song>,
{
    songs
        .into_iter()
        .enumerate()
        .map(|(i, song)| DisplaySong {
            row: i + 1,
            song: song.clone(),
        })
        .collect()
}
