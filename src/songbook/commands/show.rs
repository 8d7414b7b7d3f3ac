use crate::commands::{CmdResult, DisplaySong};
use crate::error::{Result, SongbookError};
use crate::model::SongId;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, id: &SongId) -> Result<CmdResult> {
    let songs = store.list_songs()?;
    let (row, song) = songs
        .into_iter()
        .enumerate()
        .find(|(_, s)| &s.id == id)
        .ok_or_else(|| SongbookError::SongNotFound(id.clone()))?;

    Ok(CmdResult::default().with_listed_songs(vec![DisplaySong { row: row + 1, song }]))
}
