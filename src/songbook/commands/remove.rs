use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SongbookError};
use crate::model::SongId;
use crate::store::DataStore;

/// Removes the song `id`. Removing an absent id changes nothing and is not an error.
pub fn run<S: DataStore>(store: &mut S, id: &SongId) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let song = match store.get_song(id) {
        Ok(song) => song,
        Err(SongbookError::SongNotFound(_)) => {
            result.add_message(CmdMessage::info(format!("No song with id {}", id)));
            return Ok(result);
        }
        Err(e) => return Err(e),
    };

    if store.remove_song(id)? {
        tracing::debug!(id = %id, "song removed");
        result.add_message(CmdMessage::success(format!(
            "Song deleted ({}): {}",
            id.short(),
            song.title()
        )));
        result.affected_songs.push(song);
    }
    Ok(result)
}
