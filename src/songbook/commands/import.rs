use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SongbookError};
use crate::model::{Song, SongId};
use crate::store::DataStore;
use crate::transfer::TransferFormat;
use std::fs;
use std::path::Path;

/// Imports a CSV or JSON file, chosen by extension.
///
/// The whole file is decoded before anything is appended, so a format error
/// leaves the catalog unchanged.
pub fn run<S: DataStore>(store: &mut S, path: &Path) -> Result<CmdResult> {
    let format = TransferFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(SongbookError::Io)?;
    let songs = format.decode(&text)?;
    tracing::info!(path = %path.display(), format = %format, songs = songs.len(), "importing");
    bulk_append(store, songs)
}

/// Appends `songs` with freshly minted ids, whatever ids they carried.
pub fn bulk_append<S: DataStore>(store: &mut S, songs: Vec<Song>) -> Result<CmdResult> {
    let songs: Vec<Song> = songs
        .into_iter()
        .map(|mut song| {
            song.id = SongId::generate();
            song
        })
        .collect();
    let count = songs.len();
    let mut result = CmdResult::default();
    if count == 0 {
        result.add_message(CmdMessage::warning("文件中没有可导入的歌曲"));
        return Ok(result);
    }
    store.append_songs(songs.clone())?;

    result.add_message(CmdMessage::success(format!("成功导入 {} 首歌曲", count)));
    Ok(result.with_affected_songs(songs))
}
