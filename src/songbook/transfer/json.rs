use crate::error::{Result, SongbookError};
use crate::model::{Song, SongId};
use serde_json::Value;

/// Full catalog as a JSON array indented with two spaces.
pub fn export(songs: &[Song]) -> Result<String> {
    serde_json::to_string_pretty(songs).map_err(SongbookError::Serialization)
}

/// Parses a top-level JSON array of songs.
///
/// Every record gets a fresh id, whatever it carried before.
pub fn import(text: &str) -> Result<Vec<Song>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| SongbookError::InvalidFormat(format!("解析JSON失败：{}", e)))?;

    let Value::Array(items) = value else {
        return Err(SongbookError::InvalidFormat("无效的歌单数据格式".to_string()));
    };

    items
        .into_iter()
        .map(|item| {
            let mut song: Song = serde_json::from_value(item)
                .map_err(|e| SongbookError::InvalidFormat(format!("解析JSON失败：{}", e)))?;
            song.id = SongId::generate();
            Ok(song)
        })
        .collect()
}
