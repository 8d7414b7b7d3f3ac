//! CSV codec.
//!
//! Export writes one row per song with the columns in [`HEADER`]. Multi-value
//! fields are joined with `;`. Text fields that contain a comma, a quote or a
//! newline are quoted, with inner quotes doubled.
//!
//! Import reads the first line as headers and understands the same quoting, so
//! an exported file imports back without splitting titles at their commas.

use crate::error::{Result, SongbookError};
use crate::model::{Song, SongId};

pub const HEADER: &str = "歌名,歌手,语言,风格,演唱次数,最近演唱";

pub fn export(songs: &[&Song]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for song in songs {
        let row = [
            escape(song.title()),
            escape(&song.performers.join(";")),
            escape(&song.languages.join(";")),
            escape(&song.genres.join(";")),
            song.performance_count().to_string(),
            song.latest_performance_date().to_string(),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

pub fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Title,
    Performers,
    Languages,
    Genres,
}

fn column_for(header: &str) -> Option<Column> {
    match header.trim().trim_start_matches('\u{feff}').to_lowercase().as_str() {
        "歌名" | "title" => Some(Column::Title),
        "歌手" | "performers" | "performer" | "artist" => Some(Column::Performers),
        "语言" | "languages" | "language" => Some(Column::Languages),
        "风格" | "genres" | "genre" => Some(Column::Genres),
        _ => None,
    }
}

/// Parses CSV text into songs with fresh ids.
///
/// Blank lines are skipped. Unknown columns are ignored. Songs get no lives and
/// an empty note; the primary language is the first listed language.
pub fn import(text: &str) -> Result<Vec<Song>> {
    let mut rows = parse_rows(text)?.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| SongbookError::InvalidFormat("无效的歌单数据格式: 缺少标题行".to_string()))?;
    let columns: Vec<Option<Column>> = header.iter().map(|h| column_for(h)).collect();
    if !columns.contains(&Some(Column::Title)) {
        return Err(SongbookError::InvalidFormat(
            "无效的歌单数据格式: 缺少歌名列".to_string(),
        ));
    }

    let mut songs = Vec::new();
    for row in rows {
        if row.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        let mut song = Song {
            id: SongId::generate(),
            ..Default::default()
        };
        for (column, value) in columns.iter().zip(row.iter()) {
            let value = value.trim();
            match column {
                Some(Column::Title) => song.primary.title = value.to_string(),
                Some(Column::Performers) => song.performers = split_multi(value),
                Some(Column::Languages) => song.languages = split_multi(value),
                Some(Column::Genres) => song.genres = split_multi(value),
                None => {}
            }
        }
        song.primary.language = song.first_language().to_string();
        songs.push(song);
    }
    Ok(songs)
}

fn split_multi(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits CSV text into rows of fields, honouring quoted fields.
fn parse_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(SongbookError::InvalidFormat(
            "无效的歌单数据格式: 引号未闭合".to_string(),
        ));
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}
