use crate::commands::{CmdMessage, CmdResult, ExportedFile};
use crate::error::Result;
use crate::model::Song;
use crate::query::{view, ViewQuery};
use crate::store::DataStore;
use crate::transfer::{csv, json, TransferFormat};

/// Serializes songs for download.
///
/// CSV holds the current view, or the whole catalog when the view is empty.
/// JSON always holds the whole catalog.
pub fn run<S: DataStore>(
    store: &S,
    query: &ViewQuery,
    format: TransferFormat,
    basename: &str,
) -> Result<CmdResult> {
    let songs = store.list_songs()?;

    let (content, count) = match format {
        TransferFormat::Csv => {
            let visible = view(&songs, query);
            let rows: Vec<&Song> = if visible.is_empty() {
                songs.iter().collect()
            } else {
                visible
            };
            (csv::export(&rows), rows.len())
        }
        TransferFormat::Json => (json::export(&songs)?, songs.len()),
    };

    let filename = format.filename(basename);
    tracing::info!(filename = %filename, songs = count, "exporting");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} songs to {}",
        count, filename
    )));
    Ok(result.with_export(ExportedFile { filename, content }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::CategoryFilters;
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_tagged_song("Hello, World", &["英语"], &["流行"])
            .with_tagged_song("晴天", &["中文"], &[])
    }

    #[test]
    fn csv_exports_the_view() {
        let fixture = fixture();
        let query = ViewQuery::new().with_filters(CategoryFilters::new("英语", ""));
        let result = run(&fixture.store, &query, TransferFormat::Csv, "花玲歌单").unwrap();

        let file = result.export.unwrap();
        assert_eq!(file.filename, "花玲歌单.csv");
        let lines: Vec<&str> = file.content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "\"Hello, World\",花玲,英语,流行,0,");
    }

    #[test]
    fn csv_falls_back_to_catalog_when_view_is_empty() {
        let fixture = fixture();
        let query = ViewQuery::new().with_search("nothing-matches");
        let result = run(&fixture.store, &query, TransferFormat::Csv, "x").unwrap();
        assert_eq!(result.export.unwrap().content.lines().count(), 3);
    }

    #[test]
    fn json_exports_whole_catalog() {
        let fixture = fixture();
        let query = ViewQuery::new().with_search("晴天");
        let result = run(&fixture.store, &query, TransferFormat::Json, "花玲歌单").unwrap();

        let file = result.export.unwrap();
        assert_eq!(file.filename, "花玲歌单.json");
        let parsed: Vec<Song> = serde_json::from_str(&file.content).unwrap();
        assert_eq!(parsed, fixture.store.list_songs().unwrap());
    }
}
