use crate::commands::helpers::numbered;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::query::{view, ViewQuery};
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, query: &ViewQuery) -> Result<CmdResult> {
    let songs = store.list_songs()?;
    let visible = view(&songs, query);
    tracing::debug!(total = songs.len(), shown = visible.len(), "view computed");

    let mut result = CmdResult::default();
    if visible.is_empty() && !songs.is_empty() {
        result.add_message(CmdMessage::info("No songs match the current filters"));
    }
    Ok(result.with_listed_songs(numbered(visible)))
}
