use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let count = store.list_songs()?.len();
    store.clear()?;
    tracing::info!(removed = count, "catalog cleared");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Cleared {} songs", count)));
    Ok(result)
}
