use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::SongDraft;
use crate::model::SongId;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, draft: SongDraft) -> Result<CmdResult> {
    let song = draft.into_song(SongId::generate())?;
    store.insert_song(song.clone())?;
    tracing::debug!(id = %song.id, title = %song.title(), "song added");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Song added ({}): {}",
        song.id.short(),
        song.title()
    )));
    Ok(result.with_affected_songs(vec![song]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SongbookError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn draft(title: &str) -> SongDraft {
        SongDraft {
            performers: vec!["花玲".into()],
            ..SongDraft::new(title)
        }
    }

    #[test]
    fn appends_with_fresh_id() {
        let mut fixture = StoreFixture::new().with_songs(2);
        let before = fixture.ids();
        let result = run(&mut fixture.store, draft("New")).unwrap();

        let songs = fixture.store.list_songs().unwrap();
        assert_eq!(songs.len(), 3);
        assert_eq!(songs[2].title(), "New");
        assert!(!before.contains(&songs[2].id));
        assert_eq!(result.affected_songs[0].id, songs[2].id);
    }

    #[test]
    fn invalid_draft_leaves_store_alone() {
        let mut store = InMemoryStore::new();
        let err = run(&mut store, SongDraft::new("No performer")).unwrap_err();
        assert!(matches!(err, SongbookError::Validation(_)));
        assert!(store.list_songs().unwrap().is_empty());
    }
}
