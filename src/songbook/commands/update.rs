use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::form::SongDraft;
use crate::model::SongId;
use crate::store::DataStore;

/// Replaces every editable field of the song `id`, keeping id and position.
pub fn run<S: DataStore>(store: &mut S, id: &SongId, draft: SongDraft) -> Result<CmdResult> {
    // Fail with SongNotFound before validating the draft.
    store.get_song(id)?;
    let song = draft.into_song(id.clone())?;
    store.replace_song(song.clone())?;
    tracing::debug!(id = %song.id, "song updated");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Song updated ({}): {}",
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

    #[test]
    fn replaces_fields_in_place() {
        let mut fixture = StoreFixture::new().with_songs(3);
        let ids = fixture.ids();

        let draft = SongDraft {
            performers: vec!["Someone".into()],
            genres: vec!["摇滚".into()],
            ..SongDraft::new("Renamed")
        };
        run(&mut fixture.store, &ids[1], draft).unwrap();

        let songs = fixture.store.list_songs().unwrap();
        assert_eq!(songs[1].id, ids[1]);
        assert_eq!(songs[1].title(), "Renamed");
        assert_eq!(songs[1].genres, vec!["摇滚"]);
        assert_eq!(songs[0].title(), "Test Song 1");
    }

    #[test]
    fn missing_id_is_not_found() {
        let mut fixture = StoreFixture::new().with_songs(1);
        let err = run(
            &mut fixture.store,
            &SongId::new("missing"),
            SongDraft::new("x"),
        )
        .unwrap_err();
        assert!(matches!(err, SongbookError::SongNotFound(_)));
    }
}
