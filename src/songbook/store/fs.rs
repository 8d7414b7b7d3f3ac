use super::{DataStore, LOAD_FAILURE_NOTICE};
use crate::error::{Result, SongbookError};
use crate::model::{Song, SongId};
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog backed by a single JSON array file.
///
/// The file is read once in [`FileStore::open`]. Mutations update the in-memory
/// copy and then rewrite the whole file, pretty-printed.
pub struct FileStore {
    path: PathBuf,
    songs: Vec<Song>,
    writable: bool,
    notice: Option<String>,
}

impl FileStore {
    /// Opens the catalog at `path`. Never fails.
    ///
    /// A missing file yields an empty catalog that is created on first write.
    /// An unreadable or malformed file also yields an empty catalog, but the
    /// store stays read-only so the original file is left untouched.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::load(&path) {
            Ok(songs) => {
                tracing::debug!(path = %path.display(), songs = songs.len(), "catalog loaded");
                Self {
                    path,
                    songs,
                    writable: true,
                    notice: None,
                }
            }
            Err(err) => {
                let exists = path.exists();
                tracing::warn!(path = %path.display(), error = %err, "falling back to empty catalog");
                Self {
                    path,
                    songs: Vec::new(),
                    writable: !exists,
                    notice: Some(LOAD_FAILURE_NOTICE.to_string()),
                }
            }
        }
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    fn load(path: &Path) -> Result<Vec<Song>> {
        let content = fs::read_to_string(path).map_err(SongbookError::Io)?;
        let mut songs: Vec<Song> =
            serde_json::from_str(&content).map_err(SongbookError::Serialization)?;

        // Older catalogs may have records without ids.
        for song in songs.iter_mut().filter(|s| s.id.is_empty()) {
            song.id = SongId::generate();
        }
        Ok(songs)
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.writable {
            return Ok(());
        }
        Err(SongbookError::Store(format!(
            "{} could not be read at startup; refusing to overwrite it",
            self.path.display()
        )))
    }

    fn persist(&self) -> Result<()> {
        self.ensure_writable()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(SongbookError::Io)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.songs).map_err(SongbookError::Serialization)?;
        fs::write(&self.path, content).map_err(SongbookError::Io)?;
        tracing::debug!(path = %self.path.display(), songs = self.songs.len(), "catalog written");
        Ok(())
    }

    /// Applies `change` to the songs and writes them out, restoring the
    /// previous state if the write fails.
    fn mutate<T>(&mut self, change: impl FnOnce(&mut Vec<Song>) -> Result<T>) -> Result<T> {
        self.ensure_writable()?;
        let backup = self.songs.clone();
        let out = change(&mut self.songs)?;
        if let Err(err) = self.persist() {
            self.songs = backup;
            return Err(err);
        }
        Ok(out)
    }
}

impl DataStore for FileStore {
    fn list_songs(&self) -> Result<Vec<Song>> {
        Ok(self.songs.clone())
    }

    fn get_song(&self, id: &SongId) -> Result<Song> {
        self.songs
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| SongbookError::SongNotFound(id.clone()))
    }

    fn insert_song(&mut self, song: Song) -> Result<()> {
        self.mutate(|songs| {
            songs.push(song);
            Ok(())
        })
    }

    fn replace_song(&mut self, song: Song) -> Result<()> {
        self.mutate(|songs| {
            let slot = songs
                .iter_mut()
                .find(|s| s.id == song.id)
                .ok_or_else(|| SongbookError::SongNotFound(song.id.clone()))?;
            *slot = song;
            Ok(())
        })
    }

    fn remove_song(&mut self, id: &SongId) -> Result<bool> {
        if !self.songs.iter().any(|s| &s.id == id) {
            return Ok(false);
        }
        self.mutate(|songs| {
            songs.retain(|s| &s.id != id);
            Ok(true)
        })
    }

    fn append_songs(&mut self, incoming: Vec<Song>) -> Result<()> {
        self.mutate(|songs| {
            songs.extend(incoming);
            Ok(())
        })
    }

    fn clear(&mut self) -> Result<()> {
        self.mutate(|songs| {
            songs.clear();
            Ok(())
        })
    }

    fn load_notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_opens_empty_and_is_created_on_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("playlist.json");
        let mut store = FileStore::open(&path);

        assert!(store.list_songs().unwrap().is_empty());
        assert_eq!(store.load_notice(), Some(LOAD_FAILURE_NOTICE));
        assert!(store.is_writable());

        store.insert_song(Song::new("First")).unwrap();
        let reopened = FileStore::open(&path);
        assert!(reopened.load_notice().is_none());
        assert_eq!(reopened.list_songs().unwrap()[0].title(), "First");
    }

    #[test]
    fn malformed_file_is_never_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("playlist.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::open(&path);
        assert!(store.list_songs().unwrap().is_empty());
        assert!(store.load_notice().is_some());
        assert!(!store.is_writable());

        let err = store.insert_song(Song::new("x")).unwrap_err();
        assert!(matches!(err, SongbookError::Store(_)));
        assert!(store.list_songs().unwrap().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn records_without_ids_get_one_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("playlist.json");
        fs::write(
            &path,
            r#"[{"primary":{"title":"A","language":""}},{"id":7,"primary":{"title":"B"}}]"#,
        )
        .unwrap();

        let store = FileStore::open(&path);
        let songs = store.list_songs().unwrap();
        assert!(!songs[0].id.is_empty());
        assert_eq!(songs[1].id.as_str(), "7");
    }

    #[test]
    fn non_integer_ids_keep_the_catalog_writable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("playlist.json");
        fs::write(
            &path,
            r#"[{"id":2.5,"primary":{"title":"A"}},{"id":18446744073709551615,"primary":{"title":"B"}}]"#,
        )
        .unwrap();

        let mut store = FileStore::open(&path);
        assert!(store.load_notice().is_none());
        let ids: Vec<String> = store
            .list_songs()
            .unwrap()
            .iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, vec!["2.5", "18446744073709551615"]);

        store.insert_song(Song::new("C")).unwrap();
        assert_eq!(store.list_songs().unwrap().len(), 3);
    }

    #[test]
    fn writes_pretty_json_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("playlist.json");
        let mut store = FileStore::open(&path);
        store
            .append_songs(vec![Song::new("One"), Song::new("Two")])
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n  {"));
        let parsed: Vec<Song> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 2);

        store.clear().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn removing_absent_id_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("playlist.json");
        let mut store = FileStore::open(&path);
        store.insert_song(Song::new("Keep")).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        assert!(!store.remove_song(&SongId::new("nope")).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
