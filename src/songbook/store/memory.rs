use super::DataStore;
use crate::error::{Result, SongbookError};
use crate::model::{Song, SongId};

/// In-memory catalog for testing and embedding.
/// Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    songs: Vec<Song>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_songs(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }
}

impl DataStore for InMemoryStore {
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
        self.songs.push(song);
        Ok(())
    }

    fn replace_song(&mut self, song: Song) -> Result<()> {
        let slot = self
            .songs
            .iter_mut()
            .find(|s| s.id == song.id)
            .ok_or_else(|| SongbookError::SongNotFound(song.id.clone()))?;
        *slot = song;
        Ok(())
    }

    fn remove_song(&mut self, id: &SongId) -> Result<bool> {
        let before = self.songs.len();
        self.songs.retain(|s| &s.id != id);
        Ok(self.songs.len() != before)
    }

    fn append_songs(&mut self, songs: Vec<Song>) -> Result<()> {
        self.songs.extend(songs);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.songs.clear();
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::MediaLink;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_songs(mut self, count: usize) -> Self {
            for i in 0..count {
                let mut song = Song::new(format!("Test Song {}", i + 1));
                song.performers = vec![format!("Singer {}", i + 1)];
                self.store.insert_song(song).unwrap();
            }
            self
        }

        pub fn with_song(mut self, title: &str, performer: &str) -> Self {
            let mut song = Song::new(title);
            song.performers = vec![performer.to_string()];
            self.store.insert_song(song).unwrap();
            self
        }

        pub fn with_tagged_song(mut self, title: &str, languages: &[&str], genres: &[&str]) -> Self {
            let mut song = Song::new(title);
            song.performers = vec!["花玲".to_string()];
            song.languages = languages.iter().map(|s| s.to_string()).collect();
            song.genres = genres.iter().map(|s| s.to_string()).collect();
            if let Some(lang) = song.languages.first() {
                song.primary.language = lang.clone();
            }
            self.store.insert_song(song).unwrap();
            self
        }

        pub fn with_performed_song(mut self, title: &str, dates: &[&str]) -> Self {
            let mut song = Song::new(title);
            song.performers = vec!["花玲".to_string()];
            song.lives = dates
                .iter()
                .map(|d| MediaLink::new(format!("https://live.example/{}", d), "", *d))
                .collect();
            self.store.insert_song(song).unwrap();
            self
        }

        pub fn ids(&self) -> Vec<SongId> {
            self.store.songs().iter().map(|s| s.id.clone()).collect()
        }
    }
}
