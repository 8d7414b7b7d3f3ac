//! # Storage Layer
//!
//! The [`DataStore`] trait holds the catalog: the full, ordered collection of
//! songs. Order matters, since it is the default view order.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: the catalog JSON file (`playlist.json` by default)
//!   - Loaded once when opened; every mutation writes the whole array back
//!   - A missing or unreadable file opens as an empty catalog with a load notice
//!
//! - [`memory::InMemoryStore`]: in-memory storage for tests and embedding
//!
//! Views are never cached here. The query pipeline recomputes them from
//! [`DataStore::list_songs`] on demand, so mutations need no invalidation step.

use crate::error::Result;
use crate::model::{Song, SongId};

pub mod fs;
pub mod memory;

/// Message shown when the catalog could not be loaded at startup.
pub const LOAD_FAILURE_NOTICE: &str = "无法加载歌单数据，请检查playlist.json文件";

/// Abstract interface for the song catalog.
pub trait DataStore {
    /// All songs in catalog order.
    fn list_songs(&self) -> Result<Vec<Song>>;

    fn get_song(&self, id: &SongId) -> Result<Song>;

    /// Append a song at the end of the catalog.
    fn insert_song(&mut self, song: Song) -> Result<()>;

    /// Replace the song with the same id, keeping its position.
    fn replace_song(&mut self, song: Song) -> Result<()>;

    /// Remove a song. Returns `false` when no song had that id.
    fn remove_song(&mut self, id: &SongId) -> Result<bool>;

    fn append_songs(&mut self, songs: Vec<Song>) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    /// Warning produced while loading, if the catalog fell back to empty.
    fn load_notice(&self) -> Option<&str> {
        None
    }
}
