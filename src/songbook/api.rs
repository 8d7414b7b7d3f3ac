//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all songbook operations, whichever UI drives them.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (id prefixes typed by the user become full [`SongId`]s)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It owns the store for the length of a session, so the query pipeline and
//! the commands never reach for global state.
//!
//! `SongbookApi<S: DataStore>` is generic over the storage backend:
//! - Production: `SongbookApi<FileStore>`
//! - Testing: `SongbookApi<InMemoryStore>`

use crate::commands;
use crate::config::SongbookConfig;
use crate::error::{Result, SongbookError};
use crate::form::SongDraft;
use crate::model::{Song, SongId};
use crate::query::ViewQuery;
use crate::store::DataStore;
use crate::transfer::TransferFormat;
use std::path::{Path, PathBuf};

pub struct SongbookApi<S: DataStore> {
    store: S,
    config: SongbookConfig,
    config_dir: PathBuf,
}

impl<S: DataStore> SongbookApi<S> {
    pub fn new(store: S, config: SongbookConfig, config_dir: PathBuf) -> Self {
        Self {
            store,
            config,
            config_dir,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Warning left by a failed catalog load, if any.
    pub fn load_notice(&self) -> Option<&str> {
        self.store.load_notice()
    }

    pub fn list_songs(&self, query: &ViewQuery) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, query)
    }

    pub fn show_song(&self, id: &str) -> Result<commands::CmdResult> {
        let id = commands::helpers::resolve_id(&self.store, id)?;
        commands::show::run(&self.store, &id)
    }

    pub fn get_song(&self, id: &str) -> Result<Song> {
        let id = commands::helpers::resolve_id(&self.store, id)?;
        self.store.get_song(&id)
    }

    pub fn add_song(&mut self, draft: SongDraft) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, draft)
    }

    pub fn update_song(&mut self, id: &str, draft: SongDraft) -> Result<commands::CmdResult> {
        let id = commands::helpers::resolve_id(&self.store, id)?;
        commands::update::run(&mut self.store, &id, draft)
    }

    /// Removing an id that matches nothing is reported, not treated as an error.
    pub fn remove_song(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = match commands::helpers::resolve_id(&self.store, id) {
            Ok(id) => id,
            Err(SongbookError::SongNotFound(id)) => id,
            Err(e) => return Err(e),
        };
        commands::remove::run(&mut self.store, &id)
    }

    pub fn clear(&mut self) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.store)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    pub fn bulk_append(&mut self, songs: Vec<Song>) -> Result<commands::CmdResult> {
        commands::import::bulk_append(&mut self.store, songs)
    }

    pub fn export(&self, query: &ViewQuery, format: TransferFormat) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, query, format, &self.config.export_name)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn resolve_id(&self, id: &str) -> Result<SongId> {
        commands::helpers::resolve_id(&self.store, id)
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, DisplaySong, ExportedFile, MessageLevel};
