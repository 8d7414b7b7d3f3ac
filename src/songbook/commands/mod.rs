use crate::config::SongbookConfig;
use crate::model::Song;

pub mod add;
pub mod clear;
pub mod config;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod remove;
pub mod show;
pub mod stats;
pub mod update;

pub use stats::CatalogStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A song as it appears in a view, with its 1-based row number.
#[derive(Debug, Clone)]
pub struct DisplaySong {
    pub row: usize,
    pub song: Song,
}

/// Serialized export, ready to be written under `filename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_songs: Vec<Song>,
    pub listed_songs: Vec<DisplaySong>,
    pub export: Option<ExportedFile>,
    pub stats: Option<CatalogStats>,
    pub config: Option<SongbookConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_songs(mut self, songs: Vec<Song>) -> Self {
        self.affected_songs = songs;
        self
    }

    pub fn with_listed_songs(mut self, songs: Vec<DisplaySong>) -> Self {
        self.listed_songs = songs;
        self
    }

    pub fn with_export(mut self, export: ExportedFile) -> Self {
        self.export = Some(export);
        self
    }

    pub fn with_stats(mut self, stats: CatalogStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_config(mut self, config: SongbookConfig) -> Self {
        self.config = Some(config);
        self
    }
}
