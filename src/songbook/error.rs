use crate::model::SongId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongbookError {
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    #[error("Id prefix \"{0}\" matches more than one song")]
    AmbiguousId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("不支持的文件格式: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("Invalid song: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SongbookError>;
