use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Label that stands for "no language/genre recorded" in category filters.
pub const UNKNOWN_LABEL: &str = "未知";

/// Opaque song identifier.
///
/// Catalogs written by older tools carry numeric ids. Deserialization keeps
/// strings as they are and stringifies any other JSON value. Newly minted ids
/// are v4 UUIDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First eight characters, used in table listings.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((pos, _)) => &self.0[..pos],
            None => &self.0,
        }
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SongId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => SongId(s),
            serde_json::Value::Null => SongId::default(),
            other => SongId(other.to_string()),
        })
    }
}

/// Treats an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A title paired with the language it is written in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongTitle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
}

impl SongTitle {
    pub fn new(title: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
        }
    }
}

/// A video, live recording or clip attached to a song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    /// Only videos carry a kind (官方 / 翻唱 / 其他).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl MediaLink {
    pub fn new(url: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub id: SongId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary: SongTitle,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aliases: Vec<SongTitle>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub performers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lyricists: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub composers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arrangers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<MediaLink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lives: Vec<MediaLink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clips: Vec<MediaLink>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
}

/// Outcome of picking the live recording shown in the "latest" column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveLink<'a> {
    /// The song has never been performed live.
    NoLives,
    /// Lives exist but none has a recording URL.
    NoLink,
    Link(&'a MediaLink),
}

impl Song {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SongId::generate(),
            primary: SongTitle::new(title, ""),
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.primary.title
    }

    pub fn first_performer(&self) -> &str {
        self.performers.first().map(String::as_str).unwrap_or("")
    }

    pub fn first_language(&self) -> &str {
        self.languages.first().map(String::as_str).unwrap_or("")
    }

    pub fn first_genre(&self) -> &str {
        self.genres.first().map(String::as_str).unwrap_or("")
    }

    pub fn performance_count(&self) -> usize {
        self.lives.len()
    }

    /// The live performance with the chronologically latest parseable date.
    ///
    /// Entries with an empty or unparseable date are skipped; URL presence does
    /// not matter here. Ties keep the first maximal entry.
    pub fn latest_performance(&self) -> Option<&MediaLink> {
        let mut latest: Option<(&MediaLink, i64)> = None;
        for live in &self.lives {
            let Some(ts) = date_timestamp(&live.date) else {
                continue;
            };
            match latest {
                Some((_, best)) if ts <= best => {}
                _ => latest = Some((live, ts)),
            }
        }
        latest.map(|(live, _)| live)
    }

    /// Date string of [`Song::latest_performance`], or `""` when there is none.
    pub fn latest_performance_date(&self) -> &str {
        self.latest_performance()
            .map(|live| live.date.as_str())
            .unwrap_or("")
    }

    /// Picks the live recording to link from a listing.
    ///
    /// Stricter than [`Song::latest_performance`]: only entries with a URL
    /// qualify. Dates compare as strings and an undated entry loses to any dated
    /// one, so the winner may still have an empty date.
    pub fn live_link(&self) -> LiveLink<'_> {
        if self.lives.is_empty() {
            return LiveLink::NoLives;
        }

        let mut linked = self.lives.iter().filter(|live| live.has_url());
        let Some(first) = linked.next() else {
            return LiveLink::NoLink;
        };

        let latest = linked.fold(first, |latest, current| {
            if current.date.trim().is_empty() {
                latest
            } else if latest.date.trim().is_empty() || current.date > latest.date {
                current
            } else {
                latest
            }
        });
        LiveLink::Link(latest)
    }
}

/// Parses a performance date into milliseconds since the Unix epoch (UTC).
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, naive `YYYY-MM-DDTHH:MM[:SS]` and RFC 3339.
/// Month and day may be written without zero padding (`2024-1-5`).
pub fn date_timestamp(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis());
        }
    }
    None
}

/// Calendar date (UTC) of a performance date string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    date_timestamp(raw)
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.date_naive())
}

/// Formats a performance date for display as `YYYY/MM/DD`.
pub fn display_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return "未知日期".to_string();
    }
    match parse_date(raw) {
        Some(date) => date.format("%Y/%m/%d").to_string(),
        None => "无效日期".to_string(),
    }
}
