//! Free-text search stage.
//!
//! The query is split on whitespace; every keyword must appear (case-insensitive)
//! in at least one of the primary title, the performer names joined with a
//! space, or the alias titles joined with a space.

use crate::model::Song;

pub fn keywords(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

pub fn matches(song: &Song, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return true;
    }

    let title = song.primary.title.to_lowercase();
    let performers = song.performers.join(" ").to_lowercase();
    let aliases = song
        .aliases
        .iter()
        .map(|alias| alias.title.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    keywords.iter().all(|keyword| {
        title.contains(keyword.as_str())
            || performers.contains(keyword.as_str())
            || aliases.contains(keyword.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SongTitle;

    fn song(title: &str, performers: &[&str]) -> Song {
        Song {
            performers: performers.iter().map(|p| p.to_string()).collect(),
            ..Song::new(title)
        }
    }

    #[test]
    fn keywords_drop_empty_tokens() {
        assert_eq!(keywords("  Moon   ANN "), vec!["moon", "ann"]);
        assert!(keywords("   ").is_empty());
    }

    #[test]
    fn every_keyword_must_match_somewhere() {
        let moon = song("Moon Song", &["Ann"]);
        let sun = song("Sun Song", &["Ann"]);

        let q = keywords("song ann");
        assert!(matches(&moon, &q));
        assert!(matches(&sun, &q));

        let q = keywords("moon ann");
        assert!(matches(&moon, &q));
        assert!(!matches(&sun, &q));
    }

    #[test]
    fn aliases_are_searched() {
        let mut s = song("千本桜", &["初音ミク"]);
        s.aliases.push(SongTitle::new("Senbonzakura", "日语"));
        assert!(matches(&s, &keywords("senbon")));
        assert!(!matches(&s, &keywords("sakura miku")));
    }

    #[test]
    fn performer_join_spans_names() {
        let s = song("Duet", &["Ann", "Bob"]);
        assert!(matches(&s, &keywords("ann bob")));
        assert!(matches(&s, &keywords("n b")));
    }
}
