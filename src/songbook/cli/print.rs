use colored::Colorize;
use songbook::api::{CmdMessage, DisplaySong, MessageLevel};
use songbook::commands::CatalogStats;
use songbook::config::SongbookConfig;
use songbook::model::{display_date, LiveLink, MediaLink, Song};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_WIDTH: usize = 28;
const PERFORMER_WIDTH: usize = 16;
const TAG_WIDTH: usize = 10;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Transient notice, kept off stdout so listings stay clean.
pub(super) fn print_notice(notice: &str) {
    eprintln!("{}", notice.yellow());
}

pub(super) fn print_songs(songs: &[DisplaySong]) {
    if songs.is_empty() {
        println!("No songs found.");
        return;
    }

    for ds in songs {
        let row = format!("{:>3}. ", ds.row);
        let id = pad_to_width(ds.song.id.short(), 9);
        let columns = format_columns(&ds.song);
        let (live, has_link) = live_cell(&ds.song);
        let live = if has_link { live.cyan() } else { live.dimmed() };
        println!("{}{}{}{}", row, id.dimmed(), columns, live);
    }
}

/// Title, performers, languages, genres and count, each padded to its column.
fn format_columns(song: &Song) -> String {
    let cell = |text: &str, width: usize| pad_to_width(&truncate_to_width(text, width), width + 2);
    format!(
        "{}{}{}{}{:>3}  ",
        cell(song.title(), TITLE_WIDTH),
        cell(&song.performers.join(", "), PERFORMER_WIDTH),
        cell(&song.languages.join("/"), TAG_WIDTH),
        cell(&song.genres.join("/"), TAG_WIDTH),
        song.performance_count()
    )
}

/// Text for the latest-live column and whether it points at a recording.
fn live_cell(song: &Song) -> (String, bool) {
    match song.live_link() {
        LiveLink::NoLives => ("无歌回记录".to_string(), false),
        LiveLink::NoLink => ("无录播链接".to_string(), false),
        LiveLink::Link(live) if live.date.trim().is_empty() => ("查看录播".to_string(), true),
        LiveLink::Link(live) => (display_date(&live.date), true),
    }
}

pub(super) fn print_full_song(ds: &DisplaySong) {
    let song = &ds.song;
    println!(
        "{} {}",
        format!("{}.", ds.row).yellow(),
        song.title().bold()
    );
    println!("--------------------------------");
    print_field("id", song.id.as_str());
    print_field("language", &song.primary.language);
    for alias in &song.aliases {
        let text = if alias.language.is_empty() {
            alias.title.clone()
        } else {
            format!("{} ({})", alias.title, alias.language)
        };
        print_field("alias", &text);
    }
    print_field("performers", &song.performers.join(", "));
    print_field("lyricists", &song.lyricists.join(", "));
    print_field("composers", &song.composers.join(", "));
    print_field("arrangers", &song.arrangers.join(", "));
    print_field("languages", &song.languages.join(", "));
    print_field("genres", &song.genres.join(", "));
    print_field("performed", &song.performance_count().to_string());
    print_field("latest", &live_cell(song).0);

    print_links("videos", &song.videos);
    print_links("lives", &song.lives);
    print_links("clips", &song.clips);

    if !song.note.is_empty() {
        println!();
        println!("{}", song.note);
    }
}

fn print_field(label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    println!("{} {}", pad_to_width(label, 12).dimmed(), value);
}

fn print_links(label: &str, links: &[MediaLink]) {
    if links.is_empty() {
        return;
    }
    println!();
    println!("{}", label.bold());
    for link in links {
        let mut parts: Vec<String> = Vec::new();
        if !link.date.is_empty() {
            parts.push(display_date(&link.date));
        }
        if let Some(kind) = &link.kind {
            parts.push(format!("[{}]", kind));
        }
        if !link.title.is_empty() {
            parts.push(link.title.clone());
        }
        if !link.note.is_empty() {
            parts.push(format!("({})", link.note));
        }
        println!("  - {} {}", parts.join(" "), link.url.cyan());
    }
}

pub(super) fn print_stats(stats: &CatalogStats) {
    println!("{} 首歌曲", stats.song_count);
    println!("{} 位歌手", stats.performer_count);
    if !stats.languages.is_empty() {
        println!();
        for share in &stats.languages {
            println!(
                "  {}{:>4}  {:>3}%",
                pad_to_width(&share.language, TAG_WIDTH),
                share.songs,
                share.percent
            );
        }
    }
    if !stats.language_labels.is_empty() || !stats.genres.is_empty() {
        println!();
    }
    if !stats.language_labels.is_empty() {
        println!("{} {}", "languages".dimmed(), stats.language_labels.join(", "));
    }
    if !stats.genres.is_empty() {
        println!("{} {}", "genres".dimmed(), stats.genres.join(", "));
    }
}

pub(super) fn print_config(config: &SongbookConfig) {
    for key in SongbookConfig::KEYS {
        println!("{} = {}", key, config.get(key).unwrap_or_default());
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let current = s.width();
    format!("{}{}", s, " ".repeat(width.saturating_sub(current)))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
