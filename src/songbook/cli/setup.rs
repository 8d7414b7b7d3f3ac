use clap::{Args, CommandFactory, Parser, Subcommand};
use songbook::query::{SortDirection, SortField};
use songbook::transfer::TransferFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "songbook",
    bin_name = "songbook",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Song playlist catalog: filter, sort, edit, import and export", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog file (defaults to the configured catalog, playlist.json)
    #[arg(long, global = true, env = "SONGBOOK_CATALOG", help_heading = "Options")]
    pub catalog: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    View,
    Song,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::View => "View Commands:",
            CommandGroup::Song => "Per-Song Commands:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "search" | "stats" => Some(CommandGroup::View),
            "show" | "add" | "edit" | "delete" => Some(CommandGroup::Song),
            "import" | "export" | "clear" => Some(CommandGroup::Data),
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::View,
            CommandGroup::Song,
            CommandGroup::Data,
            CommandGroup::Misc,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("songbook {version}\n"));
    output.push_str("Song playlist catalog: filter, sort, edit, import and export\n");
    output.push('\n');
    output.push_str("Usage: songbook [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --catalog <PATH>  Catalog file [env: SONGBOOK_CATALOG]\n");
    output.push_str("  -v, --verbose         Verbose output\n");
    output.push_str("  -h, --help            Print help\n");
    output.push_str("  -V, --version         Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::View(c)) => match c {
            ViewCommands::List { .. } => "list",
            ViewCommands::Search { .. } => "search",
            ViewCommands::Stats => "stats",
        },
        Some(Commands::Song(c)) => match c {
            SongCommands::Show { .. } => "show",
            SongCommands::Add { .. } => "add",
            SongCommands::Edit { .. } => "edit",
            SongCommands::Delete { .. } => "delete",
        },
        Some(Commands::Data(c)) => match c {
            DataCommands::Import { .. } => "import",
            DataCommands::Export { .. } => "export",
            DataCommands::Clear { .. } => "clear",
        },
        Some(Commands::Misc(c)) => match c {
            MiscCommands::Config { .. } => "config",
            MiscCommands::Help { .. } => "help",
        },
        None => {
            print_grouped_help();
            return;
        }
    };

    print_help_for_command(name);
}

pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    View(ViewCommands),

    #[command(flatten)]
    Song(SongCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

/// Sort flags shared by every command that produces a view.
#[derive(Args, Debug, Clone, Default)]
pub struct SortArgs {
    /// Sort field: id, title, artist, language, genre, performance or date
    #[arg(long, value_parser = str::parse::<SortField>)]
    pub sort: Option<SortField>,

    /// Sort direction: asc or desc
    #[arg(long, value_parser = str::parse::<SortDirection>, conflicts_with = "desc")]
    pub order: Option<SortDirection>,

    /// Sort descending (same as --order desc)
    #[arg(long)]
    pub desc: bool,
}

/// Search text and drop-down filters.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only songs with this language (未知 matches songs without one)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Only songs with this genre (未知 matches songs without one)
    #[arg(short, long)]
    pub genre: Option<String>,
}

/// Per-field criteria shared by `search` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Title contains
    #[arg(long)]
    pub title: Option<String>,

    /// Any performer contains
    #[arg(long)]
    pub performer: Option<String>,

    /// Any lyricist contains
    #[arg(long)]
    pub lyricist: Option<String>,

    /// Any composer contains
    #[arg(long)]
    pub composer: Option<String>,

    /// Any arranger contains
    #[arg(long)]
    pub arranger: Option<String>,

    /// Minimum number of live performances
    #[arg(long)]
    pub min: Option<String>,

    /// Maximum number of live performances
    #[arg(long)]
    pub max: Option<String>,

    /// Latest performance on or after (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest performance on or before (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

impl FieldArgs {
    pub fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.performer,
            &self.lyricist,
            &self.composer,
            &self.arranger,
            &self.min,
            &self.max,
            &self.from,
            &self.to,
        ]
        .iter()
        .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct AdvancedArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Exact language
    #[arg(long)]
    pub language: Option<String>,

    /// Exact genre
    #[arg(long)]
    pub genre: Option<String>,
}

/// Fields of the add form.
#[derive(Args, Debug, Clone, Default)]
pub struct SongArgs {
    /// Performer (repeatable, at least one required)
    #[arg(short, long = "performer")]
    pub performers: Vec<String>,

    /// Language of the title
    #[arg(short, long)]
    pub language: Option<String>,

    /// Additional language (repeatable)
    #[arg(long = "also")]
    pub other_languages: Vec<String>,

    /// Lyricist (repeatable)
    #[arg(long = "lyricist")]
    pub lyricists: Vec<String>,

    /// Composer (repeatable)
    #[arg(long = "composer")]
    pub composers: Vec<String>,

    /// Arranger (repeatable)
    #[arg(long = "arranger")]
    pub arrangers: Vec<String>,

    /// Genre (repeatable)
    #[arg(short, long = "genre")]
    pub genres: Vec<String>,

    /// Alias title, optionally with its language: TITLE[:LANGUAGE]
    #[arg(long = "alias")]
    pub aliases: Vec<String>,

    /// Live recording: DATE,URL[,TITLE]
    #[arg(long = "live")]
    pub lives: Vec<String>,

    /// Video: URL[,TITLE[,TYPE]]
    #[arg(long = "video")]
    pub videos: Vec<String>,

    /// Clip: DATE,URL[,TITLE]
    #[arg(long = "clip")]
    pub clips: Vec<String>,

    /// Free-text note
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ViewCommands {
    /// List songs, optionally searched and filtered
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Search words (every word must match title, performers or aliases)
        #[arg(trailing_var_arg = true)]
        search: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        sort: SortArgs,
    },

    /// Field-by-field search
    #[command(display_order = 2)]
    Search {
        #[command(flatten)]
        advanced: AdvancedArgs,

        #[command(flatten)]
        sort: SortArgs,
    },

    /// Catalog statistics
    #[command(display_order = 3)]
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum SongCommands {
    /// Show every field of a song
    #[command(alias = "v", display_order = 10)]
    Show {
        /// Song id or unique id prefix
        id: String,
    },

    /// Add a song
    #[command(alias = "n", display_order = 11)]
    Add {
        /// Title
        title: Option<String>,

        #[command(flatten)]
        fields: SongArgs,

        /// Review the song in $EDITOR before saving
        #[arg(short, long)]
        edit: bool,
    },

    /// Edit a song in $EDITOR
    #[command(alias = "e", display_order = 12)]
    Edit {
        /// Song id or unique id prefix
        id: String,
    },

    /// Delete a song
    #[command(alias = "rm", display_order = 13)]
    Delete {
        /// Song id or unique id prefix
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Import songs from a .csv or .json file
    #[command(display_order = 20)]
    Import { path: PathBuf },

    /// Export songs as CSV (current view) or JSON (whole catalog)
    #[command(display_order = 21)]
    Export {
        /// csv or json
        #[arg(short, long, value_parser = str::parse::<TransferFormat>, default_value = "csv")]
        format: TransferFormat,

        /// Output file or directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Search text applied before exporting CSV
        #[arg(
            short,
            long,
            conflicts_with_all = [
                "title", "performer", "lyricist", "composer", "arranger", "min", "max", "from", "to"
            ]
        )]
        search: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        fields: FieldArgs,

        #[command(flatten)]
        sort: SortArgs,
    },

    /// Remove every song from the catalog
    #[command(display_order = 22)]
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration (keys: catalog, export-name)
    #[command(display_order = 30)]
    Config {
        key: Option<String>,
        value: Option<String>,
    },

    /// Print help for a command
    #[command(display_order = 31)]
    Help { command: Option<String> },
}
