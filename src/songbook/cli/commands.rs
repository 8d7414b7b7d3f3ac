//! # CLI Layer
//!
//! This module is **one possible UI client** for songbook. It is the **only**
//! place that parses arguments, knows about stdout/stderr, and formats output
//! for humans.
//!
//! Each invocation is one session: build the context (config, catalog store,
//! API), run a single handler, print its `CmdResult`. Mutating handlers write
//! the catalog back through the store.
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::print::{
    print_config, print_full_song, print_messages, print_notice, print_songs, print_stats,
};
use super::setup::{
    print_grouped_help, print_help_for_command, print_subcommand_help, AdvancedArgs, Cli,
    Commands, DataCommands, FieldArgs, FilterArgs, MiscCommands, SongArgs, SongCommands,
    SortArgs, ViewCommands,
};
use clap::Parser;
use songbook::api::{ConfigAction, SongbookApi};
use songbook::config::{config_dir, SongbookConfig};
use songbook::editor::edit_draft;
use songbook::error::{Result, SongbookError};
use songbook::form::SongDraft;
use songbook::model::{parse_date, MediaLink, SongTitle};
use songbook::query::{
    parse_count_bound, AdvancedFilter, CategoryFilters, SortDirection, SortSpec, ViewQuery,
};
use songbook::store::fs::FileStore;
use songbook::store::DataStore;
use songbook::transfer::TransferFormat;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: SongbookApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        match command {
            Some(name) => print_help_for_command(name),
            None => print_grouped_help(),
        }
        return Ok(());
    }

    let mut ctx = init_context(&cli)?;

    let uses_catalog = !matches!(cli.command, Some(Commands::Misc(_)));
    if uses_catalog {
        if let Some(notice) = ctx.api.load_notice() {
            print_notice(notice);
        }
    }

    match cli.command {
        Some(Commands::View(cmd)) => match cmd {
            ViewCommands::List {
                search,
                filters,
                sort,
            } => handle_list(&mut ctx, search, filters, sort),
            ViewCommands::Search { advanced, sort } => handle_search(&mut ctx, advanced, sort),
            ViewCommands::Stats => handle_stats(&mut ctx),
        },
        Some(Commands::Song(cmd)) => match cmd {
            SongCommands::Show { id } => handle_show(&mut ctx, &id),
            SongCommands::Add {
                title,
                fields,
                edit,
            } => handle_add(&mut ctx, title, fields, edit),
            SongCommands::Edit { id } => handle_edit(&mut ctx, &id),
            SongCommands::Delete { id } => handle_delete(&mut ctx, &id),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Import { path } => handle_import(&mut ctx, path),
            DataCommands::Export {
                format,
                output,
                search,
                filters,
                fields,
                sort,
            } => {
                let query = export_query(search, filters, fields, &sort)?;
                handle_export(&mut ctx, format, output, query)
            }
            DataCommands::Clear { yes } => handle_clear(&mut ctx, yes),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
            MiscCommands::Help { .. } => Ok(()),
        },
        None => handle_list(&mut ctx, Vec::new(), FilterArgs::default(), SortArgs::default()),
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = config_dir()?;
    let config = SongbookConfig::load(&config_dir).unwrap_or_default();

    let catalog = cli.catalog.clone().unwrap_or_else(|| config.catalog_path());
    tracing::debug!(catalog = %catalog.display(), config_dir = %config_dir.display(), "session start");

    let store = FileStore::open(catalog);
    Ok(AppContext {
        api: SongbookApi::new(store, config, config_dir),
    })
}

fn handle_list(
    ctx: &mut AppContext,
    search: Vec<String>,
    filters: FilterArgs,
    sort: SortArgs,
) -> Result<()> {
    let mut query = ViewQuery::new()
        .with_filters(category_filters(filters))
        .with_sort(sort_spec(&sort));
    if !search.is_empty() {
        query = query.with_search(search.join(" "));
    }

    let result = ctx.api.list_songs(&query)?;
    print_songs(&result.listed_songs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, advanced: AdvancedArgs, sort: SortArgs) -> Result<()> {
    let query = ViewQuery::new()
        .with_advanced(advanced_filter(
            advanced.fields,
            advanced.language.unwrap_or_default(),
            advanced.genre.unwrap_or_default(),
        )?)
        .with_sort(sort_spec(&sort));
    let result = ctx.api.list_songs(&query)?;
    print_songs(&result.listed_songs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show_song(id)?;
    for ds in &result.listed_songs {
        print_full_song(ds);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    title: Option<String>,
    fields: SongArgs,
    edit: bool,
) -> Result<()> {
    let open_editor = edit || title.is_none();
    let mut draft = song_draft(title.unwrap_or_default(), fields)?;
    if open_editor {
        draft = edit_draft(&draft)?;
    }

    let result = ctx.api.add_song(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, id: &str) -> Result<()> {
    let song = ctx.api.get_song(id)?;
    let initial = SongDraft::from_song(&song);
    let edited = edit_draft(&initial)?;

    if edited == initial {
        println!("No changes.");
        return Ok(());
    }

    let result = ctx.api.update_song(song.id.as_str(), edited)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.remove_song(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: PathBuf) -> Result<()> {
    let result = ctx.api.import_file(&path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(
    ctx: &mut AppContext,
    format: TransferFormat,
    output: Option<PathBuf>,
    query: ViewQuery,
) -> Result<()> {
    let result = ctx.api.export(&query, format)?;
    if let Some(file) = &result.export {
        let target = match output {
            Some(path) if path.is_dir() => path.join(&file.filename),
            Some(path) => path,
            None => PathBuf::from(&file.filename),
        };
        std::fs::write(&target, &file.content).map_err(SongbookError::Io)?;
        tracing::debug!(path = %target.display(), "export written");
    }
    print_messages(&result.messages);
    Ok(())
}

/// The view an export covers: either the `list` search or the `search` field
/// criteria, plus the category filters and sort.
fn export_query(
    search: Option<String>,
    filters: FilterArgs,
    fields: FieldArgs,
    sort: &SortArgs,
) -> Result<ViewQuery> {
    let mut query = ViewQuery::new()
        .with_filters(category_filters(filters))
        .with_sort(sort_spec(sort));
    if let Some(text) = search {
        query = query.with_search(text);
    }
    if !fields.is_empty() {
        query = query.with_advanced(advanced_filter(fields, String::new(), String::new())?);
    }
    Ok(query)
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        let count = ctx.api.store().list_songs()?.len();
        print!("Remove all {} songs from the catalog? [y/N] ", count);
        std::io::stdout().flush().map_err(SongbookError::Io)?;

        let mut answer = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(SongbookError::Io)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let result = ctx.api.clear()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}

fn sort_spec(args: &SortArgs) -> SortSpec {
    let direction = args.order.unwrap_or(if args.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    });
    SortSpec::new(args.sort.unwrap_or_default(), direction)
}

fn category_filters(args: FilterArgs) -> CategoryFilters {
    CategoryFilters::new(
        args.language.unwrap_or_default(),
        args.genre.unwrap_or_default(),
    )
}

fn advanced_filter(args: FieldArgs, language: String, genre: String) -> Result<AdvancedFilter> {
    let date_bound = |raw: Option<String>| -> Result<Option<chrono::NaiveDate>> {
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_date(text)
                .map(Some)
                .ok_or_else(|| SongbookError::Api(format!("Invalid date: {}", text))),
        }
    };

    Ok(AdvancedFilter {
        title: args.title.unwrap_or_default(),
        performer: args.performer.unwrap_or_default(),
        lyricist: args.lyricist.unwrap_or_default(),
        composer: args.composer.unwrap_or_default(),
        arranger: args.arranger.unwrap_or_default(),
        language,
        genre,
        min_count: parse_count_bound(args.min.as_deref().unwrap_or(""), 0),
        max_count: parse_count_bound(args.max.as_deref().unwrap_or(""), u64::MAX),
        date_from: date_bound(args.from)?,
        date_to: date_bound(args.to)?,
    })
}

fn song_draft(title: String, fields: SongArgs) -> Result<SongDraft> {
    let aliases = fields
        .aliases
        .iter()
        .map(|raw| match raw.rsplit_once(':') {
            Some((title, language)) => SongTitle::new(title.trim(), language.trim()),
            None => SongTitle::new(raw.trim(), ""),
        })
        .collect();

    let dated_links = |raw: &[String]| -> Result<Vec<MediaLink>> {
        raw.iter()
            .map(|entry| {
                let mut parts = entry.splitn(3, ',').map(str::trim);
                let date = parts.next().unwrap_or("");
                let url = parts
                    .next()
                    .ok_or_else(|| SongbookError::Validation(format!("expected DATE,URL[,TITLE]: {}", entry)))?;
                let title = parts.next().unwrap_or("");
                Ok(MediaLink::new(url, title, date))
            })
            .collect()
    };

    let videos = fields
        .videos
        .iter()
        .map(|entry| {
            let mut parts = entry.splitn(3, ',').map(str::trim);
            let url = parts.next().unwrap_or("");
            let title = parts.next().unwrap_or("");
            let link = MediaLink::new(url, title, "");
            match parts.next() {
                Some(kind) if !kind.is_empty() => link.with_kind(kind),
                _ => link,
            }
        })
        .collect();

    Ok(SongDraft {
        title,
        language: fields.language.unwrap_or_default(),
        other_languages: fields.other_languages,
        performers: fields.performers,
        lyricists: fields.lyricists,
        composers: fields.composers,
        arrangers: fields.arrangers,
        genres: fields.genres,
        aliases,
        videos,
        lives: dated_links(&fields.lives)?,
        clips: dated_links(&fields.clips)?,
        note: fields.note.unwrap_or_default(),
    })
}
