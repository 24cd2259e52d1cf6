use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use spiel::api::{CmdMessage, ConfigAction, MessageLevel, ScriptUpdate, SpielApi};
use spiel::clipboard::copy_to_clipboard;
use spiel::commands::CategoryRow;
use spiel::config::SpielConfig;
use spiel::editor::{edit_content, EditorContent};
use spiel::error::{Result, SpielError};
use spiel::filter::{ScriptQuery, TagMatch, TagUsage};
use spiel::index::DisplayScript;
use spiel::store::fs::FileStore;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{CategoryCommands, Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: SpielApi<FileStore>,
    config: SpielConfig,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Create {
            title,
            content,
            category,
            tag,
            no_editor,
        }) => handle_create(&mut ctx, title, content, category, tag, no_editor),
        Some(Commands::List {
            search,
            tag,
            any_tag,
            category,
        }) => handle_list(&ctx, search, tag, any_tag, category),
        Some(Commands::View { selectors }) => handle_view(&ctx, selectors),
        Some(Commands::Copy { selectors }) => handle_copy(&mut ctx, selectors),
        Some(Commands::Edit {
            selectors,
            category,
            root,
            tag,
        }) => handle_edit(&mut ctx, selectors, category, root, tag),
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, selectors),
        Some(Commands::Search { term }) => handle_search(&ctx, term),
        Some(Commands::Category { action }) => handle_category(&mut ctx, action),
        Some(Commands::Tags) => handle_tags(&ctx),
        Some(Commands::Import { paths, category }) => handle_import(&mut ctx, paths, category),
        Some(Commands::Export { selectors }) => handle_export(&ctx, selectors),
        Some(Commands::Path { selectors }) => handle_paths(&ctx, selectors),
        Some(Commands::Doctor { fix }) => handle_doctor(&mut ctx, fix),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_list(&ctx, None, Vec::new(), false, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let catalog_dir = resolve_catalog_dir(cli)?;
    let config = SpielConfig::load(&catalog_dir).unwrap_or_default();

    let store = FileStore::new(catalog_dir.clone()).with_file_ext(config.get_file_ext());
    let api = SpielApi::new(store, catalog_dir);

    Ok(AppContext { api, config })
}

fn resolve_catalog_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.catalog {
        return Ok(dir.clone());
    }
    if let Ok(dir) = std::env::var("SPIEL_CATALOG") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let proj_dirs = ProjectDirs::from("com", "spiel", "spiel")
        .ok_or_else(|| SpielError::Api("Could not determine a data directory".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn handle_create(
    ctx: &mut AppContext,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    tags: Vec<String>,
    no_editor: bool,
) -> Result<()> {
    let category_id = match &category {
        Some(reference) => Some(ctx.api.resolve_category(reference)?.id),
        None => None,
    };

    let (final_title, final_content) = if no_editor {
        (title.unwrap_or_default(), content.unwrap_or_default())
    } else {
        let initial = EditorContent::new(title.unwrap_or_default(), content.unwrap_or_default());
        let edited = edit_content(&initial, ctx.config.get_file_ext())?;
        (edited.title, edited.content)
    };

    if final_title.is_empty() {
        return Err(SpielError::Api("Title cannot be empty".into()));
    }

    let result = ctx
        .api
        .create_script(final_title, final_content, category_id, tags)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    tags: Vec<String>,
    any_tag: bool,
    category: Option<String>,
) -> Result<()> {
    let category_id = match &category {
        Some(reference) => Some(ctx.api.resolve_category(reference)?.id),
        None => None,
    };
    let tag_match = if any_tag {
        TagMatch::Any
    } else {
        ctx.config.tag_match
    };

    let query = ScriptQuery {
        search: search.unwrap_or_default(),
        tags,
        tag_match,
        category_id,
    };
    let result = ctx.api.list_scripts(&query)?;
    print_scripts(&result.listed_scripts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.view_scripts(&selectors)?;
    print_full_scripts(&result.listed_scripts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_copy(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.copy_scripts(&selectors)?;

    for ds in &result.listed_scripts {
        // Copy first; the counter is best-effort bookkeeping and must not
        // fail the copy.
        copy_to_clipboard(&ds.script.content)?;
        println!(
            "{}",
            format!("Copied to clipboard: {}", ds.script.metadata.title).green()
        );

        let recorded = ctx.api.record_copy(&ds.script.metadata.id)?;
        print_messages(&recorded.messages);
    }
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    selectors: Vec<String>,
    category: Option<String>,
    root: bool,
    tags: Vec<String>,
) -> Result<()> {
    // Flags reclassify in place; without them the editor round-trip runs.
    if category.is_some() || root || !tags.is_empty() {
        let category_id = if root {
            Some(None)
        } else {
            match &category {
                Some(reference) => Some(Some(ctx.api.resolve_category(reference)?.id)),
                None => None,
            }
        };
        let new_tags = if tags.is_empty() { None } else { Some(tags) };
        let result = ctx.api.classify_scripts(&selectors, category_id, new_tags)?;
        print_messages(&result.messages);
        return Ok(());
    }

    let result = ctx.api.view_scripts(&selectors)?;

    let mut updates = Vec::new();
    for ds in &result.listed_scripts {
        let initial = EditorContent::new(
            ds.script.metadata.title.clone(),
            ds.script.content.clone(),
        );
        let edited = edit_content(&initial, ctx.config.get_file_ext())?;
        if edited.title.is_empty() {
            return Err(SpielError::Api("Title cannot be empty".into()));
        }
        updates.push(ScriptUpdate::new(ds.index, edited.title, edited.content));
    }

    if updates.is_empty() {
        return Ok(());
    }

    let result = ctx.api.update_scripts(&updates)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_scripts(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: String) -> Result<()> {
    let result = ctx.api.search_scripts(&term)?;
    print_scripts(&result.listed_scripts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_category(ctx: &mut AppContext, action: CategoryCommands) -> Result<()> {
    let result = match action {
        CategoryCommands::List => {
            let result = ctx.api.list_categories()?;
            print_category_tree(&result.category_rows);
            result
        }
        CategoryCommands::Create { name, parent, sort } => {
            ctx.api.create_category(name, parent.as_deref(), sort)?
        }
        CategoryCommands::Rename { reference, name } => {
            ctx.api.rename_category(&reference, name)?
        }
        CategoryCommands::Move {
            reference,
            parent,
            root: _,
        } => ctx.api.move_category(&reference, parent.as_deref())?,
        CategoryCommands::Delete { reference } => ctx.api.delete_category(&reference)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.tags()?;
    print_tags(&result.tag_usage);
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(
    ctx: &mut AppContext,
    paths: Vec<PathBuf>,
    category: Option<String>,
) -> Result<()> {
    let category_id = match &category {
        Some(reference) => Some(ctx.api.resolve_category(reference)?.id),
        None => None,
    };
    let import_exts = ctx.config.import_extensions.clone();
    let result = ctx.api.import_scripts(paths, &import_exts, category_id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.export_scripts(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(ctx: &AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.script_paths(&selectors)?;
    for path in &result.script_paths {
        println!("{}", path.display());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext, fix: bool) -> Result<()> {
    let result = ctx.api.doctor(fix)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        println!("file-ext = {}", config.get_file_ext());
        println!(
            "tag-match = {}",
            config.get("tag-match").unwrap_or_default()
        );
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_full_scripts(scripts: &[DisplayScript]) {
    for (i, ds) in scripts.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!(
            "{} {}",
            ds.index.to_string().yellow(),
            ds.script.metadata.title.bold()
        );
        if !ds.script.metadata.tags.is_empty() {
            let tags: Vec<String> = ds
                .script
                .metadata
                .tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect();
            println!("{}", tags.join(" ").cyan());
        }
        println!("--------------------------------");
        println!("{}", ds.script.content);
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_scripts(scripts: &[DisplayScript]) {
    if scripts.is_empty() {
        println!("No scripts found.");
        return;
    }

    for ds in scripts {
        let idx_str = format!("{}. ", ds.index);

        let copy_suffix = if ds.script.metadata.copy_count > 0 {
            format!("{}\u{00d7} ", ds.script.metadata.copy_count)
        } else {
            "  ".to_string()
        };
        let copy_suffix_width = copy_suffix.width();

        let time_ago = format_time_ago(ds.script.metadata.created_at);

        let title = &ds.script.metadata.title;
        let tags: String = ds
            .script
            .metadata
            .tags
            .iter()
            .map(|t| format!(" #{}", t))
            .collect();
        let preview: String = ds
            .script
            .content
            .chars()
            .take(50)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let line = if preview.is_empty() {
            format!("{}{}", title, tags)
        } else {
            format!("{}{} {}", title, tags, preview)
        };

        let fixed_width = 4 + idx_str.width() + copy_suffix_width + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let line_display = truncate_to_width(&line, available);
        let padding = available.saturating_sub(line_display.width());

        println!(
            "    {}{}{}{}{}",
            idx_str.normal(),
            line_display,
            " ".repeat(padding),
            copy_suffix.dimmed(),
            time_ago.dimmed()
        );
    }
}

fn print_category_tree(rows: &[CategoryRow]) {
    if rows.is_empty() {
        return;
    }
    for row in rows {
        let indent = "  ".repeat(row.depth);
        println!(
            "{}{} {}",
            indent,
            row.category.name.bold(),
            format!("({})", row.script_count).dimmed()
        );
    }
}

fn print_tags(usage: &[TagUsage]) {
    for tag in usage {
        println!(
            "{} {}",
            format!("#{}", tag.name).cyan(),
            format!("({})", tag.count).dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

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

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
