use clap::Parser;
use directories::ProjectDirs;
use gridflow::commands::{self, config::ConfigAction, helpers::open_note};
use gridflow::config::EditorConfig;
use gridflow::error::{GridflowError, Result};
use gridflow::model::Theme;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands};
use print::{print_config, print_hits, print_messages, print_stats};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct AppContext {
    config_dir: PathBuf,
    config: EditorConfig,
}

fn run(cli: Cli) -> Result<()> {
    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Stats { file, json } => handle_stats(&ctx, &file, json),
        Commands::Search {
            file,
            pattern,
            case_sensitive,
        } => handle_search(&ctx, &file, &pattern, case_sensitive),
        Commands::Replace {
            file,
            pattern,
            replacement,
            all,
            case_sensitive,
            dry_run,
        } => handle_replace(
            &ctx,
            &file,
            &pattern,
            &replacement,
            all,
            case_sensitive,
            dry_run,
        ),
        Commands::Export {
            file,
            title,
            tags,
            theme,
        } => handle_export(&ctx, &file, title, tags, theme),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "gridflow", "gridflow")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| GridflowError::Config("could not determine config dir".into()))?,
    };
    let config = EditorConfig::load(&config_dir)?;
    tracing::debug!(dir = %config_dir.display(), "config loaded");
    Ok(AppContext { config_dir, config })
}

fn handle_stats(ctx: &AppContext, file: &Path, json: bool) -> Result<()> {
    let editor = open_note(file, &ctx.config, false)?;
    let result = commands::stats::run(&editor)?;
    if let Some(stats) = &result.stats {
        if json {
            println!("{}", serde_json::to_string_pretty(stats)?);
        } else {
            print_stats(stats);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, file: &Path, pattern: &str, case_sensitive: bool) -> Result<()> {
    let editor = open_note(file, &ctx.config, false)?;
    let result = commands::search::run(&editor, pattern, case_sensitive)?;
    print_hits(&result.hits);
    print_messages(&result.messages);
    Ok(())
}

fn handle_replace(
    ctx: &AppContext,
    file: &Path,
    pattern: &str,
    replacement: &str,
    all: bool,
    case_sensitive: bool,
    dry_run: bool,
) -> Result<()> {
    let editor = open_note(file, &ctx.config, !dry_run)?;
    let result = commands::replace::run(&editor, pattern, replacement, all, case_sensitive)?;
    editor.shutdown()?;

    if dry_run {
        println!("{}", editor.get_content());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(
    ctx: &AppContext,
    file: &Path,
    title: Option<String>,
    tags: Vec<String>,
    theme: Option<Theme>,
) -> Result<()> {
    let editor = open_note(file, &ctx.config, false)?;
    let result = commands::export::run(&editor, title.as_deref(), &tags, theme)?;
    if let Some(json) = &result.export {
        println!("{}", json);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = commands::config::run(&ctx.config_dir, action.clone())?;
    if let (ConfigAction::ShowAll, Some(config)) = (&action, &result.config) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}
