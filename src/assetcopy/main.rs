use assetcopy::api::{self, AssetCopyApi, CmdResult, ConfigAction};
use assetcopy::error::{AssetCopyError, Result};
use assetcopy::host::fs::FileHost;
use assetcopy::host::ProjectInventory;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands, LibraryAction};

const CONFIG_DIR_ENV: &str = "ASSETCOPY_CONFIG_DIR";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "assetcopy=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether the operation went through.
fn run(cli: Cli) -> Result<bool> {
    let config_dir = resolve_config_dir(&cli)?;

    match cli.command {
        Commands::Config { key, value } => {
            let action = match (key, value) {
                (None, _) => ConfigAction::ShowAll,
                (Some(key), None) => ConfigAction::ShowKey(key),
                (Some(key), Some(value)) => ConfigAction::Set(key, value),
            };
            let show_all = matches!(action, ConfigAction::ShowAll);
            let result = api::configure(&config_dir, action)?;
            if show_all {
                if let Some(config) = &result.config {
                    print::print_config(config);
                }
            }
            Ok(finish(&result))
        }
        Commands::Library { action } => {
            let action = match action {
                LibraryAction::Add { name, path } => ConfigAction::AddLibrary { name, path },
                LibraryAction::Remove { name } => ConfigAction::RemoveLibrary(name),
            };
            let result = api::configure(&config_dir, action)?;
            Ok(finish(&result))
        }
        Commands::Copy { library, yes } => {
            let mut app = open_api(&cli.file, &cli.inventory, &config_dir)?;
            let result = app.copy_to_library(&library, yes)?;
            print::print_messages(&result.messages);
            if result.needs_confirmation {
                print::print_warnings(&result.preflight_warnings);
                println!(
                    "{}",
                    "Run again with --yes to copy to the Asset Library anyway.".yellow()
                );
                return Ok(false);
            }
            Ok(!result.has_errors())
        }
        Commands::Preflight => {
            let app = open_api(&cli.file, &cli.inventory, &config_dir)?;
            let result = app.preflight()?;
            print::print_messages(&result.messages);
            print::print_warnings(&result.preflight_warnings);
            Ok(true)
        }
        Commands::Catalog { library } => {
            let app = open_api(&cli.file, &cli.inventory, &config_dir)?;
            let result = app.merge_catalogs(&library)?;
            Ok(finish(&result))
        }
        Commands::Libraries => {
            let app = open_api(&cli.file, &cli.inventory, &config_dir)?;
            let result = app.libraries()?;
            print::print_messages(&result.messages);
            print::print_libraries(&result.libraries);
            Ok(true)
        }
    }
}

fn finish(result: &CmdResult) -> bool {
    print::print_messages(&result.messages);
    !result.has_errors()
}

fn resolve_config_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.config_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "assetcopy", "assetcopy")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| AssetCopyError::Config("Could not determine config dir".into()))
}

fn open_api(
    file: &Option<PathBuf>,
    inventory: &Option<PathBuf>,
    config_dir: &Path,
) -> Result<AssetCopyApi<FileHost>> {
    let file = file
        .clone()
        .ok_or_else(|| AssetCopyError::Config("No project file given (use --file)".into()))?;

    // symlinks must point at an absolute path
    let file = file.canonicalize().unwrap_or(file);
    let mut host = FileHost::new(file);
    if let Some(path) = inventory {
        host = host.with_inventory(ProjectInventory::load(path)?);
    }
    AssetCopyApi::new(host, config_dir)
}
