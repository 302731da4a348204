//! camsh CLI application entry point
//!
//! Lists, downloads, describes and deletes the files of a camera card by
//! number. The card is a local directory (a mounted card or a copy of one).
//!
//! # Usage
//!
//! ```bash
//! # Number every file below the start folder
//! camsh --store /media/card ls
//!
//! # Download files 3 to 7 and everything from 15 on
//! camsh get 3-7,15- --dest ~/Pictures
//!
//! # Delete files 1, 3 and 5 without asking
//! camsh rm 1,3,5 -y
//!
//! # Point camsh at a card once
//! camsh config set store=/media/card
//! ```
//!
//! # Configuration
//!
//! Settings live in the user's config directory (`~/.config/camsh/config.toml`
//! on Linux) and can be overridden with `CAMSH_*` environment variables.

use camsh::{
    CamshError,
    cli::{Cli, Commands, ConfigCommands},
    commands::{self, CommandContext},
    config::{self, CamshConfig},
    logging,
    store::FsStore,
    traverse::{CancelToken, install_ctrlc_handler},
};
use clap::CommandFactory;
use tracing::debug;

type Result<T> = std::result::Result<T, CamshError>;

/// Handle `config` subcommands
///
/// Edits work on the file alone so environment overrides are never persisted.
fn handle_config_command(command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = ConfigCommands::split_setting(setting)?;
            let mut file_config = CamshConfig::load_file()?;
            file_config.set(key, value)?;
            file_config.save()?;
            if !quiet {
                println!("Set {key} = {}", file_config.get(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            let file_config = CamshConfig::load()?;
            println!("{}", file_config.get(key)?);
        }
        ConfigCommands::Init => {
            let current = CamshConfig::load_file()?;
            config::setup_wizard(&current)?;
        }
        ConfigCommands::Path => {
            println!("{}", CamshConfig::config_path()?.display());
        }
    }
    Ok(())
}

/// Open the card directory named on the command line or in the config
fn open_store(cli: &Cli, config: &CamshConfig) -> Result<FsStore> {
    let root = cli.store.as_ref().or(config.store.as_ref()).ok_or_else(|| {
        CamshError::InvalidInput(
            "No card directory set. Use --store DIR or 'camsh config set store=DIR'.".into(),
        )
    })?;
    let store = FsStore::open(root)?;
    debug!(root = %store.root().display(), "opened store");
    Ok(store)
}

/// Main entry point for the camsh application
///
/// Loads configuration, sets up logging and Ctrl+C handling, opens the card
/// and dispatches to the command handler.
///
/// # Errors
///
/// Returns `CamshError` if configuration loading fails, the card cannot be
/// opened, or any command handler returns an error.
fn main() -> Result<()> {
    let cli = Cli::parse_args();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let config = CamshConfig::load()?;
    logging::init_logging(&config.logging, cli.log_level.as_deref())?;
    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command, quiet);
    }

    let cancel = CancelToken::new();
    if let Err(e) = install_ctrlc_handler(&cancel) {
        eprintln!("Warning: Ctrl+C will not stop cleanly: {e}");
    }

    let ctx = CommandContext::resolve(&cli, &config, cancel)?;
    let mut store = open_store(&cli, &config)?;

    match &cli.command {
        Commands::List => {
            commands::list::files(&mut store, &ctx)?;
        }
        Commands::Folders => {
            commands::list::folders(&mut store, &ctx)?;
        }
        Commands::Count => {
            commands::list::count(&mut store, &ctx)?;
        }
        Commands::Get { range, save } => {
            commands::get::get(&mut store, &ctx, range, save)?;
        }
        Commands::GetAll { save } => {
            commands::get::get_all(&mut store, &ctx, save)?;
        }
        Commands::Rm { range, yes } => {
            commands::delete::rm(&mut store, &ctx, range, *yes)?;
        }
        Commands::RmAll { yes } => {
            commands::delete::rm_all(&mut store, &ctx, *yes)?;
        }
        Commands::Info { range } => {
            commands::info::info(&mut store, &ctx, range)?;
        }
        Commands::Config { .. } | Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
