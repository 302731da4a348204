//! Interactive setup for `camsh config init`

use super::CamshConfig;
use config::ConfigError;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::PathBuf;

use crate::store::FolderPath;

/// Prompt for the store directory, start folder and recursion default
///
/// Current values are offered as defaults; the result is saved to the
/// default config path.
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read, the folder is not a
/// valid store path, or the configuration cannot be saved.
pub fn setup_wizard(current: &CamshConfig) -> Result<CamshConfig, ConfigError> {
    println!("Let's point camsh at your card.\n");
    let theme = ColorfulTheme::default();

    let default_store = current
        .store
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .map(|path| path.to_string_lossy().to_string())
        .unwrap_or_default();
    let store: String = Input::with_theme(&theme)
        .with_prompt("Card directory")
        .default(default_store)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let folder: String = Input::with_theme(&theme)
        .with_prompt("Start folder")
        .default(current.folder.clone())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;
    let folder = FolderPath::parse(&folder)
        .map_err(|e| ConfigError::Message(format!("folder: {e}")))?;

    let recurse = Confirm::with_theme(&theme)
        .with_prompt("Include subfolders by default?")
        .default(current.recurse)
        .interact()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let config = CamshConfig {
        store: Some(PathBuf::from(store)),
        folder: folder.to_string(),
        recurse,
        ..current.clone()
    };
    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
