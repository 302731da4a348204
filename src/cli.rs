//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **ls**: List files with their numbers
//! - **folders**: List subfolders
//! - **count**: Count files
//! - **get** / **get-all**: Download files
//! - **rm** / **rm-all**: Delete files
//! - **info**: Show file metadata
//! - **config**: Read and change settings
//! - **completions**: Print a shell completion script
//!
//! Files are numbered from 1 in depth-first order: the files of a folder
//! first, then each subfolder in turn. `RANGE` arguments combine numbers and
//! spans with commas (`3-7,10,15-`).
//!
//! # Examples
//!
//! ```
//! use camsh::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["camsh", "--reverse", "rm", "1-3", "-y"]);
//! assert!(cli.reverse);
//! assert!(matches!(cli.command, Commands::Rm { yes: true, .. }));
//! ```

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "camsh")]
#[command(about = "Select and act on camera files by number", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the card contents (overrides config)
    #[arg(long = "store", value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Folder to start from (overrides config)
    #[arg(long = "folder", value_name = "PATH", global = true)]
    pub folder: Option<String>,

    /// Include subfolders
    #[arg(short = 'R', long = "recurse", global = true, conflicts_with = "no_recurse")]
    pub recurse: bool,

    /// Only the start folder itself
    #[arg(long = "no-recurse", global = true)]
    pub no_recurse: bool,

    /// Process files and folders in reverse order
    #[arg(long = "reverse", global = true, conflicts_with = "no_reverse")]
    pub reverse: bool,

    /// Process in store order even if the config says reverse
    #[arg(long = "no-reverse", global = true)]
    pub no_reverse: bool,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log filter, e.g. `debug` or `camsh::traverse=trace`
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Recursion requested on the command line, if any
    #[must_use]
    pub const fn recurse_override(&self) -> Option<bool> {
        if self.recurse {
            Some(true)
        } else if self.no_recurse {
            Some(false)
        } else {
            None
        }
    }

    /// Processing order requested on the command line, if any
    #[must_use]
    pub const fn reverse_override(&self) -> Option<bool> {
        if self.reverse {
            Some(true)
        } else if self.no_reverse {
            Some(false)
        } else {
            None
        }
    }
}

/// Options shared by `get` and `get-all`
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct SaveArgs {
    /// Directory to save into
    #[arg(short = 'd', long = "dest", value_name = "DIR", default_value = ".")]
    pub dest: PathBuf,

    /// Local filename pattern: %f name, %C extension, %n number, %F folder
    #[arg(long = "filename", value_name = "PATTERN")]
    pub filename: Option<String>,

    /// Replace existing local files
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List files with their numbers
    #[command(name = "ls", visible_alias = "list")]
    List,

    /// List subfolders
    #[command(visible_alias = "lf")]
    Folders,

    /// Count files
    Count,

    /// Download the selected files
    #[command(visible_alias = "download")]
    Get {
        /// Files to download, e.g. 1-5,9
        #[arg(value_name = "RANGE")]
        range: String,

        #[command(flatten)]
        save: SaveArgs,
    },

    /// Download every file
    #[command(name = "get-all")]
    GetAll {
        #[command(flatten)]
        save: SaveArgs,
    },

    /// Delete the selected files
    #[command(visible_alias = "delete")]
    Rm {
        /// Files to delete, e.g. 1-5,9
        #[arg(value_name = "RANGE")]
        range: String,

        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Delete every file
    #[command(name = "rm-all", visible_alias = "delete-all")]
    RmAll {
        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Show metadata of the selected files
    #[command(visible_alias = "describe")]
    Info {
        /// Files to describe, e.g. 1-5,9
        #[arg(value_name = "RANGE")]
        range: String,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print a shell completion script
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., recurse=false, logging.level=info)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., recurse)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Interactively choose the card directory and defaults
    Init,

    /// Print the config file location
    Path,
}

impl ConfigCommands {
    /// Split a `KEY=VALUE` setting
    ///
    /// # Errors
    ///
    /// Returns `CamshError::InvalidInput` if there is no `=` or the key is empty.
    pub fn split_setting(setting: &str) -> Result<(&str, &str), crate::CamshError> {
        match setting.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
            _ => Err(crate::CamshError::InvalidInput(
                "Invalid format. Use: camsh config set key=value".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ls_with_globals() {
        let cli = Cli::parse_from(["camsh", "ls", "--store", "/media/card", "--folder", "/DCIM"]);
        assert!(matches!(cli.command, Commands::List));
        assert_eq!(cli.store, Some(PathBuf::from("/media/card")));
        assert_eq!(cli.folder.as_deref(), Some("/DCIM"));
        assert_eq!(cli.recurse_override(), None);
    }

    #[test]
    fn test_list_alias() {
        let cli = Cli::parse_from(["camsh", "list"]);
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_recurse_flags() {
        let cli = Cli::parse_from(["camsh", "-R", "count"]);
        assert_eq!(cli.recurse_override(), Some(true));
        let cli = Cli::parse_from(["camsh", "count", "--no-recurse"]);
        assert_eq!(cli.recurse_override(), Some(false));
        assert!(Cli::try_parse_from(["camsh", "count", "-R", "--no-recurse"]).is_err());
    }

    #[test]
    fn test_reverse_flags() {
        let cli = Cli::parse_from(["camsh", "--reverse", "count"]);
        assert_eq!(cli.reverse_override(), Some(true));
        let cli = Cli::parse_from(["camsh", "count", "--no-reverse"]);
        assert_eq!(cli.reverse_override(), Some(false));
        assert_eq!(Cli::parse_from(["camsh", "count"]).reverse_override(), None);
        assert!(Cli::try_parse_from(["camsh", "count", "--reverse", "--no-reverse"]).is_err());
    }

    #[test]
    fn test_parse_get() {
        let cli = Cli::parse_from([
            "camsh", "get", "1-3,7", "-d", "/tmp/out", "--filename", "%n_%f.%C", "--force",
        ]);
        match cli.command {
            Commands::Get { range, save } => {
                assert_eq!(range, "1-3,7");
                assert_eq!(save.dest, PathBuf::from("/tmp/out"));
                assert_eq!(save.filename.as_deref(), Some("%n_%f.%C"));
                assert!(save.force);
            }
            other => panic!("Expected Get command, got {other:?}"),
        }
    }

    #[test]
    fn test_get_defaults_to_current_dir() {
        let cli = Cli::parse_from(["camsh", "get-all"]);
        match cli.command {
            Commands::GetAll { save } => {
                assert_eq!(save.dest, PathBuf::from("."));
                assert!(save.filename.is_none());
                assert!(!save.force);
            }
            other => panic!("Expected GetAll command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rm_requires_range() {
        assert!(Cli::try_parse_from(["camsh", "rm"]).is_err());
        let cli = Cli::parse_from(["camsh", "-q", "rm", "2", "--reverse"]);
        assert!(cli.quiet);
        assert!(cli.reverse);
        assert!(matches!(cli.command, Commands::Rm { ref range, yes: false } if range == "2"));
    }

    #[test]
    fn test_parse_rm_all_alias() {
        let cli = Cli::parse_from(["camsh", "delete-all", "-y"]);
        assert!(matches!(cli.command, Commands::RmAll { yes: true }));
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::parse_from(["camsh", "config", "set", "logging.level=debug"]);
        match cli.command {
            Commands::Config {
                command: ConfigCommands::Set { setting },
            } => {
                assert_eq!(
                    ConfigCommands::split_setting(&setting).unwrap(),
                    ("logging.level", "debug")
                );
            }
            other => panic!("Expected config set, got {other:?}"),
        }
    }

    #[test]
    fn test_split_setting_rejects_missing_equals() {
        assert!(ConfigCommands::split_setting("recurse").is_err());
        assert!(ConfigCommands::split_setting("=true").is_err());
        assert_eq!(ConfigCommands::split_setting("store=").unwrap(), ("store", ""));
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::parse_from(["camsh", "completions", "bash"]);
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Bash }));
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::parse_from(["camsh", "--log-level", "debug", "count"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
