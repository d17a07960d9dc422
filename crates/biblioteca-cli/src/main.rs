use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use biblioteca_etl::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "biblioteca", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the catalog (default: ~/.local/share/biblioteca/biblioteca.csv)
    ///
    /// Use a .db/.sqlite extension to keep the catalog in SQLite.
    #[arg(long, global = true)]
    file: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Create the catalog file if it does not exist
    Init,
    /// Add books to the catalog and re-sort it
    ///
    /// Reads one book per line, from --in or from standard input:
    ///
    ///   Surname;Name;Title;Series;Publisher;Year;Genre
    ///
    /// The separator may be ';', '|', a tab or ',' (in that order of
    /// preference). Blank lines and lines starting with '#' are ignored.
    /// Lines with fewer than seven fields are reported and skipped; the rest
    /// of the batch is still imported.
    ///
    /// The volume number is read from the title (or the series) when it
    /// contains "vol.", "volume", "tomo" or "parte" followed by digits, a
    /// Roman numeral or an Italian ordinal ("Volume II", "tomo terzo").
    ///
    /// The catalog is sorted by genre, surname, name, year, volume and title.
    Add {
        /// UTF-8 text file to import, one book per line
        #[arg(long = "in", value_name = "FILE")]
        input: Option<PathBuf>,

        /// Keep books already in the catalog instead of skipping them
        #[arg(long)]
        allow_duplicates: bool,
    },
    /// Print the catalog in sorted order
    List {
        /// Print JSON instead of tab-separated rows
        #[arg(long)]
        json: bool,

        /// Only books in this genre (case and accents ignored)
        #[arg(long)]
        genre: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
    /// Print an example config file
    Example,
    /// Print one config value, or the whole file
    Get {
        /// catalog_path or allow_duplicates
        key: Option<String>,
    },
    /// Set a config value in the config file
    Set {
        /// catalog_path or allow_duplicates
        key: String,
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.file {
        Some(path) => Config::load_with_catalog_path(path)?,
        None => Config::load()?,
    };

    twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e:?}"))?;

    match cli.command {
        Commands::Init => {
            commands::init_catalog(&config.catalog_path)?;
        }
        Commands::Add {
            input,
            allow_duplicates,
        } => {
            let policy = config.duplicate_policy(allow_duplicates);
            commands::run_add(&config.catalog_path, input, policy)?;
        }
        Commands::List { json, genre } => {
            commands::list_catalog(&config.catalog_path, json, genre)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Init => commands::config::init_config()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Get { key } => commands::config::get_config(&config, key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(key, value)?,
        },
    }

    Ok(())
}
