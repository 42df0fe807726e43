//! CLI argument parsing

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;
use crate::filter::FilterState;
use crate::models::{BucketFilter, Language};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Flashcard generator for rhetoric classroom activities.
///
/// Without a subcommand the interactive terminal UI starts.
#[derive(Parser, Debug)]
#[command(name = "rhetoric-cards", version, about, long_about = None)]
pub struct Cli {
    /// Catalog and interface language (en, el, es, sv, it)
    #[arg(short, long, global = true)]
    pub lang: Option<Language>,

    /// Directory exported cards are written to
    #[arg(short, long, global = true)]
    pub out: Option<PathBuf>,

    /// Directory holding <lang>.json catalog files, watched for changes
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the activities passing the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Generate and export cards without the terminal UI
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Activity ids to export, in order (comma separated)
        #[arg(long, value_delimiter = ',', conflicts_with = "all")]
        ids: Vec<u32>,

        /// Export every activity passing the filters
        #[arg(long)]
        all: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Filter flags shared by `list` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Age bucket, e.g. 8-10 ("all" for every bucket)
    #[arg(long)]
    pub age: Option<String>,

    /// Level label as written in the catalog language
    #[arg(long)]
    pub level: Option<String>,

    /// Case-insensitive text matched against title and theme
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn to_filter_state(&self) -> FilterState {
        FilterState {
            age: BucketFilter::from_option(self.age.clone()),
            level: BucketFilter::from_option(self.level.clone()),
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            language: self.lang,
            output_dir: self.out.clone(),
            catalog_dir: self.catalog.clone(),
            log_level: self.log_level.clone(),
        }
    }
}
