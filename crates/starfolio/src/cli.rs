//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use starfolio_config::Config;

/// Personal portfolio and blog for the terminal, over a warp-drive starfield.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: config.toml in the platform config directory)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Directory holding the `*.md` posts
    #[arg(short, long)]
    pub posts_dir: Option<PathBuf>,

    /// Fixed seed for the starfield
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Non-interactive subcommands. Without one the TUI starts.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the published posts, newest first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a single post
    Show {
        /// File name of the post without `.md`
        slug: String,
    },
}

/// Values given on the command line that win over the config file. They
/// are never written back to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub posts_dir: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Overrides {
    pub fn posts_dir(&self, config: &Config) -> PathBuf {
        self.posts_dir
            .clone()
            .unwrap_or_else(|| config.posts_dir.clone())
    }

    pub fn seed(&self, config: &Config) -> Option<u64> {
        self.seed.or(config.seed)
    }
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            posts_dir: self.posts_dir.clone(),
            seed: self.seed,
        }
    }
}
