//! CLI argument definitions using clap.
//!
//! `strsync [OPTIONS] [FILES]...` scans the given source files (or standard
//! input) for marker-function literals and syncs them into every catalog of
//! the language directory. Options override `.strsyncrc.json`.

use std::path::PathBuf;

use clap::Parser;

use crate::extract::ExtractMode;

/// Input path that stands for standard input.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Source files to scan, concatenated in order (standard input when empty or "-")
    pub files: Vec<PathBuf>,

    /// Marker function whose literal arguments are translation keys
    #[arg(long, value_name = "NAME")]
    pub marker: Option<String>,

    /// Value written for keys that have no translation yet
    #[arg(long, value_name = "TEXT")]
    pub placeholder: Option<String>,

    /// Directory holding the locale catalogs
    #[arg(long, value_name = "DIR", env = "STRSYNC_LANG_DIR")]
    pub lang_dir: Option<PathBuf>,

    /// Extraction mode (loose is a legacy fallback that matches any double-quoted string)
    #[arg(long, value_enum)]
    pub mode: Option<ExtractMode>,

    /// Print the merged catalogs without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Only extract; print a template catalog for LOCALE and leave catalogs alone
    #[arg(long, value_name = "LOCALE", conflicts_with = "dry_run")]
    pub template: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Arguments {
    /// Whether sources come from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.files.is_empty()
    }
}
