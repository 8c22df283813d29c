use clap::Parser;
use std::path::PathBuf;

/// Merge two directory trees into one
///
/// Entries of UPPER are moved into LOWER. On a name collision the newer file
/// wins, redundant copies are deleted and conflicting entries are kept under
/// a backup name.
#[derive(Parser, Debug)]
#[command(name = "mergetree")]
#[command(about, long_about = None, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Print the commands instead of running them
    #[arg(short = 'N', long)]
    pub dry_run: bool,

    /// Remove upper directories once their content has been merged
    #[arg(short = 'R', long)]
    pub remove: bool,

    /// Compare bytes before dropping a same-time, same-size upper file
    #[arg(short, long)]
    pub strict: bool,

    /// Suffix for entries moved aside on a collision [default: ###]
    #[arg(short = 'B', long, value_name = "SUFFIX")]
    pub backup: Option<String>,

    /// Print one tagged line per decision on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Show listing progress on stderr
    #[arg(short = 'P', long)]
    pub progress: bool,

    /// Print a summary of all counters on stderr
    #[arg(short = 'S', long)]
    pub summary: bool,

    /// Print both trees before merging
    #[arg(long)]
    pub dump: bool,

    /// Use specific config file
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Tree that receives the merged entries
    #[arg(value_name = "LOWER")]
    pub lower: PathBuf,

    /// Tree whose entries are merged into LOWER
    #[arg(value_name = "UPPER")]
    pub upper: PathBuf,
}
