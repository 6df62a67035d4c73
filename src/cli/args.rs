//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::domain::RootPolicy;

/// Derive an annotated organization chart from a flat employee CSV
#[derive(Parser, Debug)]
#[command(name = "orgchart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Project directory holding .orgchart.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Input and root options shared by chart commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ChartArgs {
    /// Employee CSV (default: from config)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Use this employee id as root instead of auto-selection
    #[arg(short, long)]
    pub root: Option<String>,

    /// Root selection when several records have no manager
    #[arg(long, value_parser = parse_policy, conflicts_with = "root")]
    pub policy: Option<RootPolicy>,
}

fn parse_policy(s: &str) -> Result<RootPolicy, String> {
    s.parse()
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the chart and write it as JSON
    Build {
        #[command(flatten)]
        chart: ChartArgs,
        /// Output file (default: from config)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the hierarchy as tree
    Tree {
        #[command(flatten)]
        chart: ChartArgs,
    },

    /// Show subtree statistics
    Stats {
        #[command(flatten)]
        chart: ChartArgs,
        /// Employee to report on (default: root)
        employee: Option<String>,
    },

    /// List records without a manager
    Roots {
        /// Employee CSV (default: from config)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },
}
