//! Terminal output for chart commands
//!
//! Colors follow NO_COLOR, CLICOLOR and CLICOLOR_FORCE.

use std::fmt::Display;
use std::path::Path;

use colored::Colorize;

use crate::domain::SubtreeStats;

/// Error line on stderr.
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Warning line on stderr.
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Data with no decoration (rendered trees, TOML), safe to pipe.
pub fn plain(data: &(impl Display + ?Sized)) {
    println!("{}", data);
}

/// One `config path` entry; `None` when the location cannot be determined.
pub fn config_location(scope: &str, path: Option<&Path>) {
    match path {
        Some(path) => println!("{}: {}", scope.green(), path.display()),
        None => println!("{}: {}", scope.green(), "n/a".dimmed()),
    }
}

/// Tab-separated so `roots` output can be cut or sorted.
pub fn root_candidate(id: &str, name: &str) {
    println!("{}\t{}", id.bold(), name);
}

/// Subtree statistics for one person as an aligned block.
pub fn subtree_stats(name: &str, id: &str, stats: &SubtreeStats) {
    println!("{}", format!("{} ({})", name, id).cyan().bold());
    let ratio = stats
        .management_ratio
        .map_or_else(|| "n/a".to_string(), |r| format!("{:.4}", r));
    let rows = [
        ("total descendants", stats.total_descendants.to_string()),
        ("managers below", stats.non_leaf_descendants.to_string()),
        ("management cost", format!("{:.2}", stats.management_cost)),
        ("ic cost", format!("{:.2}", stats.ic_cost)),
        ("total cost", format!("{:.2}", stats.total_cost)),
        ("management ratio", ratio),
    ];
    for (label, value) in rows {
        println!("  {:<20}{}", format!("{label}:"), value);
    }
}
