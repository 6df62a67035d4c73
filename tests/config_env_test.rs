//! Environment overrides for Settings.
//!
//! Kept in its own test binary: the variables are process-wide and would leak
//! into the file-based config tests.

use std::env;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use orgchart::config::{local_config_path, Settings};
use orgchart::domain::RootPolicy;

#[test]
fn given_orgchart_env_vars_when_load_then_override_local_config() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "input = \"local.csv\"\noutput = \"local.json\"\nroot_policy = \"unique\"\n",
    )
    .unwrap();
    env::set_var("ORGCHART_OUTPUT", "env/chart.json");
    env::set_var("ORGCHART_ROOT_POLICY", "first");
    env::set_var("ORGCHART_PRETTY", "false");

    // Act
    let settings = Settings::load(Some(project.path()));

    env::remove_var("ORGCHART_OUTPUT");
    env::remove_var("ORGCHART_ROOT_POLICY");
    env::remove_var("ORGCHART_PRETTY");

    // Assert
    let settings = settings.expect("load settings");
    assert_eq!(settings.input, PathBuf::from("local.csv"));
    assert_eq!(settings.output, PathBuf::from("env/chart.json"));
    assert_eq!(settings.root_policy, RootPolicy::First);
    assert!(!settings.pretty);
}
