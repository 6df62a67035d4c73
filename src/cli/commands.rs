//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{OrgChart, RootSelection};
use crate::application::ApplicationError;
use crate::cli::args::{ChartArgs, Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{root_candidates, DomainError};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(InfraError::WorkingDir)?,
    };
    let settings = Settings::load(Some(project_dir.as_path())).map_err(InfraError::from)?;
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Build {
            chart,
            output,
            compact,
        }) => cmd_build(&container, chart, output.as_deref(), *compact),
        Some(Commands::Tree { chart }) => cmd_tree(&container, chart),
        Some(Commands::Stats { chart, employee }) => {
            cmd_stats(&container, chart, employee.as_deref())
        }
        Some(Commands::Roots { input }) => cmd_roots(&container, input.as_deref()),
        Some(Commands::Config { command }) => cmd_config(&container, command, &project_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn input_path(container: &ServiceContainer, input: Option<&Path>) -> PathBuf {
    input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.input.clone())
}

fn selection(container: &ServiceContainer, args: &ChartArgs) -> RootSelection {
    match (&args.root, args.policy) {
        (Some(root), _) => RootSelection::Explicit(root.clone()),
        (None, Some(policy)) => RootSelection::Policy(policy),
        (None, None) => RootSelection::Policy(container.settings.root_policy),
    }
}

fn load_chart(container: &ServiceContainer, args: &ChartArgs) -> CliResult<OrgChart> {
    let input = input_path(container, args.input.as_deref());
    let chart = container
        .chart_service
        .chart_from_file(&input, &selection(container, args))
        .map_err(InfraError::from)?;
    if !chart.unreachable.is_empty() {
        output::warning(&format!(
            "{} record(s) not reachable from root {}",
            chart.unreachable.len(),
            chart.root_id()
        ));
    }
    Ok(chart)
}

#[instrument(skip(container))]
fn cmd_build(
    container: &ServiceContainer,
    args: &ChartArgs,
    output_path: Option<&Path>,
    compact: bool,
) -> CliResult<()> {
    let chart = load_chart(container, args)?;
    let target = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.output.clone());
    let pretty = container.settings.pretty && !compact;
    debug!("writing {} nodes to {}", chart.size(), target.display());

    container
        .chart_service
        .export_json(&chart.root, &target, pretty)
        .map_err(InfraError::from)?;
    output::success(&format!(
        "Org tree saved to {} ({} people, depth {})",
        target.display(),
        chart.size(),
        chart.depth
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, args: &ChartArgs) -> CliResult<()> {
    let chart = load_chart(container, args)?;
    output::plain(&chart.root.to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_stats(
    container: &ServiceContainer,
    args: &ChartArgs,
    employee: Option<&str>,
) -> CliResult<()> {
    let chart = load_chart(container, args)?;
    let node = match employee {
        Some(id) => chart.root.find(id).ok_or_else(|| {
            InfraError::from(ApplicationError::from(DomainError::EmployeeNotFound(
                id.to_string(),
            )))
        })?,
        None => &chart.root,
    };
    let stats = node.stats().copied().unwrap_or_default();
    output::subtree_stats(&node.data.name, &node.key, &stats);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_roots(container: &ServiceContainer, input: Option<&Path>) -> CliResult<()> {
    let input = input_path(container, input);
    let records = container
        .chart_service
        .load_records(&input)
        .map_err(InfraError::from)?;
    let candidates = root_candidates(&records);
    if candidates.is_empty() {
        return Err(InfraError::from(ApplicationError::from(DomainError::NoRootFound)).into());
    }
    for id in candidates {
        let name = records.get(id).map(|r| r.name.as_str()).unwrap_or_default();
        output::root_candidate(id, name);
    }
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    project_dir: &Path,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let rendered = container.settings.to_toml().map_err(InfraError::from)?;
            output::plain(&rendered);
        }
        ConfigCommands::Path => {
            output::config_location("global", global_config_path().as_deref());
            output::config_location("local", Some(local_config_path(project_dir).as_path()));
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(project_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            let template = Settings::default().to_toml().map_err(InfraError::from)?;
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &template))
                .map_err(|source| InfraError::WriteFile {
                    path: path.clone(),
                    source,
                })?;
            output::success(&format!("Created {}", path.display()));
        }
    }
    Ok(())
}
