//! Organization chart service
//!
//! Loads employee records, derives the annotated chart and exports it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use itertools::Itertools;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, PathContextExt};
use crate::domain::{
    derive_tree, select_root, DomainError, Record, RecordSet, ReportingGraph, RootPolicy,
    TreeNode,
};
use crate::infrastructure::traits::FileSystem;

/// Deepest chart that can be exported, imported or rendered in full.
///
/// JSON encoding and decoding recurse once per level.
pub const MAX_CHART_DEPTH: usize = 256;

/// How the chart root is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSelection {
    /// Use this employee id as root, whether or not it has a manager.
    Explicit(String),
    /// Pick among manager-less records according to the policy.
    Policy(RootPolicy),
}

impl Default for RootSelection {
    fn default() -> Self {
        RootSelection::Policy(RootPolicy::default())
    }
}

/// Derived chart plus what was left out of it.
#[derive(Debug)]
pub struct OrgChart {
    pub root: TreeNode,
    pub depth: usize,
    /// Records not reachable from the root (orphans, cycles, other roots), in id order.
    pub unreachable: Vec<String>,
}

impl OrgChart {
    pub fn root_id(&self) -> &str {
        &self.root.key
    }

    pub fn size(&self) -> usize {
        self.root.size()
    }
}

/// Parse CSV content with a header row into a record set.
///
/// Rows without an `Employee Id` are skipped. A repeated id replaces the
/// earlier row. Ids and manager references are kept verbatim, so they only
/// match when spelled exactly alike.
pub fn parse_records(content: &str, source: &Path) -> ApplicationResult<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let mut records = RecordSet::new();
    for row in reader.deserialize::<Record>() {
        let record = row.map_err(|e| ApplicationError::Csv {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;
        if record.id.is_empty() {
            debug!("skipping row without employee id");
            continue;
        }
        if let Some(previous) = records.insert(record.id.clone(), record) {
            warn!("duplicate employee id {}, keeping last row", previous.id);
        }
    }
    Ok(records)
}

/// Service for deriving organization charts.
pub struct ChartService {
    fs: Arc<dyn FileSystem>,
}

impl ChartService {
    /// Create a new chart service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse the employee CSV at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load_records(&self, path: &Path) -> ApplicationResult<RecordSet> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read records", path)?;
        let records = parse_records(&content, path)?;
        info!("loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Derive the annotated chart from an in-memory record set.
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn build_chart(
        &self,
        records: &RecordSet,
        selection: &RootSelection,
    ) -> ApplicationResult<OrgChart> {
        let root_id = match selection {
            RootSelection::Explicit(id) => id.clone(),
            RootSelection::Policy(policy) => select_root(records, *policy)?,
        };
        debug!("root: {}", root_id);

        let graph = ReportingGraph::build(records);
        let arena = derive_tree(&graph, &root_id, records)
            .ok_or_else(|| DomainError::RootNotResolvable(root_id.clone()))?;
        let depth = arena.depth();
        let root = TreeNode::from_arena(&arena)
            .ok_or_else(|| DomainError::RootNotResolvable(root_id.clone()))?;

        let reached: HashSet<&str> = root.iter().map(|n| n.key.as_str()).collect();
        let unreachable: Vec<String> = records
            .keys()
            .filter(|id| !reached.contains(id.as_str()))
            .cloned()
            .collect();
        if !unreachable.is_empty() {
            warn!(
                "{} records not reachable from {}: {}",
                unreachable.len(),
                root_id,
                unreachable.iter().join(", ")
            );
        }

        Ok(OrgChart {
            root,
            depth,
            unreachable,
        })
    }

    /// Load `input` and derive its chart.
    pub fn chart_from_file(
        &self,
        input: &Path,
        selection: &RootSelection,
    ) -> ApplicationResult<OrgChart> {
        let records = self.load_records(input)?;
        self.build_chart(&records, selection)
    }

    /// Write the chart as JSON, creating parent directories.
    ///
    /// Charts deeper than [`MAX_CHART_DEPTH`] are rejected before anything is written.
    #[instrument(level = "debug", skip(self, root))]
    pub fn export_json(&self, root: &TreeNode, path: &Path, pretty: bool) -> ApplicationResult<()> {
        let depth = root.depth();
        if depth > MAX_CHART_DEPTH {
            return Err(ApplicationError::ChartTooDeep {
                depth,
                max: MAX_CHART_DEPTH,
            });
        }
        let json = if pretty {
            serde_json::to_string_pretty(root)?
        } else {
            serde_json::to_string(root)?
        };
        self.fs
            .ensure_parent(path)
            .with_path_context("create output directory", path)?;
        self.fs
            .write(path, &json)
            .with_path_context("write chart", path)?;
        info!("chart written to {}", path.display());
        Ok(())
    }

    /// Read back a previously exported chart.
    ///
    /// Accepts every chart [`export_json`](Self::export_json) writes. The nesting
    /// is measured first, so the decoder runs without its own recursion limit.
    pub fn import_json(&self, path: &Path) -> ApplicationResult<TreeNode> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(PathBuf::from(path)));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read chart", path)?;

        // node and its children array add two levels per chart level; a
        // leaf's data and stats objects add one more
        let depth = json_nesting(&content) / 2;
        if depth > MAX_CHART_DEPTH {
            return Err(ApplicationError::ChartTooDeep {
                depth,
                max: MAX_CHART_DEPTH,
            });
        }
        let mut de = serde_json::Deserializer::from_str(&content);
        de.disable_recursion_limit();
        let root = TreeNode::deserialize(&mut de)?;
        de.end()?;
        Ok(root)
    }
}

/// Deepest bracket nesting in a JSON text, ignoring brackets inside strings.
fn json_nesting(text: &str) -> usize {
    let (mut level, mut deepest) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                level += 1;
                deepest = deepest.max(level);
            }
            b'}' | b']' => level = level.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}
