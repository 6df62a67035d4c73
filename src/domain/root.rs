//! Root selection: the record without a manager heads the chart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::entities::RecordSet;
use crate::domain::error::DomainError;

/// How to pick the root when several records have no manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootPolicy {
    /// Exactly one manager-less record is required.
    #[default]
    Unique,
    /// Take the first manager-less record in id order.
    First,
}

impl fmt::Display for RootPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootPolicy::Unique => write!(f, "unique"),
            RootPolicy::First => write!(f, "first"),
        }
    }
}

impl FromStr for RootPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unique" => Ok(RootPolicy::Unique),
            "first" => Ok(RootPolicy::First),
            other => Err(format!("unknown root policy: {other} (expected unique|first)")),
        }
    }
}

/// First record without a manager reference, in id order.
///
/// Uniqueness is not checked; see [`select_root`] for that.
pub fn find_root(records: &RecordSet) -> Option<&str> {
    records
        .values()
        .find(|r| r.manager_id().is_none())
        .map(|r| r.id.as_str())
}

/// All records without a manager reference, in id order.
pub fn root_candidates(records: &RecordSet) -> Vec<&str> {
    records
        .values()
        .filter(|r| r.manager_id().is_none())
        .map(|r| r.id.as_str())
        .collect()
}

/// Root selection with an explicit policy for the multi-root case.
pub fn select_root(records: &RecordSet, policy: RootPolicy) -> Result<String, DomainError> {
    match policy {
        RootPolicy::First => find_root(records)
            .map(str::to_string)
            .ok_or(DomainError::NoRootFound),
        RootPolicy::Unique => match root_candidates(records).as_slice() {
            [] => Err(DomainError::NoRootFound),
            [single] => Ok(single.to_string()),
            many => Err(DomainError::AmbiguousRoot {
                candidates: many.iter().map(|s| s.to_string()).collect(),
            }),
        },
    }
}
