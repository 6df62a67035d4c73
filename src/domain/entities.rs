//! Domain entities: core data structures

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Employee records keyed by `Employee Id`.
///
/// Ordered map: every scan over the set (root selection, graph construction)
/// sees the same ascending-id order on every run.
pub type RecordSet = BTreeMap<String, Record>;

/// One input row describing a person.
///
/// Field names follow the CSV header of the source export. Columns missing
/// from a row deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Employee Id", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Job Title", default)]
    pub job_title: String,
    /// Compensation as written in the source, e.g. `"85000"`.
    #[serde(rename = "Salary", default)]
    pub salary: String,
    /// Direct manager's id; empty for the top of the hierarchy.
    #[serde(rename = "Manager", default)]
    pub manager: Option<String>,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        job_title: impl Into<String>,
        salary: impl Into<String>,
        manager: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            job_title: job_title.into(),
            salary: salary.into(),
            manager: manager.map(str::to_string),
        }
    }

    /// Manager reference, `None` when absent or blank.
    pub fn manager_id(&self) -> Option<&str> {
        self.manager.as_deref().filter(|m| !m.is_empty())
    }

    /// Salary as a number; missing, unparseable or non-finite values count as zero.
    pub fn salary_amount(&self) -> f64 {
        parse_salary(&self.salary)
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// Lenient decimal parse used for every cost computation.
pub fn parse_salary(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// First letter of the first two words, uppercased.
///
/// `"ada lovelace byron"` → `"AL"`, `""` → `""`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Display payload of a person node.
///
/// Serialized with the source column names so that renderers can consume the
/// exported tree without a mapping step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonData {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Salary")]
    pub salary: String,
    pub initials: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<SubtreeStats>,
}

impl From<&Record> for PersonData {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            job_title: record.job_title.clone(),
            salary: record.salary.clone(),
            initials: record.initials(),
            stats: None,
        }
    }
}

impl PersonData {
    pub fn salary_amount(&self) -> f64 {
        parse_salary(&self.salary)
    }
}

/// Aggregates over the descendants of one node.
///
/// Cost fields include the node's own salary on the side it belongs to:
/// managers add to `management_cost`, leaves to `ic_cost`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtreeStats {
    pub total_descendants: usize,
    pub non_leaf_descendants: usize,
    pub management_cost: f64,
    pub ic_cost: f64,
    pub total_cost: f64,
    /// `management_cost / ic_cost`, `None` when there is no IC cost.
    pub management_ratio: Option<f64>,
}
