//! Tests for ChartService: CSV loading, chart building and JSON export

use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;
use serde_json::Value;
use tempfile::TempDir;

use orgchart::application::services::{ChartService, RootSelection, MAX_CHART_DEPTH};
use orgchart::application::ApplicationError;
use orgchart::domain::{DomainError, RecordSet, RootPolicy};
use orgchart::infrastructure::traits::RealFileSystem;
use orgchart::util::testing::{init_test_setup, record_set};

const HEADER: &str = "Employee Id,Name,Job Title,Salary,Manager\n";

fn create_csv(dir: &TempDir, name: &str, rows: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, format!("{HEADER}{rows}")).expect("write csv");
    path
}

fn service() -> ChartService {
    init_test_setup();
    ChartService::new(Arc::new(RealFileSystem))
}

/// `len` people, each reporting to the one before.
fn chain(len: usize) -> RecordSet {
    let ids: Vec<String> = (0..len).map(|i| format!("N{:05}", i)).collect();
    let mut rows = vec![(ids[0].as_str(), "Top Person", "1", None)];
    for pair in ids.windows(2) {
        rows.push((pair[1].as_str(), "Level Person", "1", Some(pair[0].as_str())));
    }
    record_set(&rows)
}

const SMALL_ORG: &str = "\
E1,Ada Lovelace,CEO,1000,
E2,Grace Hopper,CTO,500,E1
E3,Alan Turing,CFO,500,E1
E4,Edsger Dijkstra,Engineer,200,E2
";

#[test]
fn given_csv_file_when_building_chart_then_derives_hierarchy() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = create_csv(&temp, "org.csv", SMALL_ORG);

    // Act
    let chart = service()
        .chart_from_file(&input, &RootSelection::default())
        .unwrap();

    // Assert
    assert_eq!(chart.root_id(), "E1");
    assert_eq!(chart.size(), 4);
    assert_eq!(chart.depth, 3);
    assert!(chart.unreachable.is_empty());
}

#[test]
fn given_chart_when_exporting_then_writes_tree_data_shape() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = create_csv(&temp, "org.csv", SMALL_ORG);
    let output = temp.path().join("public").join("treeData.json");
    let svc = service();
    let chart = svc.chart_from_file(&input, &RootSelection::default()).unwrap();

    // Act
    svc.export_json(&chart.root, &output, true).unwrap();

    // Assert
    let json: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["key"], "E1");
    assert_eq!(json["type"], "person");
    assert_eq!(json["data"]["Name"], "Ada Lovelace");
    assert_eq!(json["data"]["Job Title"], "CEO");
    assert_eq!(json["data"]["Salary"], "1000");
    assert_eq!(json["data"]["initials"], "AL");
    assert_eq!(json["data"]["stats"]["totalDescendants"], 3);
    assert_eq!(json["data"]["stats"]["nonLeafDescendants"], 1);
    assert_eq!(json["data"]["stats"]["totalCost"], 2200.0);
    assert_eq!(json["children"][0]["key"], "E2");
    assert_eq!(json["children"][0]["children"][0]["key"], "E4");
}

#[test]
fn given_exported_chart_when_importing_then_round_trips() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = create_csv(&temp, "org.csv", SMALL_ORG);
    let output = temp.path().join("chart.json");
    let svc = service();
    let chart = svc.chart_from_file(&input, &RootSelection::default()).unwrap();
    svc.export_json(&chart.root, &output, false).unwrap();

    // Act
    let imported = svc.import_json(&output).unwrap();

    // Assert
    assert_eq!(imported, chart.root);
}

#[test]
fn given_leaf_without_ic_cost_when_exporting_then_ratio_is_null() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = create_csv(&temp, "org.csv", "E1,Volunteer,Helper,,\n");
    let output = temp.path().join("chart.json");
    let svc = service();
    let chart = svc.chart_from_file(&input, &RootSelection::default()).unwrap();

    // Act
    svc.export_json(&chart.root, &output, true).unwrap();

    // Assert
    let json: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert!(json["data"]["stats"]["managementRatio"].is_null());
    assert_eq!(json["children"].as_array().unwrap().len(), 0);
}

#[test]
fn given_orphan_when_building_chart_then_reports_unreachable() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = create_csv(
        &temp,
        "org.csv",
        "E1,Ada Lovelace,CEO,1000,\nE9,Lost Soul,Analyst,10,E404\n",
    );

    // Act
    let chart = service()
        .chart_from_file(&input, &RootSelection::default())
        .unwrap();

    // Assert
    assert_eq!(chart.size(), 1);
    assert_eq!(chart.unreachable, vec!["E9".to_string()]);
}

#[rstest]
#[case::unique(RootPolicy::Unique, None)]
#[case::first(RootPolicy::First, Some("A1"))]
fn given_two_roots_when_building_chart_then_policy_decides(
    #[case] policy: RootPolicy,
    #[case] expected_root: Option<&str>,
) {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = create_csv(&temp, "org.csv", "B1,Bea,CEO,1,\nA1,Abe,CEO,1,\n");

    // Act
    let result = service().chart_from_file(&input, &RootSelection::Policy(policy));

    // Assert
    match expected_root {
        Some(root) => assert_eq!(result.unwrap().root_id(), root),
        None => assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::AmbiguousRoot { .. }))
        )),
    }
}

#[test]
fn given_explicit_root_when_building_chart_then_uses_subtree() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = create_csv(&temp, "org.csv", SMALL_ORG);

    // Act
    let chart = service()
        .chart_from_file(&input, &RootSelection::Explicit("E2".into()))
        .unwrap();

    // Assert
    assert_eq!(chart.root_id(), "E2");
    assert_eq!(chart.size(), 2);
    assert_eq!(chart.unreachable, vec!["E1".to_string(), "E3".to_string()]);
}

#[test]
fn given_unknown_explicit_root_when_building_chart_then_root_not_resolvable() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = create_csv(&temp, "org.csv", SMALL_ORG);

    // Act
    let result = service().chart_from_file(&input, &RootSelection::Explicit("E99".into()));

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::RootNotResolvable(id))) if id == "E99"
    ));
}

#[test]
fn given_header_only_csv_when_building_chart_then_no_root_found() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = create_csv(&temp, "org.csv", "");

    // Act
    let result = service().chart_from_file(&input, &RootSelection::default());

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::NoRootFound))
    ));
}

#[test]
fn given_missing_file_when_loading_then_input_not_found() {
    let result = service().load_records(&PathBuf::from("/nonexistent/org.csv"));
    assert!(matches!(result, Err(ApplicationError::InputNotFound(_))));
}

// ============================================================
// Deep Chart Tests
// ============================================================

#[test]
fn given_50k_level_chain_when_building_chart_then_builds_and_drops() {
    // Arrange
    let records = chain(50_000);
    let svc = service();

    // Act
    let chart = svc.build_chart(&records, &RootSelection::default()).unwrap();
    let again = svc.build_chart(&records, &RootSelection::default()).unwrap();

    // Assert
    assert_eq!(chart.depth, 50_000);
    assert_eq!(chart.size(), 50_000);
    assert!(chart.root == again.root);
    drop(chart);
    drop(again);
}

#[test]
fn given_chart_deeper_than_limit_when_exporting_then_chart_too_deep() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("chart.json");
    let svc = service();
    let chart = svc
        .build_chart(&chain(MAX_CHART_DEPTH + 1), &RootSelection::default())
        .unwrap();

    // Act
    let result = svc.export_json(&chart.root, &output, false);

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::ChartTooDeep { depth, max })
            if depth == MAX_CHART_DEPTH + 1 && max == MAX_CHART_DEPTH
    ));
    assert!(!output.exists());
}

#[test]
fn given_chart_past_json_nesting_default_when_importing_then_round_trips() {
    // Arrange: 120 levels nest about 240 JSON containers
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("chart.json");
    let svc = service();
    let chart = svc.build_chart(&chain(120), &RootSelection::default()).unwrap();
    svc.export_json(&chart.root, &output, true).unwrap();

    // Act
    let imported = svc.import_json(&output).unwrap();

    // Assert
    assert_eq!(imported.depth(), 120);
    assert_eq!(imported, chart.root);
}

#[test]
fn given_json_deeper_than_limit_when_importing_then_chart_too_deep() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("chart.json");
    let levels = MAX_CHART_DEPTH + 10;
    let json = format!("{}{}", r#"{"children":["#.repeat(levels), "]}".repeat(levels));
    std::fs::write(&input, json).unwrap();

    // Act
    let result = service().import_json(&input);

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::ChartTooDeep { depth, .. }) if depth == levels
    ));
}
