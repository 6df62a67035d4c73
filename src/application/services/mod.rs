//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem)
//! but are themselves concrete structs, not traits.

mod chart;

pub use chart::{parse_records, ChartService, OrgChart, RootSelection, MAX_CHART_DEPTH};
