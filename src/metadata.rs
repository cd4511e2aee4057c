use crate::calendar::WorkingHours;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Project wide attributes of a scheduled project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMetadata {
    pub project_name: String,
    pub project_start: NaiveDateTime,
    pub project_end: NaiveDateTime,
    /// Reference date used for status and completion.
    pub now: NaiveDateTime,
    pub currency: String,
    pub daily_working_hours: f64,
    pub weekly_working_days: f64,
    pub yearly_working_days: f64,
    /// Default daily rate for resources.
    pub rate: f64,
    pub working_hours: WorkingHours,
    /// Scenario names; index 0 is the plan scenario.
    pub scenarios: Vec<String>,
}

impl ProjectMetadata {
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Self {
            project_name: "New Project".to_string(),
            project_start: start,
            project_end: end,
            now: start,
            currency: "EUR".to_string(),
            daily_working_hours: 8.0,
            weekly_working_days: 5.0,
            yearly_working_days: 260.714,
            rate: 0.0,
            working_hours: WorkingHours::default(),
            scenarios: vec!["plan".to_string()],
        }
    }
}
