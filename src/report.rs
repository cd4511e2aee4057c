use crate::criteria::{ResourceCriterion, ResourcePredicate, TaskCriterion, TaskPredicate};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a report was defined; attached to configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new("<inline>", 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Unit used to display work figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadUnit {
    Minutes,
    Hours,
    #[default]
    Days,
    Weeks,
    Months,
    Quarters,
    Years,
    ShortAuto,
    LongAuto,
}

impl LoadUnit {
    /// Code of the `WorkFormat` project field.
    pub fn msp_work_format(self) -> u8 {
        match self {
            LoadUnit::Minutes => 1,
            LoadUnit::Hours => 2,
            LoadUnit::Days | LoadUnit::ShortAuto | LoadUnit::LongAuto => 3,
            LoadUnit::Weeks => 4,
            LoadUnit::Months | LoadUnit::Quarters | LoadUnit::Years => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceSortKey {
    Tree,
    Id,
    Name,
    Seqno,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion {
    pub key: ResourceSortKey,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl SortCriterion {
    pub fn ascending(key: ResourceSortKey) -> Self {
        Self {
            key,
            ascending: true,
        }
    }

    pub fn descending(key: ResourceSortKey) -> Self {
        Self {
            key,
            ascending: false,
        }
    }
}

/// Export report settings with resolved predicates.
pub struct ReportConfig {
    pub name: String,
    pub source: SourceLocation,
    pub scenario: usize,
    /// Report window; defaults to the project start and end.
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Only export the sub tree below this task.
    pub task_root: Option<String>,
    pub load_unit: LoadUnit,
    /// Ordering of resources. Tasks are always exported in tree order.
    pub sort_resources: Vec<SortCriterion>,
    pub hide_task: Option<Box<dyn TaskPredicate>>,
    pub rollup_task: Option<Box<dyn TaskPredicate>>,
    pub hide_resource: Option<Box<dyn ResourcePredicate>>,
    pub rollup_resource: Option<Box<dyn ResourcePredicate>>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new("export")
    }
}

impl ReportConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: SourceLocation::default(),
            scenario: 0,
            start: None,
            end: None,
            task_root: None,
            load_unit: LoadUnit::default(),
            sort_resources: vec![SortCriterion::ascending(ResourceSortKey::Tree)],
            hide_task: None,
            rollup_task: None,
            hide_resource: None,
            rollup_resource: None,
        }
    }

    pub fn with_hide_task(mut self, predicate: impl TaskPredicate + 'static) -> Self {
        self.hide_task = Some(Box::new(predicate));
        self
    }

    pub fn with_rollup_task(mut self, predicate: impl TaskPredicate + 'static) -> Self {
        self.rollup_task = Some(Box::new(predicate));
        self
    }

    pub fn with_hide_resource(mut self, predicate: impl ResourcePredicate + 'static) -> Self {
        self.hide_resource = Some(Box::new(predicate));
        self
    }

    pub fn with_rollup_resource(mut self, predicate: impl ResourcePredicate + 'static) -> Self {
        self.rollup_resource = Some(Box::new(predicate));
        self
    }
}

/// File representation of a [`ReportConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSpec {
    pub name: String,
    pub source: SourceLocation,
    pub scenario: usize,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub task_root: Option<String>,
    pub load_unit: LoadUnit,
    pub sort_resources: Vec<SortCriterion>,
    pub hide_task: Option<TaskCriterion>,
    pub rollup_task: Option<TaskCriterion>,
    pub hide_resource: Option<ResourceCriterion>,
    pub rollup_resource: Option<ResourceCriterion>,
}

impl Default for ReportSpec {
    fn default() -> Self {
        Self {
            name: "export".to_string(),
            source: SourceLocation::default(),
            scenario: 0,
            start: None,
            end: None,
            task_root: None,
            load_unit: LoadUnit::default(),
            sort_resources: vec![SortCriterion::ascending(ResourceSortKey::Tree)],
            hide_task: None,
            rollup_task: None,
            hide_resource: None,
            rollup_resource: None,
        }
    }
}

impl From<ReportSpec> for ReportConfig {
    fn from(spec: ReportSpec) -> Self {
        Self {
            name: spec.name,
            source: spec.source,
            scenario: spec.scenario,
            start: spec.start,
            end: spec.end,
            task_root: spec.task_root,
            load_unit: spec.load_unit,
            sort_resources: spec.sort_resources,
            hide_task: spec
                .hide_task
                .map(|c| Box::new(c) as Box<dyn TaskPredicate>),
            rollup_task: spec
                .rollup_task
                .map(|c| Box::new(c) as Box<dyn TaskPredicate>),
            hide_resource: spec
                .hide_resource
                .map(|c| Box::new(c) as Box<dyn ResourcePredicate>),
            rollup_resource: spec
                .rollup_resource
                .map(|c| Box::new(c) as Box<dyn ResourcePredicate>),
        }
    }
}
