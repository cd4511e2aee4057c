use crate::graph::TreePosition;
use crate::model::{ModelError, ModelResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIORITY: u32 = 500;

/// A dependency on another task. `on_end` selects whether the target's end
/// (true) or start (false) triggers this task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub task: String,
    #[serde(default = "default_on_end")]
    pub on_end: bool,
}

fn default_on_end() -> bool {
    true
}

impl Dependency {
    pub fn new(task: impl Into<String>, on_end: bool) -> Self {
        Self {
            task: task.into(),
            on_end,
        }
    }
}

/// Scheduled data of a task for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskScenario {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Explicit completion in percent; derived from the project's "now" when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<f64>,
    #[serde(default = "default_priority")]
    pub priority: u32,
    #[serde(default)]
    pub milestone: bool,
    /// Ids of responsible resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responsible: Vec<String>,
    /// Dependencies that gate the start of the task.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub start_preds: Vec<Dependency>,
    /// Dependencies that gate the end of the task.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub end_preds: Vec<Dependency>,
}

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

impl TaskScenario {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            complete: None,
            priority: DEFAULT_PRIORITY,
            milestone: false,
            responsible: Vec::new(),
            start_preds: Vec::new(),
            end_preds: Vec::new(),
        }
    }

    /// Elapsed seconds between start and end.
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Additional parents that list this task (and its sub tree) as their own.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adopted_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub scenarios: Vec<TaskScenario>,
    #[serde(skip)]
    pub(crate) position: TreePosition,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
            adopted_by: Vec::new(),
            note: None,
            scenarios: Vec::new(),
            position: TreePosition::default(),
        }
    }

    pub fn scenario(&self, idx: usize) -> ModelResult<&TaskScenario> {
        self.scenarios
            .get(idx)
            .ok_or_else(|| ModelError::MissingScenario {
                kind: "task",
                id: self.id.clone(),
                scenario: idx,
            })
    }

    /// Definition order among all tasks.
    pub fn seqno(&self) -> usize {
        self.position.seqno
    }

    /// Hierarchical position such as `1.2.3`.
    pub fn wbs(&self) -> &str {
        &self.position.wbs
    }

    /// Number of ancestors; top level tasks are on level 0.
    pub fn level(&self) -> usize {
        self.position.level
    }

    pub fn children(&self) -> &[String] {
        &self.position.children
    }

    pub fn adoptees(&self) -> &[String] {
        &self.position.adoptees
    }

    pub fn is_container(&self) -> bool {
        !self.position.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_container()
    }
}
