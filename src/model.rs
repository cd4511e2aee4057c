//! Read-only view of a scheduled project as consumed by the exporter.

use crate::metadata::ProjectMetadata;
use crate::resource::Resource;
use crate::task::Task;
use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
    #[error("{kind} '{id}' references unknown parent '{parent}'")]
    UnknownParent {
        kind: &'static str,
        id: String,
        parent: String,
    },
    #[error("{kind} hierarchy contains a cycle")]
    HierarchyCycle { kind: &'static str },
    #[error("unknown task '{0}'")]
    UnknownTask(String),
    #[error("unknown resource '{0}'")]
    UnknownResource(String),
    #[error("{kind} '{id}' has no data for scenario {scenario}")]
    MissingScenario {
        kind: &'static str,
        id: String,
        scenario: usize,
    },
    #[error("task '{id}' ends ({end}) before it starts ({start})")]
    InvertedTask {
        id: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("invalid query window {start} .. {end}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("booking of '{resource}' on '{task}': {reason}")]
    InvalidBooking {
        resource: String,
        task: String,
        reason: String,
    },
    #[error("invalid working hours of '{owner}': {reason}")]
    InvalidWorkingHours { owner: String, reason: String },
    #[error("invalid project data: {0}")]
    InvalidProject(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Queries the exporter runs against a scheduled project.
///
/// Task and resource slices are in definition order; hierarchy data is
/// available through [`Task::children`] and [`Resource::children`].
pub trait ProjectModel {
    fn metadata(&self) -> &ProjectMetadata;

    fn tasks(&self) -> &[Task];

    fn resources(&self) -> &[Resource];

    fn task(&self, id: &str) -> Option<&Task>;

    fn resource(&self, id: &str) -> Option<&Resource>;

    /// Resources that work on the task or, for containers, on any of its
    /// sub tasks. Ordered by resource definition order.
    fn assigned_resources(&self, task: &Task, scenario: usize) -> Vec<&Resource>;

    /// Work of `resource` on `task` within `[start, end)`, in working days.
    fn effort(
        &self,
        resource: &Resource,
        task: &Task,
        scenario: usize,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ModelResult<f64>;

    /// Completion in percent. An explicit value wins; otherwise it is
    /// derived from the project's "now" date.
    fn completion(&self, task: &Task, scenario: usize) -> ModelResult<f64> {
        let data = task.scenario(scenario)?;
        if let Some(complete) = data.complete {
            return Ok(complete);
        }
        let now = self.metadata().now;
        if data.end <= now {
            Ok(100.0)
        } else if data.start >= now {
            Ok(0.0)
        } else {
            let total = (data.end - data.start).num_seconds() as f64;
            let done = (now - data.start).num_seconds() as f64;
            Ok(done / total * 100.0)
        }
    }

    fn parent_task(&self, task: &Task) -> ModelResult<Option<&Task>> {
        match task.parent.as_deref() {
            Some(parent) => self
                .task(parent)
                .map(Some)
                .ok_or_else(|| ModelError::UnknownTask(parent.to_string())),
            None => Ok(None),
        }
    }

    fn parent_resource(&self, resource: &Resource) -> ModelResult<Option<&Resource>> {
        match resource.parent.as_deref() {
            Some(parent) => self
                .resource(parent)
                .map(Some)
                .ok_or_else(|| ModelError::UnknownResource(parent.to_string())),
            None => Ok(None),
        }
    }
}
