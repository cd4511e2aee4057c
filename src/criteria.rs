//! Boolean predicates over tasks and resources.
//!
//! The exporter only ever calls [`TaskPredicate::matches`] and
//! [`ResourcePredicate::matches`]; what a predicate means is up to the
//! report configuration. Closures implement both traits, and the
//! serializable [`TaskCriterion`] / [`ResourceCriterion`] enums cover the
//! common cases for configuration files.

use crate::model::ProjectModel;
use crate::resource::Resource;
use crate::task::Task;
use serde::{Deserialize, Serialize};

/// A task evaluated in the context of one model and scenario.
pub struct TaskContext<'a> {
    pub task: &'a Task,
    pub model: &'a dyn ProjectModel,
    pub scenario: usize,
}

pub struct ResourceContext<'a> {
    pub resource: &'a Resource,
    pub model: &'a dyn ProjectModel,
    pub scenario: usize,
}

pub trait TaskPredicate {
    fn matches(&self, ctx: &TaskContext<'_>) -> bool;
}

pub trait ResourcePredicate {
    fn matches(&self, ctx: &ResourceContext<'_>) -> bool;
}

impl<F> TaskPredicate for F
where
    F: Fn(&TaskContext<'_>) -> bool,
{
    fn matches(&self, ctx: &TaskContext<'_>) -> bool {
        self(ctx)
    }
}

impl<F> ResourcePredicate for F
where
    F: Fn(&ResourceContext<'_>) -> bool,
{
    fn matches(&self, ctx: &ResourceContext<'_>) -> bool {
        self(ctx)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskCriterion {
    /// Task id is one of the listed ids.
    Ids { ids: Vec<String> },
    Milestone,
    Container,
    /// Task sits deeper than `level` in the hierarchy.
    DeeperThan { level: usize },
    Not { criterion: Box<TaskCriterion> },
    Any { of: Vec<TaskCriterion> },
    All { of: Vec<TaskCriterion> },
}

impl TaskPredicate for TaskCriterion {
    fn matches(&self, ctx: &TaskContext<'_>) -> bool {
        match self {
            TaskCriterion::Ids { ids } => ids.iter().any(|id| *id == ctx.task.id),
            TaskCriterion::Milestone => ctx
                .task
                .scenario(ctx.scenario)
                .map(|data| data.milestone)
                .unwrap_or(false),
            TaskCriterion::Container => ctx.task.is_container(),
            TaskCriterion::DeeperThan { level } => ctx.task.level() > *level,
            TaskCriterion::Not { criterion } => !criterion.matches(ctx),
            TaskCriterion::Any { of } => of.iter().any(|c| c.matches(ctx)),
            TaskCriterion::All { of } => of.iter().all(|c| c.matches(ctx)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceCriterion {
    Ids { ids: Vec<String> },
    /// Resource has members.
    Group,
    Not { criterion: Box<ResourceCriterion> },
    Any { of: Vec<ResourceCriterion> },
}

impl ResourcePredicate for ResourceCriterion {
    fn matches(&self, ctx: &ResourceContext<'_>) -> bool {
        match self {
            ResourceCriterion::Ids { ids } => ids.iter().any(|id| *id == ctx.resource.id),
            ResourceCriterion::Group => !ctx.resource.is_leaf(),
            ResourceCriterion::Not { criterion } => !criterion.matches(ctx),
            ResourceCriterion::Any { of } => of.iter().any(|c| c.matches(ctx)),
        }
    }
}
