use crate::graph::{PropertyTree, TreeNode};
use crate::metadata::ProjectMetadata;
use crate::model::{ModelError, ModelResult, ProjectModel};
use crate::resource::Resource;
use crate::task::Task;
use crate::validation;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A resource working on a leaf task during `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub resource: String,
    pub task: String,
    #[serde(default)]
    pub scenario: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Booking {
    pub fn new(
        resource: impl Into<String>,
        task: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            resource: resource.into(),
            task: task.into(),
            scenario: 0,
            start,
            end,
        }
    }
}

/// In-memory scheduled project. Built once, validated, then only queried.
#[derive(Debug, Clone)]
pub struct Schedule {
    metadata: ProjectMetadata,
    tasks: Vec<Task>,
    resources: Vec<Resource>,
    bookings: Vec<Booking>,
    task_lookup: HashMap<String, usize>,
    resource_lookup: HashMap<String, usize>,
}

impl Schedule {
    pub fn new(
        metadata: ProjectMetadata,
        mut tasks: Vec<Task>,
        mut resources: Vec<Resource>,
        bookings: Vec<Booking>,
    ) -> ModelResult<Self> {
        validation::validate_metadata(&metadata)?;

        let task_tree = PropertyTree::build(
            "task",
            tasks.iter().map(|t| TreeNode {
                id: &t.id,
                parent: t.parent.as_deref(),
                adopters: &t.adopted_by,
            }),
        )?;
        for (task, position) in tasks.iter_mut().zip(task_tree.positions()) {
            task.position = position;
        }

        let resource_tree = PropertyTree::build(
            "resource",
            resources.iter().map(|r| TreeNode {
                id: &r.id,
                parent: r.parent.as_deref(),
                adopters: &[],
            }),
        )?;
        for (resource, position) in resources.iter_mut().zip(resource_tree.positions()) {
            resource.position = position;
        }

        let task_lookup: HashMap<String, usize> = tasks
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.id.clone(), idx))
            .collect();
        let resource_lookup: HashMap<String, usize> = resources
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.id.clone(), idx))
            .collect();

        let scenario_count = metadata.scenario_count();
        for task in &tasks {
            validation::validate_task(task, scenario_count, &task_lookup, &resource_lookup)?;
        }
        for resource in &resources {
            validation::validate_resource(resource, scenario_count)?;
        }
        for booking in &bookings {
            validation::validate_booking(
                booking,
                scenario_count,
                task_lookup.get(&booking.task).map(|idx| &tasks[*idx]),
                resource_lookup.get(&booking.resource).map(|idx| &resources[*idx]),
            )?;
        }

        Ok(Self {
            metadata,
            tasks,
            resources,
            bookings,
            task_lookup,
            resource_lookup,
        })
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Ids of the task and all of its descendants.
    fn subtree<'s>(&'s self, task: &'s Task) -> HashSet<&'s str> {
        let mut ids = HashSet::new();
        let mut stack = vec![task];
        while let Some(current) = stack.pop() {
            ids.insert(current.id.as_str());
            stack.extend(current.children().iter().filter_map(|c| self.task(c)));
        }
        ids
    }
}

fn overlap_seconds(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> i64 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    if end > start {
        (end - start).num_seconds()
    } else {
        0
    }
}

impl ProjectModel for Schedule {
    fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn resources(&self) -> &[Resource] {
        &self.resources
    }

    fn task(&self, id: &str) -> Option<&Task> {
        self.task_lookup.get(id).map(|idx| &self.tasks[*idx])
    }

    fn resource(&self, id: &str) -> Option<&Resource> {
        self.resource_lookup.get(id).map(|idx| &self.resources[*idx])
    }

    fn assigned_resources(&self, task: &Task, scenario: usize) -> Vec<&Resource> {
        let subtree = self.subtree(task);
        let booked: HashSet<&str> = self
            .bookings
            .iter()
            .filter(|b| b.scenario == scenario && subtree.contains(b.task.as_str()))
            .map(|b| b.resource.as_str())
            .collect();
        self.resources
            .iter()
            .filter(|r| booked.contains(r.id.as_str()))
            .collect()
    }

    fn effort(
        &self,
        resource: &Resource,
        task: &Task,
        scenario: usize,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ModelResult<f64> {
        if start > end {
            return Err(ModelError::InvalidWindow { start, end });
        }
        let efficiency = resource.scenario(scenario)?.efficiency;
        let subtree = self.subtree(task);
        let seconds: i64 = self
            .bookings
            .iter()
            .filter(|b| {
                b.scenario == scenario
                    && b.resource == resource.id
                    && subtree.contains(b.task.as_str())
            })
            .map(|b| overlap_seconds(b.start, b.end, start, end))
            .sum();
        Ok(seconds as f64 * efficiency / (self.metadata.daily_working_hours * 3600.0))
    }
}
