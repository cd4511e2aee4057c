use super::{ExportError, ExportResult};
use crate::criteria::{ResourceContext, TaskContext};
use crate::model::ProjectModel;
use crate::report::{ReportConfig, ResourceSortKey, SortCriterion};
use crate::resource::Resource;
use crate::task::Task;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Dense 0-based export UIDs keyed by task or resource id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportIndex {
    uids: HashMap<String, usize>,
    len: usize,
}

impl ExportIndex {
    /// Number the ids in iteration order. Repeated ids keep their first UID.
    pub fn new<'i, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'i str>,
    {
        let mut index = Self::default();
        for id in ids {
            if !index.uids.contains_key(id) {
                index.uids.insert(id.to_string(), index.len);
                index.len += 1;
            }
        }
        index
    }

    pub fn uid(&self, id: &str) -> Option<usize> {
        self.uids.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.uids.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Tasks and resources selected for one export, in output order.
pub struct ExportLists<'m> {
    pub tasks: Vec<&'m Task>,
    pub resources: Vec<&'m Resource>,
    pub task_index: ExportIndex,
    pub resource_index: ExportIndex,
}

impl<'m> ExportLists<'m> {
    pub fn build(
        model: &'m dyn ProjectModel,
        report: &ReportConfig,
        scenario: usize,
    ) -> ExportResult<Self> {
        let tasks = order_tasks(model, report, scenario)?;
        let resources = order_resources(model, report, scenario);
        let task_index = ExportIndex::new(tasks.iter().map(|t| t.id.as_str()));
        let resource_index = ExportIndex::new(resources.iter().map(|r| r.id.as_str()));
        Ok(Self {
            tasks,
            resources,
            task_index,
            resource_index,
        })
    }
}

/// Direct sub tasks of `task` including adopted ones, by sequence number.
fn sub_tasks<'m>(model: &'m dyn ProjectModel, task: &Task) -> Vec<&'m Task> {
    let mut subs: Vec<&Task> = task
        .children()
        .iter()
        .chain(task.adoptees())
        .filter_map(|id| model.task(id))
        .collect();
    subs.sort_by_key(|t| t.seqno());
    subs
}

/// Tasks in tree order. User sort criteria are ignored on purpose: the
/// format requires parents to precede their children.
pub fn order_tasks<'m>(
    model: &'m dyn ProjectModel,
    report: &ReportConfig,
    scenario: usize,
) -> ExportResult<Vec<&'m Task>> {
    let mut pending: Vec<&Task> = match &report.task_root {
        Some(root) => {
            let root = model
                .task(root)
                .ok_or_else(|| ExportError::Configuration {
                    message: format!("unknown task root '{root}'"),
                    location: report.source.clone(),
                })?;
            sub_tasks(model, root)
        }
        None => model.tasks().iter().filter(|t| t.parent.is_none()).collect(),
    };
    pending.reverse();

    let mut ordered = Vec::new();
    while let Some(task) = pending.pop() {
        let ctx = TaskContext {
            task,
            model,
            scenario,
        };
        let hidden = report.hide_task.as_ref().is_some_and(|p| p.matches(&ctx));
        let rolled_up = report
            .rollup_task
            .as_ref()
            .is_some_and(|p| p.matches(&ctx));

        if hidden {
            trace!(task = %task.id, "task hidden");
        } else {
            ordered.push(task);
        }
        if rolled_up && !hidden {
            continue;
        }
        pending.extend(sub_tasks(model, task).into_iter().rev());
    }

    let mut seen = HashSet::new();
    for task in &ordered {
        if !seen.insert(task.id.as_str()) {
            return Err(ExportError::DuplicateTask {
                task: task.id.clone(),
                location: report.source.clone(),
            });
        }
    }

    Ok(ordered)
}

fn compare_resources(
    criteria: &[SortCriterion],
    a: (usize, &Resource),
    b: (usize, &Resource),
) -> Ordering {
    for criterion in criteria {
        let ord = match criterion.key {
            ResourceSortKey::Tree => a.0.cmp(&b.0),
            ResourceSortKey::Id => a.1.id.cmp(&b.1.id),
            ResourceSortKey::Name => a.1.name.cmp(&b.1.name),
            ResourceSortKey::Seqno => a.1.seqno().cmp(&b.1.seqno()),
        };
        let ord = if criterion.ascending { ord } else { ord.reverse() };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Exportable leaf resources. Groups only contribute their members.
pub fn order_resources<'m>(
    model: &'m dyn ProjectModel,
    report: &ReportConfig,
    scenario: usize,
) -> Vec<&'m Resource> {
    let mut pending: Vec<&Resource> = model
        .resources()
        .iter()
        .filter(|r| r.parent.is_none())
        .rev()
        .collect();

    let mut walked = Vec::new();
    while let Some(resource) = pending.pop() {
        let ctx = ResourceContext {
            resource,
            model,
            scenario,
        };
        let hidden = report
            .hide_resource
            .as_ref()
            .is_some_and(|p| p.matches(&ctx));
        let rolled_up = report
            .rollup_resource
            .as_ref()
            .is_some_and(|p| p.matches(&ctx));

        if !hidden {
            walked.push(resource);
        }
        if rolled_up && !hidden {
            continue;
        }
        let mut members: Vec<&Resource> = resource
            .children()
            .iter()
            .filter_map(|id| model.resource(id))
            .collect();
        members.sort_by_key(|r| std::cmp::Reverse(r.seqno()));
        pending.extend(members);
    }

    let mut seen = HashSet::new();
    let mut leaves: Vec<(usize, &Resource)> = walked
        .into_iter()
        .filter(|r| r.is_leaf())
        .filter(|r| seen.insert(r.id.as_str()))
        .enumerate()
        .collect();
    leaves.sort_by(|a, b| compare_resources(&report.sort_resources, *a, *b));
    leaves.into_iter().map(|(_, r)| r).collect()
}
