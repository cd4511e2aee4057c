use super::encoding::{duration_to_msp, format_timestamp};
use super::xml::XmlElement;
use super::{ExportResult, MspXmlExporter};
use crate::model::ModelError;
use crate::task::{Dependency, Task, TaskScenario};
use tracing::{debug, trace};

/// Link type codes of `PredecessorLink/Type`.
const LINK_FINISH_FINISH: u8 = 0;
const LINK_FINISH_START: u8 = 1;
const LINK_START_FINISH: u8 = 2;
const LINK_START_START: u8 = 3;

impl MspXmlExporter<'_> {
    pub(super) fn tasks_element(&self) -> ExportResult<XmlElement> {
        let mut tasks = XmlElement::new("Tasks");
        for (uid, task) in self.lists.tasks.iter().enumerate() {
            tasks.push(self.task_element(uid, task)?);
        }
        debug!(count = self.lists.tasks.len(), "tasks written");
        Ok(tasks)
    }

    /// Comma separated names of the responsible resources.
    pub(super) fn responsible_names(&self, data: &TaskScenario) -> ExportResult<String> {
        let names = data
            .responsible
            .iter()
            .map(|id| {
                self.model
                    .resource(id)
                    .map(|r| r.name.as_str())
                    .ok_or_else(|| ModelError::UnknownResource(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names.join(", "))
    }

    fn task_element(&self, uid: usize, task: &Task) -> ExportResult<XmlElement> {
        let data = task.scenario(self.scenario)?;
        let start = format_timestamp(data.start);
        let end = format_timestamp(data.end);

        let mut t = XmlElement::new("Task");
        t.push_text("UID", uid.to_string());
        t.push_text("ID", uid.to_string());
        t.push_text("Active", "1");
        t.push_text("Type", "0");
        t.push_text("IsNull", "0");
        t.push_text("Name", task.name.as_str());
        t.push_text("WBS", task.wbs());
        t.push_text("OutlineNumber", task.wbs());
        t.push_text(
            "OutlineLevel",
            task.level().saturating_sub(self.root_level).to_string(),
        );
        t.push_text("Priority", data.priority.to_string());
        t.push_text("Start", start.as_str());
        t.push_text("Finish", end.as_str());
        t.push_text("ManualStart", start.as_str());
        t.push_text("ManualFinish", end.as_str());
        t.push_text("ActualStart", start.as_str());
        t.push_text("ActualFinish", end.as_str());
        t.push_text("ConstraintType", "2");
        t.push_text("ConstraintDate", start.as_str());
        t.push_text("FixedCostAccrual", "3");
        if let Some(note) = &task.note {
            t.push_text("Notes", note.as_str());
        }
        let contact = self.responsible_names(data)?;
        if !contact.is_empty() {
            t.push_text("Contact", contact);
        }

        if task.is_container() {
            let manual = if self.report.rollup_task.is_some() { "1" } else { "0" };
            let summary = if self.rolls_up(task) { "0" } else { "1" };
            t.push_text("Manual", manual);
            t.push_text("Summary", summary);
        } else {
            t.push_text("Manual", "1");
            t.push_text("Summary", "0");
            t.push_text("Estimated", "0");
            t.push_text("DurationFormat", "7");
            if data.milestone {
                t.push_text("Milestone", "1");
            } else {
                let duration = duration_to_msp(data.duration_seconds());
                let complete = self.model.completion(task, self.scenario)?;
                let percent = (complete.trunc() as i64).to_string();
                t.push_text("Duration", duration.as_str());
                t.push_text("Work", duration);
                t.push_text("Milestone", "0");
                t.push_text("EffortDriven", "1");
                t.push_text("PercentComplete", percent.as_str());
                t.push_text("PercentWorkComplete", percent);
            }
        }

        let parent = match self.model.parent_task(task)? {
            Some(parent) => Some(parent.scenario(self.scenario)?),
            None => None,
        };
        let start_links = self.predecessor_links(
            task,
            &data.start_preds,
            parent.map(|p| p.start_preds.as_slice()),
            (LINK_FINISH_START, LINK_START_START),
        );
        let end_links = self.predecessor_links(
            task,
            &data.end_preds,
            parent.map(|p| p.end_preds.as_slice()),
            (LINK_FINISH_FINISH, LINK_START_FINISH),
        );
        for link in start_links.into_iter().chain(end_links) {
            t.push(link);
        }

        Ok(t)
    }

    /// Links for one predecessor set. `codes` holds the type for
    /// dependencies on the target's end and on its start. Links the parent
    /// already carries and links to tasks outside the export are dropped.
    fn predecessor_links(
        &self,
        task: &Task,
        deps: &[Dependency],
        inherited: Option<&[Dependency]>,
        codes: (u8, u8),
    ) -> Vec<XmlElement> {
        let mut links = Vec::new();
        for dep in deps {
            let Some(target) = self.lists.task_index.uid(&dep.task) else {
                trace!(task = %task.id, target = %dep.task, "predecessor not exported");
                continue;
            };
            if inherited.is_some_and(|set| set.contains(dep)) {
                trace!(task = %task.id, target = %dep.task, "predecessor inherited from parent");
                continue;
            }
            let code = if dep.on_end { codes.0 } else { codes.1 };
            let mut link = XmlElement::new("PredecessorLink");
            link.push_text("PredecessorUID", target.to_string());
            link.push_text("Type", code.to_string());
            links.push(link);
        }
        links
    }
}
