use super::encoding::{duration_to_msp, format_float, format_timestamp, whole_seconds};
use super::xml::XmlElement;
use super::{ExportResult, MspXmlExporter};
use crate::resource::Resource;
use crate::task::Task;
use chrono::{Duration, NaiveTime};
use tracing::{debug, trace};

impl MspXmlExporter<'_> {
    /// Assignments of leaf tasks and rolled-up containers.
    pub(super) fn assignments_element(&mut self) -> ExportResult<XmlElement> {
        let mut assignments = XmlElement::new("Assignments");
        let model = self.model;
        let tasks = self.lists.tasks.clone();
        for (task_uid, task) in tasks.into_iter().enumerate() {
            if task.is_container() && !self.rolls_up(task) {
                continue;
            }
            for resource in model.assigned_resources(task, self.scenario) {
                let Some(resource_uid) = self.lists.resource_index.uid(&resource.id) else {
                    trace!(task = %task.id, resource = %resource.id, "resource not exported");
                    continue;
                };
                let uid = self.next_assignment_uid;
                self.next_assignment_uid += 1;
                assignments.push(self.assignment_element(
                    uid,
                    task,
                    task_uid,
                    resource,
                    resource_uid,
                )?);
            }
        }
        debug!(count = self.next_assignment_uid, "assignments written");
        Ok(assignments)
    }

    fn assignment_element(
        &self,
        uid: usize,
        task: &Task,
        task_uid: usize,
        resource: &Resource,
        resource_uid: usize,
    ) -> ExportResult<XmlElement> {
        let data = task.scenario(self.scenario)?;

        let mut a = XmlElement::new("Assignment");
        a.push_text("UID", uid.to_string());
        a.push_text("TaskUID", task_uid.to_string());
        a.push_text("ResourceUID", resource_uid.to_string());
        a.push_text(
            "Units",
            format_float(resource.scenario(self.scenario)?.efficiency),
        );
        a.push_text("Start", format_timestamp(data.start));
        a.push_text("Finish", format_timestamp(data.end));
        a.push_text("Cost", "100.0");
        a.push_text("WorkContour", "8");
        // Must be 0, otherwise Project ignores the completed work.
        a.push_text("PercentWorkComplete", "0");
        let owner = self.responsible_names(data)?;
        if !owner.is_empty() {
            a.push_text("AssnOwner", owner);
        }

        let seconds_per_day = self.model.metadata().daily_working_hours * 3600.0;
        let mut cursor = data.start.date().and_time(NaiveTime::MIN);
        while cursor < data.end {
            let next = cursor + Duration::days(1);
            let lower = cursor.max(data.start).max(self.window_start);
            let upper = next.min(data.end).min(self.window_end);
            cursor = next;
            if lower >= upper {
                trace!(task = %task.id, day = %lower.date(), "day outside report window");
                continue;
            }

            let effort = self
                .model
                .effort(resource, task, self.scenario, lower, upper)?;
            let mut td = XmlElement::new("TimephasedData");
            td.push_text("UID", uid.to_string());
            // Any other type makes Project load the file very slowly.
            td.push_text("Type", "1");
            td.push_text("Start", format_timestamp(lower));
            td.push_text("Finish", format_timestamp(upper - Duration::seconds(1)));
            td.push_text("Unit", "2");
            td.push_text("Value", duration_to_msp(whole_seconds(effort * seconds_per_day)));
            a.push(td);
        }

        Ok(a)
    }
}
