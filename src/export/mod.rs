//! Microsoft Project XML (MSPDI) export of a scheduled project.
//!
//! [`MspXmlExporter`] selects and numbers the tasks and resources of one
//! report, then writes the project attributes, calendars, tasks, resources
//! and assignments with day by day work records. Each exporter value is
//! used for exactly one document.

mod assignments;
mod calendars;
pub mod encoding;
mod ordering;
mod resources;
mod tasks;
mod xml;

pub use calendars::{CalendarRegistry, CalendarUid, build_calendar};
pub use ordering::{ExportIndex, ExportLists, order_resources, order_tasks};
pub use xml::XmlElement;

use crate::criteria::TaskContext;
use crate::model::{ModelError, ProjectModel};
use crate::report::{ReportConfig, SourceLocation};
use crate::task::Task;
use chrono::{Local, NaiveDateTime};
use encoding::{format_float, format_timestamp};
use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;
use tracing::{debug, info};

pub const MSP_NAMESPACE: &str = "http://schemas.microsoft.com/project";

/// Value of the `SaveVersion` project field.
const SAVE_VERSION: &str = "14";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{location}: task '{task}' is listed more than once in the export")]
    DuplicateTask {
        task: String,
        location: SourceLocation,
    },
    #[error("{location}: {message}")]
    Configuration {
        message: String,
        location: SourceLocation,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("generated document is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Settings that do not come from the report definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Fixed generation time; the local clock is used when absent.
    pub generated_at: Option<NaiveDateTime>,
    pub software_name: String,
    pub software_version: String,
    pub contact: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            generated_at: None,
            software_name: env!("CARGO_PKG_NAME").to_string(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            contact: None,
        }
    }
}

pub struct MspXmlExporter<'a> {
    model: &'a dyn ProjectModel,
    report: &'a ReportConfig,
    options: ExportOptions,
    scenario: usize,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
    /// Level of the task root; subtracted from every outline level.
    root_level: usize,
    lists: ExportLists<'a>,
    calendars: CalendarRegistry,
    next_assignment_uid: usize,
}

impl<'a> MspXmlExporter<'a> {
    pub fn new(
        model: &'a dyn ProjectModel,
        report: &'a ReportConfig,
        options: ExportOptions,
    ) -> ExportResult<Self> {
        let configuration = |message: String| ExportError::Configuration {
            message,
            location: report.source.clone(),
        };

        let metadata = model.metadata();
        let scenario = report.scenario;
        if scenario >= metadata.scenario_count() {
            return Err(configuration(format!(
                "scenario {scenario} is out of range, the project has {}",
                metadata.scenario_count()
            )));
        }

        let window_start = report.start.unwrap_or(metadata.project_start);
        let window_end = report.end.unwrap_or(metadata.project_end);
        if window_start > window_end {
            return Err(configuration(format!(
                "report starts ({window_start}) after it ends ({window_end})"
            )));
        }

        let root_level = match &report.task_root {
            Some(root) => model
                .task(root)
                .map(Task::level)
                .ok_or_else(|| configuration(format!("unknown task root '{root}'")))?,
            None => 0,
        };

        let lists = ExportLists::build(model, report, scenario)?;

        Ok(Self {
            model,
            report,
            options,
            scenario,
            window_start,
            window_end,
            root_level,
            lists,
            calendars: CalendarRegistry::new(),
            next_assignment_uid: 0,
        })
    }

    /// Tasks selected for the document, in output order.
    pub fn tasks(&self) -> &[&'a Task] {
        &self.lists.tasks
    }

    pub fn task_index(&self) -> &ExportIndex {
        &self.lists.task_index
    }

    pub fn resource_index(&self) -> &ExportIndex {
        &self.lists.resource_index
    }

    /// Whether the rollup predicate holds for `task`.
    fn rolls_up(&self, task: &Task) -> bool {
        let ctx = TaskContext {
            task,
            model: self.model,
            scenario: self.scenario,
        };
        self.report
            .rollup_task
            .as_ref()
            .is_some_and(|p| p.matches(&ctx))
    }

    fn banner(&self, generated_at: NaiveDateTime) -> String {
        let metadata = self.model.metadata();
        let name = &self.options.software_name;
        let mut banner = format!(
            "Generated by {name} v{} on {}\n",
            self.options.software_version,
            format_timestamp(generated_at)
        );
        if let Some(contact) = &self.options.contact {
            banner.push_str(&format!("For more information about {name} see {contact}.\n"));
        }
        banner.push_str(&format!("Project: {}\n", metadata.project_name));
        banner.push_str(&format!("Date:    {}\n", format_timestamp(metadata.now)));
        banner
    }

    /// Scalar project fields, in schema order.
    fn push_project_attributes(
        &self,
        project: &mut XmlElement,
        generated_at: NaiveDateTime,
        calendar_uid: CalendarUid,
    ) {
        let metadata = self.model.metadata();
        let daily_hours = metadata.daily_working_hours;
        let rate = format_float(metadata.rate / daily_hours);

        project.push_text("SaveVersion", SAVE_VERSION);
        project.push_text("Name", format!("{}.xml", self.report.name));
        project.push_text("CreationDate", format_timestamp(generated_at));
        project.push_text("ScheduleFromStart", "1");
        project.push_text("StartDate", format_timestamp(metadata.project_start));
        project.push_text("FinishDate", format_timestamp(metadata.project_end));
        project.push_text("DefaultStartTime", "09:00:00");
        project.push_text("DefaultFinishTime", "17:00:00");
        project.push_text("CalendarUID", calendar_uid.to_string());
        project.push_text("MinutesPerDay", ((daily_hours * 60.0).trunc() as i64).to_string());
        project.push_text(
            "MinutesPerWeek",
            ((metadata.weekly_working_days * daily_hours * 60.0).trunc() as i64).to_string(),
        );
        project.push_text("DaysPerMonth", format_float(metadata.yearly_working_days / 12.0));
        project.push_text("CurrentDate", format_timestamp(metadata.now));
        project.push_text("StatusDate", format_timestamp(metadata.now));
        project.push_text(
            "WorkFormat",
            self.report.load_unit.msp_work_format().to_string(),
        );
        project.push_text("NewTasksAreManual", "1");
        project.push_text("SpreadPercentComplete", "0");
        project.push_text("StandardRate", rate.as_str());
        project.push_text("OvertimeRate", rate);
        project.push_text("CurrencySymbol", metadata.currency.as_str());
        project.push_text("CurrencyCode", metadata.currency.as_str());
    }

    /// Render the complete document.
    pub fn to_mspxml(mut self) -> ExportResult<String> {
        let generated_at = self
            .options
            .generated_at
            .unwrap_or_else(|| Local::now().naive_local());
        info!(
            report = %self.report.name,
            scenario = self.scenario,
            tasks = self.lists.tasks.len(),
            resources = self.lists.resources.len(),
            "exporting MS Project XML"
        );

        let mut calendars = XmlElement::new("Calendars");
        let standard = build_calendar(
            &mut self.calendars,
            &mut calendars,
            "Standard",
            &self.model.metadata().working_hours,
        );

        let tasks = self.tasks_element()?;
        let resources = self.resources_element(&mut calendars)?;
        let assignments = self.assignments_element()?;
        debug!(calendars = self.calendars.len(), "calendars written");

        let mut project = XmlElement::new("Project").with_attribute("xmlns", MSP_NAMESPACE);
        self.push_project_attributes(&mut project, generated_at, standard);
        project.push(calendars);
        project.push(tasks);
        project.push(resources);
        project.push(assignments);

        let document = xml::render_document(&self.banner(generated_at), &project)?;
        info!(bytes = document.len(), "export finished");
        Ok(document)
    }
}

/// Export `report` with default [`ExportOptions`].
pub fn export_mspxml(model: &dyn ProjectModel, report: &ReportConfig) -> ExportResult<String> {
    MspXmlExporter::new(model, report, ExportOptions::default())?.to_mspxml()
}
