mod common;

use chrono::NaiveDateTime;
use common::*;
use mspxml_export::export::encoding::{TIMESTAMP_FORMAT, msp_to_duration};
use mspxml_export::{
    Booking, ExportError, ModelError, ModelResult, MspXmlExporter, ProjectMetadata, ProjectModel,
    ReportConfig, Resource, ResourceScenario, Schedule, Task, TaskScenario,
};
use roxmltree::{Document, Node};

fn parse_time(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).unwrap()
}

fn timephased<'a, 'i>(assignment: Node<'a, 'i>) -> Vec<(NaiveDateTime, NaiveDateTime, i64)> {
    children(assignment, "TimephasedData")
        .into_iter()
        .map(|d| {
            (
                parse_time(text(d, "Start").unwrap()),
                parse_time(text(d, "Finish").unwrap()),
                msp_to_duration(text(d, "Value").unwrap()).unwrap(),
            )
        })
        .collect()
}

/// One leaf task of 500 seconds crossing midnight, worked on by one resource.
fn short_task_schedule() -> Schedule {
    let mut metadata = metadata();
    metadata.project_start = at(2025, 3, 1, 0, 0, 0);
    let start = at(2025, 3, 3, 23, 55, 0);
    let end = at(2025, 3, 4, 0, 3, 20);
    let short = task("short", "Short", None, TaskScenario::new(start, end));
    let ann = resource("ann", "Ann", None, ResourceScenario::default());
    Schedule::new(
        metadata,
        vec![short],
        vec![ann],
        vec![Booking::new("ann", "short", start, end)],
    )
    .unwrap()
}

#[test]
fn short_task_over_midnight_has_two_records() {
    let schedule = short_task_schedule();
    let xml = export(&schedule, &ReportConfig::new("r"));
    let doc = Document::parse(&xml).unwrap();
    let project = doc.root_element();

    let short = task_with_uid(project, 0);
    assert_eq!(text(short, "Duration"), Some("PT0H8M20S"));

    let assignment = child(child(project, "Assignments"), "Assignment");
    let days = timephased(assignment);
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].0, at(2025, 3, 3, 23, 55, 0));
    assert_eq!(days[0].1, at(2025, 3, 3, 23, 59, 59));
    assert_eq!(days[0].2, 300);
    assert_eq!(days[1].0, at(2025, 3, 4, 0, 0, 0));
    assert_eq!(days[1].1, at(2025, 3, 4, 0, 3, 19));
    assert_eq!(days[1].2, 200);
}

#[test]
fn intervals_are_contiguous_and_cover_the_task() {
    let schedule = sample_schedule();
    let xml = export(&schedule, &ReportConfig::new("r"));
    let doc = Document::parse(&xml).unwrap();
    let project = doc.root_element();

    for assignment in children(child(project, "Assignments"), "Assignment") {
        let task = task_with_uid(project, text(assignment, "TaskUID").unwrap().parse().unwrap());
        let start = parse_time(text(task, "Start").unwrap());
        let finish = parse_time(text(task, "Finish").unwrap());

        let days = timephased(assignment);
        assert_eq!(days.first().unwrap().0, start);
        assert_eq!(days.last().unwrap().1 + chrono::Duration::seconds(1), finish);
        for pair in days.windows(2) {
            assert!(pair[0].0 <= pair[0].1);
            assert_eq!(pair[0].1 + chrono::Duration::seconds(1), pair[1].0);
        }
    }
}

#[test]
fn days_outside_the_report_window_are_skipped() {
    let schedule = sample_schedule();
    let mut report = ReportConfig::new("r");
    report.start = Some(march(4, 0));
    report.end = Some(march(6, 12));
    let xml = export(&schedule, &report);
    let doc = Document::parse(&xml).unwrap();
    let assignments = children(child(doc.root_element(), "Assignments"), "Assignment");

    // spec starts on the 3rd, before the window
    let spec = timephased(assignments[0]);
    assert_eq!(spec.len(), 1);
    assert_eq!(spec[0].0, march(4, 0));
    assert_eq!(spec[0].2, 8 * 3600);

    // impl is cut at noon of the 6th and its last day vanishes
    let implementation = timephased(assignments[1]);
    assert_eq!(implementation.len(), 2);
    assert_eq!(implementation[1].0, march(6, 0));
    assert_eq!(implementation[1].1, at(2025, 3, 6, 11, 59, 59));
    // three booked hours at half efficiency
    assert_eq!(implementation[1].2, 5400);
}

#[test]
fn empty_days_are_skipped() {
    let mut metadata = metadata();
    metadata.project_start = march(1, 0);
    let mut data = TaskScenario::new(march(3, 12), march(3, 12));
    data.milestone = true;
    let gate = task("gate", "Gate", None, data);
    let ann = resource("ann", "Ann", None, ResourceScenario::default());
    let schedule = Schedule::new(
        metadata,
        vec![gate],
        vec![ann],
        vec![Booking::new("ann", "gate", march(3, 12), march(3, 13))],
    )
    .unwrap();

    // the only day of a zero length task clips to an empty interval
    let xml = export(&schedule, &ReportConfig::new("r"));
    let doc = Document::parse(&xml).unwrap();
    let assignments = children(child(doc.root_element(), "Assignments"), "Assignment");
    assert_eq!(assignments.len(), 1);
    assert!(timephased(assignments[0]).is_empty());
}

/// Delegates to a schedule but fails every effort query.
struct BrokenEffort(Schedule);

impl ProjectModel for BrokenEffort {
    fn metadata(&self) -> &ProjectMetadata {
        self.0.metadata()
    }

    fn tasks(&self) -> &[Task] {
        self.0.tasks()
    }

    fn resources(&self) -> &[Resource] {
        self.0.resources()
    }

    fn task(&self, id: &str) -> Option<&Task> {
        self.0.task(id)
    }

    fn resource(&self, id: &str) -> Option<&Resource> {
        self.0.resource(id)
    }

    fn assigned_resources(&self, task: &Task, scenario: usize) -> Vec<&Resource> {
        self.0.assigned_resources(task, scenario)
    }

    fn effort(
        &self,
        _resource: &Resource,
        task: &Task,
        _scenario: usize,
        _start: NaiveDateTime,
        _end: NaiveDateTime,
    ) -> ModelResult<f64> {
        Err(ModelError::UnknownTask(task.id.clone()))
    }
}

#[test]
fn failing_effort_query_aborts_the_export() {
    let model = BrokenEffort(sample_schedule());
    let report = ReportConfig::new("r");
    let result = MspXmlExporter::new(&model, &report, fixed_options())
        .unwrap()
        .to_mspxml();
    match result {
        Err(ExportError::Model(ModelError::UnknownTask(id))) => assert_eq!(id, "spec"),
        other => panic!("unexpected result {other:?}"),
    }
}
