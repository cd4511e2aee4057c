mod common;

use common::*;
use mspxml_export::{
    ExportOptions, MspXmlExporter, ProjectModel, ReportConfig, ReportSpec, ResourceContext,
    ResourceCriterion, ResourcePredicate, Schedule, TaskContext, TaskCriterion, TaskPredicate,
};

fn task_matches(schedule: &Schedule, criterion: &TaskCriterion, id: &str) -> bool {
    let ctx = TaskContext {
        task: schedule.task(id).unwrap(),
        model: schedule,
        scenario: 0,
    };
    criterion.matches(&ctx)
}

fn resource_matches(schedule: &Schedule, criterion: &ResourceCriterion, id: &str) -> bool {
    let ctx = ResourceContext {
        resource: schedule.resource(id).unwrap(),
        model: schedule,
        scenario: 0,
    };
    criterion.matches(&ctx)
}

#[test]
fn task_criteria_combine() {
    let schedule = sample_schedule();
    let criterion: TaskCriterion = serde_json::from_str(
        r#"{
            "kind": "any",
            "of": [
                { "kind": "container" },
                {
                    "kind": "all",
                    "of": [
                        { "kind": "deeper_than", "level": 0 },
                        { "kind": "not", "criterion": { "kind": "milestone" } }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let matched: Vec<&str> = ["proj", "spec", "impl", "done", "ops"]
        .into_iter()
        .filter(|id| task_matches(&schedule, &criterion, id))
        .collect();
    assert_eq!(matched, ["proj", "spec", "impl"]);
}

#[test]
fn resource_criteria_combine() {
    let schedule = sample_schedule();
    let criterion: ResourceCriterion = serde_json::from_str(
        r#"{
            "kind": "not",
            "criterion": {
                "kind": "any",
                "of": [{ "kind": "group" }, { "kind": "ids", "ids": ["ann"] }]
            }
        }"#,
    )
    .unwrap();

    let matched: Vec<&str> = ["team", "ann", "bob", "tool"]
        .into_iter()
        .filter(|id| resource_matches(&schedule, &criterion, id))
        .collect();
    assert_eq!(matched, ["bob", "tool"]);
}

#[test]
fn criteria_from_a_report_file_drive_the_selection() {
    let schedule = sample_schedule();
    let spec: ReportSpec = serde_json::from_str(
        r#"{
            "hide_task": {
                "kind": "all",
                "of": [
                    { "kind": "deeper_than", "level": 0 },
                    { "kind": "not", "criterion": { "kind": "milestone" } }
                ]
            },
            "hide_resource": {
                "kind": "not",
                "criterion": {
                    "kind": "any",
                    "of": [{ "kind": "group" }, { "kind": "ids", "ids": ["ann"] }]
                }
            }
        }"#,
    )
    .unwrap();
    let report = ReportConfig::from(spec);

    let exporter = MspXmlExporter::new(&schedule, &report, ExportOptions::default()).unwrap();
    let ids: Vec<_> = exporter.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["proj", "done", "ops"]);
    assert_eq!(exporter.resource_index().len(), 1);
    assert_eq!(exporter.resource_index().uid("ann"), Some(0));
}

#[test]
fn unknown_criterion_kind_is_rejected() {
    let err = serde_json::from_str::<TaskCriterion>(r#"{ "kind": "late" }"#);
    assert!(err.is_err());
}
