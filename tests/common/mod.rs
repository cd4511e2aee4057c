#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use mspxml_export::{
    Booking, Dependency, ExportOptions, MspXmlExporter, ProjectMetadata, ProjectModel,
    ReportConfig, Resource, ResourceScenario, Schedule, Task, TaskScenario,
};
use roxmltree::Node;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

/// Day of March 2025 at a full hour.
pub fn march(day: u32, hour: u32) -> NaiveDateTime {
    at(2025, 3, day, hour, 0, 0)
}

pub fn metadata() -> ProjectMetadata {
    ProjectMetadata {
        project_name: "Apollo".into(),
        project_start: march(3, 0),
        project_end: march(31, 0),
        now: march(5, 9),
        currency: "EUR".into(),
        daily_working_hours: 8.0,
        weekly_working_days: 5.0,
        yearly_working_days: 240.0,
        rate: 800.0,
        ..ProjectMetadata::default()
    }
}

pub fn task(id: &str, name: &str, parent: Option<&str>, data: TaskScenario) -> Task {
    let mut task = Task::new(id, name);
    task.parent = parent.map(str::to_string);
    task.scenarios.push(data);
    task
}

pub fn resource(id: &str, name: &str, parent: Option<&str>, data: ResourceScenario) -> Resource {
    let mut resource = Resource::new(id, name);
    resource.parent = parent.map(str::to_string);
    resource.scenarios.push(data);
    resource
}

/// Tasks (UIDs in tree order):
/// proj 0 (container), spec 1, impl 2, done 3 (milestone), ops 4.
/// Resources: team (group of ann and bob), tool. Ann works on spec for two
/// 8 hour days, Bob (efficiency 0.5) on impl for three.
pub fn sample_parts() -> (ProjectMetadata, Vec<Task>, Vec<Resource>, Vec<Booking>) {
    let mut proj_data = TaskScenario::new(march(3, 9), march(7, 18));
    proj_data.priority = 600;
    let proj = task("proj", "Project", None, proj_data);

    let mut spec_data = TaskScenario::new(march(3, 9), march(4, 18));
    spec_data.responsible = vec!["ann".into()];
    let mut spec = task("spec", "Specification", Some("proj"), spec_data);
    spec.note = Some("Write it down".into());

    let mut impl_data = TaskScenario::new(march(5, 9), march(7, 18));
    impl_data.complete = Some(50.0);
    impl_data.start_preds = vec![Dependency::new("spec", true)];
    let implementation = task("impl", "Implementation", Some("proj"), impl_data);

    let mut done_data = TaskScenario::new(march(7, 18), march(7, 18));
    done_data.milestone = true;
    done_data.start_preds = vec![Dependency::new("impl", true)];
    let done = task("done", "Delivery", Some("proj"), done_data);

    let ops = task(
        "ops",
        "Operations",
        None,
        TaskScenario::new(march(3, 9), march(3, 12)),
    );

    let team = resource("team", "Team", None, ResourceScenario::default());
    let mut ann = resource(
        "ann",
        "Ann",
        Some("team"),
        ResourceScenario {
            rate: 800.0,
            ..ResourceScenario::default()
        },
    );
    ann.email = Some("ann@example.com".into());
    let bob = resource(
        "bob",
        "Bob",
        Some("team"),
        ResourceScenario {
            efficiency: 0.5,
            ..ResourceScenario::default()
        },
    );
    let tool = resource("tool", "Tool", None, ResourceScenario::default());

    let bookings = vec![
        Booking::new("ann", "spec", march(3, 9), march(3, 17)),
        Booking::new("ann", "spec", march(4, 9), march(4, 17)),
        Booking::new("bob", "impl", march(5, 9), march(5, 17)),
        Booking::new("bob", "impl", march(6, 9), march(6, 17)),
        Booking::new("bob", "impl", march(7, 9), march(7, 17)),
    ];

    (
        metadata(),
        vec![proj, spec, implementation, done, ops],
        vec![team, ann, bob, tool],
        bookings,
    )
}

pub fn sample_schedule() -> Schedule {
    let (metadata, tasks, resources, bookings) = sample_parts();
    Schedule::new(metadata, tasks, resources, bookings).unwrap()
}

pub fn fixed_options() -> ExportOptions {
    ExportOptions {
        generated_at: Some(march(1, 12)),
        software_name: "mspxml".into(),
        software_version: "1.0.0".into(),
        contact: Some("https://example.com".into()),
    }
}

pub fn export(model: &dyn ProjectModel, report: &ReportConfig) -> String {
    MspXmlExporter::new(model, report, fixed_options())
        .unwrap()
        .to_mspxml()
        .unwrap()
}

pub fn children<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Vec<Node<'a, 'i>> {
    node.children()
        .filter(|c| c.is_element() && c.tag_name().name() == name)
        .collect()
}

pub fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Node<'a, 'i> {
    children(node, name)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("<{}> has no <{name}>", node.tag_name().name()))
}

pub fn text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    children(node, name).first().and_then(|c| c.text())
}

/// `<Task>` element with the given UID.
pub fn task_with_uid<'a, 'i>(project: Node<'a, 'i>, uid: usize) -> Node<'a, 'i> {
    let uid = uid.to_string();
    children(child(project, "Tasks"), "Task")
        .into_iter()
        .find(|t| text(*t, "UID") == Some(uid.as_str()))
        .unwrap_or_else(|| panic!("no task with UID {uid}"))
}
