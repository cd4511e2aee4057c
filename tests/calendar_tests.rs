use chrono::Weekday;
use mspxml_export::export::{CalendarRegistry, XmlElement, build_calendar};
use mspxml_export::{
    ModelError, ProjectMetadata, Resource, ResourceScenario, Schedule, WorkingHours,
    WorkingInterval,
};

#[test]
fn working_hours_round_trip_through_json() {
    let mut hours = WorkingHours::non_working();
    hours.set_day(Weekday::Sat, vec![WorkingInterval::hours(10, 14)]);
    let json = serde_json::to_string(&hours).unwrap();
    let back: WorkingHours = serde_json::from_str(&json).unwrap();
    assert_eq!(back, hours);
    assert!(back.is_working_day(Weekday::Sat));
    assert!(!back.is_working_day(Weekday::Mon));
}

#[test]
fn overlapping_intervals_are_invalid() {
    let mut hours = WorkingHours::non_working();
    hours.set_day(
        Weekday::Tue,
        vec![WorkingInterval::hours(9, 13), WorkingInterval::hours(12, 17)],
    );
    assert!(hours.validate().is_err());

    let mut hours = WorkingHours::non_working();
    hours.set_day(Weekday::Tue, vec![WorkingInterval::hours(20, 25)]);
    assert!(hours.validate().is_err());
}

#[test]
fn resource_with_bad_hours_is_rejected() {
    let mut hours = WorkingHours::non_working();
    hours.set_day(Weekday::Wed, vec![WorkingInterval::hours(17, 9)]);
    let mut night_owl = Resource::new("owl", "Owl");
    night_owl.scenarios.push(ResourceScenario {
        working_hours: hours,
        ..ResourceScenario::default()
    });

    let err = Schedule::new(
        ProjectMetadata::default(),
        Vec::new(),
        vec![night_owl],
        Vec::new(),
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::InvalidWorkingHours { owner, .. } if owner == "owl"));
}

#[test]
fn calendars_get_sequential_uids() {
    let mut registry = CalendarRegistry::new();
    let mut calendars = XmlElement::new("Calendars");
    let hours = WorkingHours::default();

    let standard = build_calendar(&mut registry, &mut calendars, "Standard", &hours);
    let ann = build_calendar(&mut registry, &mut calendars, "Calendar Ann", &hours);
    let bob = build_calendar(&mut registry, &mut calendars, "Calendar Bob", &hours);

    assert_eq!((standard, ann, bob), (0, 1, 2));
    assert_eq!(registry.uid("Calendar Bob"), Some(2));
    assert_eq!(calendars.children().len(), 3);
    // identical hours are not merged
    assert_ne!(calendars.children()[1], calendars.children()[2]);
}
