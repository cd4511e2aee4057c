pub mod calendar;
pub mod criteria;
pub mod export;
pub mod graph;
pub mod metadata;
pub mod model;
pub mod persistence;
pub mod report;
pub mod resource;
pub mod schedule;
pub mod task;
pub(crate) mod validation;

pub use calendar::{WorkingHours, WorkingInterval};
pub use criteria::{
    ResourceContext, ResourceCriterion, ResourcePredicate, TaskContext, TaskCriterion,
    TaskPredicate,
};
pub use export::{
    CalendarRegistry, CalendarUid, ExportError, ExportIndex, ExportOptions, ExportResult,
    MspXmlExporter, export_mspxml,
};
pub use metadata::ProjectMetadata;
pub use model::{ModelError, ModelResult, ProjectModel};
pub use persistence::{
    PersistenceError, PersistenceResult, load_report_from_json, load_schedule_from_json,
    save_schedule_to_json,
};
pub use report::{
    LoadUnit, ReportConfig, ReportSpec, ResourceSortKey, SortCriterion, SourceLocation,
};
pub use resource::{Resource, ResourceScenario};
pub use schedule::{Booking, Schedule};
pub use task::{Dependency, Task, TaskScenario};
