use super::PersistenceResult;
use crate::metadata::ProjectMetadata;
use crate::model::ProjectModel;
use crate::report::{ReportConfig, ReportSpec};
use crate::resource::Resource;
use crate::schedule::{Booking, Schedule};
use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

#[derive(Serialize, Deserialize)]
struct ScheduleSnapshot {
    #[serde(default)]
    metadata: ProjectMetadata,
    tasks: Vec<Task>,
    #[serde(default)]
    resources: Vec<Resource>,
    #[serde(default)]
    bookings: Vec<Booking>,
}

impl ScheduleSnapshot {
    fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            metadata: schedule.metadata().clone(),
            tasks: schedule.tasks().to_vec(),
            resources: schedule.resources().to_vec(),
            bookings: schedule.bookings().to_vec(),
        }
    }

    fn into_schedule(self) -> PersistenceResult<Schedule> {
        Ok(Schedule::new(
            self.metadata,
            self.tasks,
            self.resources,
            self.bookings,
        )?)
    }
}

pub fn save_schedule_to_json<P: AsRef<Path>>(
    schedule: &Schedule,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = ScheduleSnapshot::from_schedule(schedule);
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    debug!(path = %path.as_ref().display(), "schedule saved");
    Ok(())
}

/// Read a schedule snapshot. The schedule is validated before it is returned.
pub fn load_schedule_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path.as_ref())?;
    let snapshot: ScheduleSnapshot = serde_json::from_reader(BufReader::new(file))?;
    debug!(
        path = %path.as_ref().display(),
        tasks = snapshot.tasks.len(),
        resources = snapshot.resources.len(),
        "schedule loaded"
    );
    snapshot.into_schedule()
}

pub fn load_report_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<ReportConfig> {
    let file = File::open(path)?;
    let spec: ReportSpec = serde_json::from_reader(BufReader::new(file))?;
    Ok(spec.into())
}
