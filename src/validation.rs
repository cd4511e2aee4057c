use crate::metadata::ProjectMetadata;
use crate::model::{ModelError, ModelResult};
use crate::resource::Resource;
use crate::schedule::Booking;
use crate::task::Task;
use std::collections::HashMap;

const EPSILON: f64 = 1e-6;

pub fn validate_metadata(metadata: &ProjectMetadata) -> ModelResult<()> {
    if metadata.scenarios.is_empty() {
        return Err(ModelError::InvalidProject(
            "at least one scenario is required".into(),
        ));
    }
    if !metadata.daily_working_hours.is_finite() || metadata.daily_working_hours < EPSILON {
        return Err(ModelError::InvalidProject(format!(
            "daily working hours must be positive (got {})",
            metadata.daily_working_hours
        )));
    }
    if metadata.project_start > metadata.project_end {
        return Err(ModelError::InvalidProject(format!(
            "project start {} is after project end {}",
            metadata.project_start, metadata.project_end
        )));
    }
    metadata
        .working_hours
        .validate()
        .map_err(|reason| ModelError::InvalidWorkingHours {
            owner: metadata.project_name.clone(),
            reason,
        })
}

pub fn validate_task(
    task: &Task,
    scenario_count: usize,
    tasks: &HashMap<String, usize>,
    resources: &HashMap<String, usize>,
) -> ModelResult<()> {
    if task.scenarios.len() < scenario_count {
        return Err(ModelError::MissingScenario {
            kind: "task",
            id: task.id.clone(),
            scenario: task.scenarios.len(),
        });
    }

    for data in &task.scenarios {
        if data.start > data.end {
            return Err(ModelError::InvertedTask {
                id: task.id.clone(),
                start: data.start,
                end: data.end,
            });
        }
        if let Some(pct) = data.complete {
            if !pct.is_finite() || pct < -EPSILON || pct > 100.0 + EPSILON {
                return Err(ModelError::InvalidProject(format!(
                    "task '{}' has invalid completion {} (must be between 0 and 100)",
                    task.id, pct
                )));
            }
        }
        if let Some(unknown) = data.responsible.iter().find(|r| !resources.contains_key(*r)) {
            return Err(ModelError::UnknownResource(unknown.clone()));
        }
        if let Some(unknown) = data
            .start_preds
            .iter()
            .chain(&data.end_preds)
            .find(|dep| !tasks.contains_key(&dep.task))
        {
            return Err(ModelError::InvalidProject(format!(
                "task '{}' depends on unknown task '{}'",
                task.id, unknown.task
            )));
        }
    }
    Ok(())
}

pub fn validate_resource(resource: &Resource, scenario_count: usize) -> ModelResult<()> {
    if resource.scenarios.len() < scenario_count {
        return Err(ModelError::MissingScenario {
            kind: "resource",
            id: resource.id.clone(),
            scenario: resource.scenarios.len(),
        });
    }
    for data in &resource.scenarios {
        if !data.efficiency.is_finite() || data.efficiency < -EPSILON {
            return Err(ModelError::InvalidProject(format!(
                "resource '{}' has invalid efficiency {}",
                resource.id, data.efficiency
            )));
        }
        if !data.rate.is_finite() {
            return Err(ModelError::InvalidProject(format!(
                "resource '{}' has a non-finite rate",
                resource.id
            )));
        }
        data.working_hours
            .validate()
            .map_err(|reason| ModelError::InvalidWorkingHours {
                owner: resource.id.clone(),
                reason,
            })?;
    }
    Ok(())
}

pub fn validate_booking(
    booking: &Booking,
    scenario_count: usize,
    task: Option<&Task>,
    resource: Option<&Resource>,
) -> ModelResult<()> {
    let invalid = |reason: String| ModelError::InvalidBooking {
        resource: booking.resource.clone(),
        task: booking.task.clone(),
        reason,
    };
    let task = task.ok_or_else(|| ModelError::UnknownTask(booking.task.clone()))?;
    let resource = resource.ok_or_else(|| ModelError::UnknownResource(booking.resource.clone()))?;
    if booking.scenario >= scenario_count {
        return Err(invalid(format!("unknown scenario {}", booking.scenario)));
    }
    if booking.start >= booking.end {
        return Err(invalid(format!(
            "empty interval {} .. {}",
            booking.start, booking.end
        )));
    }
    if task.is_container() {
        return Err(invalid("container tasks cannot be booked".into()));
    }
    if !resource.is_leaf() {
        return Err(invalid("resource groups cannot be booked".into()));
    }
    Ok(())
}
