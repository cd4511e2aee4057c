use crate::calendar::WorkingHours;
use crate::graph::TreePosition;
use crate::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Per scenario attributes of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceScenario {
    /// Share of a full worker this resource represents (1.0 = one person).
    #[serde(default = "default_efficiency")]
    pub efficiency: f64,
    /// Daily cost rate.
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub working_hours: WorkingHours,
}

fn default_efficiency() -> f64 {
    1.0
}

impl Default for ResourceScenario {
    fn default() -> Self {
        Self {
            efficiency: 1.0,
            rate: 0.0,
            working_hours: WorkingHours::default(),
        }
    }
}

/// A person, piece of equipment or a group of resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Short identifier, exported as initials.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Id of the group this resource belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub scenarios: Vec<ResourceScenario>,
    #[serde(skip)]
    pub(crate) position: TreePosition,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            parent: None,
            scenarios: Vec::new(),
            position: TreePosition::default(),
        }
    }

    pub fn scenario(&self, idx: usize) -> ModelResult<&ResourceScenario> {
        self.scenarios
            .get(idx)
            .ok_or_else(|| ModelError::MissingScenario {
                kind: "resource",
                id: self.id.clone(),
                scenario: idx,
            })
    }

    pub fn seqno(&self) -> usize {
        self.position.seqno
    }

    pub fn level(&self) -> usize {
        self.position.level
    }

    pub fn children(&self) -> &[String] {
        &self.position.children
    }

    pub fn is_leaf(&self) -> bool {
        self.position.children.is_empty()
    }
}
