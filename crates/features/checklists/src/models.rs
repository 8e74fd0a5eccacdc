//! Checklist documents: the nested location/task shape is shared between
//! storage and the API, so a detail read returns exactly what was stored.

use crate::error::ChecklistsError;
use serde::{Deserialize, Serialize};
use surrealdb::types::SurrealValue;
use utoipa::ToSchema;

/// A single inspection task inside a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SurrealValue, ToSchema)]
pub struct TaskDoc {
    pub name: String,
    pub position: u32,
}

/// A location grouping its ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SurrealValue, ToSchema)]
pub struct LocationDoc {
    pub name: String,
    pub position: u32,
    pub tasks: Vec<TaskDoc>,
}

#[derive(Debug, Clone, SurrealValue)]
pub struct ChecklistRecord {
    pub id: String,
    pub name: String,
    pub property_type: String,
    pub locations: Vec<LocationDoc>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChecklistRequest {
    pub name: String,
    pub property_type: String,
    pub locations: Vec<LocationDoc>,
}

impl ChecklistRequest {
    pub(crate) fn validate(&self) -> Result<(), ChecklistsError> {
        if self.name.trim().is_empty() {
            return Err(ChecklistsError::Validation("Checklist name must not be empty".into()));
        }
        if self.property_type.trim().is_empty() {
            return Err(ChecklistsError::Validation("Property type must not be empty".into()));
        }
        for location in &self.locations {
            if location.name.trim().is_empty() {
                return Err(ChecklistsError::Validation(
                    "Location name must not be empty".into(),
                ));
            }
            for task in &location.tasks {
                if task.name.trim().is_empty() {
                    return Err(ChecklistsError::Validation(
                        "Task name must not be empty".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummary {
    pub id: String,
    pub name: String,
    pub property_type: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ChecklistRecord> for ChecklistSummary {
    fn from(record: ChecklistRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            property_type: record.property_type,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistResponse {
    pub id: String,
    pub name: String,
    pub property_type: String,
    /// Locations and their tasks, ordered by position.
    pub locations: Vec<LocationDoc>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ChecklistRecord> for ChecklistResponse {
    fn from(record: ChecklistRecord) -> Self {
        let mut locations = record.locations;
        locations.sort_by_key(|location| location.position);
        for location in &mut locations {
            location.tasks.sort_by_key(|task| task.position);
        }

        Self {
            id: record.id,
            name: record.name,
            property_type: record.property_type,
            locations,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_orders_by_position() {
        let record = ChecklistRecord {
            id: "checklist:x".into(),
            name: "Apartment".into(),
            property_type: "apartment".into(),
            locations: vec![
                LocationDoc {
                    name: "Kitchen".into(),
                    position: 2,
                    tasks: vec![
                        TaskDoc { name: "Taps".into(), position: 2 },
                        TaskDoc { name: "Stove".into(), position: 1 },
                    ],
                },
                LocationDoc { name: "Hallway".into(), position: 1, tasks: vec![] },
            ],
            created_at: String::new(),
            updated_at: String::new(),
        };

        let response = ChecklistResponse::from(record);
        assert_eq!(response.locations[0].name, "Hallway");
        assert_eq!(response.locations[1].tasks[0].name, "Stove");
    }

    #[test]
    fn blank_task_name_is_rejected() {
        let request = ChecklistRequest {
            name: "Apartment".into(),
            property_type: "apartment".into(),
            locations: vec![LocationDoc {
                name: "Kitchen".into(),
                position: 1,
                tasks: vec![TaskDoc { name: "  ".into(), position: 1 }],
            }],
        };
        assert!(matches!(request.validate(), Err(ChecklistsError::Validation(_))));
    }
}
