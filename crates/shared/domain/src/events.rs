//! Cross-slice domain events carried over the event bus.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity families whose mutations other slices may care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    Contract,
    Checklist,
    WorkOrder,
    User,
    Report,
}

impl EntityKind {
    /// The database table backing this entity family.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Contract => "contract",
            Self::Checklist => "checklist",
            Self::WorkOrder => "work_order",
            Self::User => "user",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

/// Published by every mutating CRUD handler after a successful write.
///
/// The assistant slice subscribes to rewrite the affected mirror key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityChanged {
    pub kind: EntityKind,
    pub id: String,
    pub action: ChangeAction,
}

impl EntityChanged {
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<String>, action: ChangeAction) -> Self {
        Self { kind, id: id.into(), action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_to_table() {
        assert_eq!(EntityKind::WorkOrder.table(), "work_order");
        assert_eq!(EntityKind::Customer.to_string(), "customer");
    }

    #[test]
    fn event_serializes_snake_case() {
        let event = EntityChanged::new(EntityKind::WorkOrder, "wo1", ChangeAction::Updated);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "work_order");
        assert_eq!(json["action"], "updated");
    }
}
