use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, EntityId, Identifiable};
use crate::domain::expense::ExpenseDraft;

/// Reusable expense template for one-tap entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: EntityId,
    pub amount: f64,
    pub description: String,
    pub category_id: EntityId,
}

impl Preset {
    pub fn new(amount: f64, description: impl Into<String>, category_id: EntityId) -> Self {
        Self {
            id: EntityId::new(),
            amount,
            description: description.into(),
            category_id,
        }
    }

    /// Builds the expense this preset stands for, stamped at `at`.
    pub fn to_draft(&self, at: DateTime<FixedOffset>) -> ExpenseDraft {
        ExpenseDraft {
            amount: self.amount,
            description: self.description.clone(),
            category_id: self.category_id.clone(),
            date: at,
        }
    }
}

impl Identifiable for Preset {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Displayable for Preset {
    fn display_label(&self) -> String {
        format!("{} ({:.2})", self.description, self.amount)
    }
}
