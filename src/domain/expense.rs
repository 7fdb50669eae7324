//! Domain types representing recorded expenses.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, EntityId, Identifiable};

/// One recorded spending event.
///
/// `date` keeps the offset it was written with; calendar-day questions are
/// always answered in an explicit offset via [`Expense::local_date`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: EntityId,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub category_id: EntityId,
    pub date: DateTime<FixedOffset>,
}

impl Expense {
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        category_id: EntityId,
        date: DateTime<FixedOffset>,
    ) -> Self {
        ExpenseDraft {
            amount,
            description: description.into(),
            category_id,
            date,
        }
        .into_expense()
    }

    /// Calendar date of the expense as seen from `offset`.
    pub fn local_date(&self, offset: &FixedOffset) -> NaiveDate {
        self.date.with_timezone(offset).date_naive()
    }
}

impl Identifiable for Expense {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({:.2})", self.description, self.amount)
    }
}

/// An expense that has not been assigned an identifier yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub amount: f64,
    pub description: String,
    pub category_id: EntityId,
    pub date: DateTime<FixedOffset>,
}

impl ExpenseDraft {
    /// Assigns a fresh identifier.
    pub fn into_expense(self) -> Expense {
        Expense {
            id: EntityId::new(),
            amount: self.amount,
            description: self.description,
            category_id: self.category_id,
            date: self.date,
        }
    }
}
