use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use crate::domain::Expense;
use crate::utils::format::group_label;

/// Expenses sharing one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateGroup {
    pub date: NaiveDate,
    pub label: String,
    pub expenses: Vec<Expense>,
}

impl DateGroup {
    pub fn total(&self) -> f64 {
        self.expenses.iter().fold(0.0, |acc, e| acc + e.amount)
    }
}

pub struct GroupingService;

impl GroupingService {
    /// Buckets expenses by their calendar date as seen from `offset`.
    ///
    /// Groups appear in the order their date first occurs in `expenses` and
    /// members keep their input order, so a newest-first input yields
    /// newest-first groups.
    pub fn group(expenses: &[Expense], offset: &FixedOffset) -> Vec<DateGroup> {
        let mut slots: HashMap<NaiveDate, usize> = HashMap::new();
        let mut groups: Vec<DateGroup> = Vec::new();
        for expense in expenses {
            let date = expense.local_date(offset);
            let idx = *slots.entry(date).or_insert_with(|| {
                groups.push(DateGroup {
                    date,
                    label: group_label(date),
                    expenses: Vec::new(),
                });
                groups.len() - 1
            });
            groups[idx].expenses.push(expense.clone());
        }
        groups
    }
}
