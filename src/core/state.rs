use serde::{Deserialize, Serialize};

use crate::domain::{Category, CategoryIndex, EntityId, Expense, Preset};

/// In-memory collections for a running session.
///
/// This is the source of truth while the app is open; the store only
/// mirrors it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub expenses: Vec<Expense>,
    pub categories: Vec<Category>,
    pub presets: Vec<Preset>,
}

impl AppState {
    pub fn new(expenses: Vec<Expense>, categories: Vec<Category>, presets: Vec<Preset>) -> Self {
        Self {
            expenses,
            categories,
            presets,
        }
    }

    pub fn expense(&self, id: &EntityId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    pub fn category(&self, id: &EntityId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn preset(&self, id: &EntityId) -> Option<&Preset> {
        self.presets.iter().find(|p| &p.id == id)
    }

    pub fn category_index(&self) -> CategoryIndex<'_> {
        CategoryIndex::new(&self.categories)
    }

    /// Expenses whose category id no longer matches any category.
    pub fn orphaned_expenses(&self) -> Vec<&Expense> {
        let index = self.category_index();
        self.expenses
            .iter()
            .filter(|e| !index.contains(&e.category_id))
            .collect()
    }
}
