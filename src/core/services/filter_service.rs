use crate::domain::{filter::search_needle, CategoryIndex, Expense, FilterSpec};

/// Decides whether a single expense survives a filter.
pub struct FilterService;

impl FilterService {
    /// True when `expense` satisfies every active constraint of `filter`.
    pub fn matches(expense: &Expense, filter: &FilterSpec, categories: &CategoryIndex<'_>) -> bool {
        if let Some(range) = &filter.date_range {
            if !range.contains(&expense.date) {
                return false;
            }
        }
        if !filter.categories.is_empty() && !filter.categories.contains(&expense.category_id) {
            return false;
        }
        if !filter.price_range.contains(expense.amount) {
            return false;
        }
        match filter.search_needle() {
            Some(needle) => Self::matches_needle(expense, &needle, categories),
            None => true,
        }
    }

    /// Free-text search on its own; blank text matches everything.
    pub fn matches_search(expense: &Expense, text: &str, categories: &CategoryIndex<'_>) -> bool {
        match search_needle(text) {
            Some(needle) => Self::matches_needle(expense, &needle, categories),
            None => true,
        }
    }

    /// `needle` must already be trimmed and lower-cased.
    pub(crate) fn matches_needle(
        expense: &Expense,
        needle: &str,
        categories: &CategoryIndex<'_>,
    ) -> bool {
        if expense.description.to_lowercase().contains(needle) {
            return true;
        }
        // Dangling ids have no name to match against.
        categories
            .get(&expense.category_id)
            .map_or(false, |category| category.name.to_lowercase().contains(needle))
    }
}
