//! Built-in categories and presets seeded on first run.

use crate::domain::category::Category;
use crate::domain::common::EntityId;
use crate::domain::preset::Preset;

const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Food & Drink", "#EF4444", "coffee"),
    ("Transportation", "#F59E0B", "car"),
    ("Shopping", "#10B981", "shopping-bag"),
    ("Entertainment", "#3B82F6", "film"),
    ("Home", "#8B5CF6", "home"),
    ("Health", "#EC4899", "heart"),
    ("Travel", "#14B8A6", "plane"),
    ("Education", "#6366F1", "book"),
];

/// (amount, description, index into `DEFAULT_CATEGORIES`)
const DEFAULT_PRESETS: &[(f64, &str, usize)] = &[
    (5.0, "Coffee", 0),
    (15.0, "Lunch", 0),
    (2.5, "Bus Fare", 1),
    (20.0, "Movie Ticket", 3),
];

/// Fresh default categories with newly generated ids.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, color, icon)| Category::new(*name, *color).with_icon(*icon))
        .collect()
}

/// Default presets linked to `categories`.
///
/// Each preset points at the category whose name matches its built-in
/// category; when no such category exists the preset gets a fresh id that
/// resolves to the uncategorized placeholder.
pub fn default_presets(categories: &[Category]) -> Vec<Preset> {
    DEFAULT_PRESETS
        .iter()
        .map(|(amount, description, category_idx)| {
            let wanted = DEFAULT_CATEGORIES[*category_idx].0;
            let category_id = categories
                .iter()
                .find(|category| category.name == wanted)
                .map(|category| category.id.clone())
                .unwrap_or_else(EntityId::new);
            Preset::new(*amount, *description, category_id)
        })
        .collect()
}
