//! Domain types representing expense categories.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

pub const DEFAULT_ICON: &str = "circle";
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";
pub const UNCATEGORIZED_COLOR: &str = "#9CA3AF";

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

/// A user-defined label with a display colour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            color: color.into(),
            icon: default_icon(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Placeholder shown for expenses whose category no longer exists.
    pub fn uncategorized() -> Self {
        Self {
            id: EntityId::nil(),
            name: UNCATEGORIZED_NAME.to_string(),
            color: UNCATEGORIZED_COLOR.to_string(),
            icon: default_icon(),
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.color)
    }
}

/// Read-side lookup from category id to category.
///
/// Dangling ids resolve to [`Category::uncategorized`] instead of failing.
#[derive(Debug, Clone)]
pub struct CategoryIndex<'a> {
    by_id: HashMap<&'a EntityId, &'a Category>,
    placeholder: Category,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            by_id: categories.iter().map(|c| (&c.id, c)).collect(),
            placeholder: Category::uncategorized(),
        }
    }

    pub fn get(&self, id: &EntityId) -> Option<&'a Category> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn resolve(&self, id: &EntityId) -> &Category {
        match self.by_id.get(id) {
            Some(category) => *category,
            None => &self.placeholder,
        }
    }
}
