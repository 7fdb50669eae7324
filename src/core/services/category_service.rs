use crate::core::errors::{CoreError, CoreResult};
use crate::core::state::AppState;
use crate::core::validation::{check_name, ValidationErrors};
use crate::domain::common::{remove_by_id, replace_by_id};
use crate::domain::{Category, EntityId};
use crate::utils::format::normalize_color;

pub struct CategoryService;

impl CategoryService {
    pub fn add(state: &mut AppState, mut category: Category) -> CoreResult<Category> {
        Self::validate_name(&category.name)?;
        category.name = category.name.trim().to_string();
        category.color = normalize_color(&category.color);
        state.categories.push(category.clone());
        Ok(category)
    }

    pub fn edit(state: &mut AppState, mut changes: Category) -> CoreResult<()> {
        Self::validate_name(&changes.name)?;
        changes.name = changes.name.trim().to_string();
        changes.color = normalize_color(&changes.color);
        let id = changes.id.clone();
        if replace_by_id(&mut state.categories, changes) {
            Ok(())
        } else {
            Err(CoreError::CategoryNotFound(id))
        }
    }

    /// Deletes the category only; expenses and presets referencing it are kept
    /// and resolve to the uncategorized placeholder from then on.
    pub fn remove(state: &mut AppState, id: &EntityId) -> CoreResult<()> {
        if remove_by_id(&mut state.categories, id) {
            Ok(())
        } else {
            Err(CoreError::CategoryNotFound(id.clone()))
        }
    }

    pub fn list(state: &AppState) -> &[Category] {
        &state.categories
    }

    fn validate_name(candidate: &str) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, candidate);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
