use chrono::{DateTime, FixedOffset};

use crate::core::errors::{CoreError, CoreResult};
use crate::core::state::AppState;
use crate::core::validation::{check_amount, check_description, ValidationErrors};
use crate::domain::common::{remove_by_id, replace_by_id};
use crate::domain::{EntityId, Expense, Preset};

use super::expense_service::ExpenseService;

pub struct PresetService;

impl PresetService {
    pub fn add(state: &mut AppState, preset: Preset) -> CoreResult<Preset> {
        Self::validate(&preset)?;
        state.presets.push(preset.clone());
        Ok(preset)
    }

    pub fn edit(state: &mut AppState, preset: Preset) -> CoreResult<()> {
        Self::validate(&preset)?;
        let id = preset.id.clone();
        if replace_by_id(&mut state.presets, preset) {
            Ok(())
        } else {
            Err(CoreError::PresetNotFound(id))
        }
    }

    pub fn remove(state: &mut AppState, id: &EntityId) -> CoreResult<()> {
        if remove_by_id(&mut state.presets, id) {
            Ok(())
        } else {
            Err(CoreError::PresetNotFound(id.clone()))
        }
    }

    pub fn list(state: &AppState) -> &[Preset] {
        &state.presets
    }

    /// Records a new expense from the preset at `at`; the preset is not modified.
    pub fn apply(state: &mut AppState, id: &EntityId, at: DateTime<FixedOffset>) -> CoreResult<Expense> {
        let draft = state
            .preset(id)
            .ok_or_else(|| CoreError::PresetNotFound(id.clone()))?
            .to_draft(at);
        ExpenseService::add(state, draft)
    }

    fn validate(preset: &Preset) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_amount(&mut errors, preset.amount);
        check_description(&mut errors, &preset.description);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
