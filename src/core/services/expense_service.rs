use crate::core::errors::{CoreError, CoreResult};
use crate::core::state::AppState;
use crate::core::validation::{check_amount, check_description, ValidationErrors};
use crate::domain::common::{remove_by_id, replace_by_id};
use crate::domain::{EntityId, Expense, ExpenseDraft};

pub struct ExpenseService;

impl ExpenseService {
    pub fn add(state: &mut AppState, draft: ExpenseDraft) -> CoreResult<Expense> {
        Self::validate(draft.amount, &draft.description)?;
        let expense = draft.into_expense();
        state.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Replaces the stored expense with the same id.
    pub fn update(state: &mut AppState, expense: Expense) -> CoreResult<()> {
        Self::validate(expense.amount, &expense.description)?;
        let id = expense.id.clone();
        if replace_by_id(&mut state.expenses, expense) {
            Ok(())
        } else {
            Err(CoreError::ExpenseNotFound(id))
        }
    }

    pub fn remove(state: &mut AppState, id: &EntityId) -> CoreResult<()> {
        if remove_by_id(&mut state.expenses, id) {
            Ok(())
        } else {
            Err(CoreError::ExpenseNotFound(id.clone()))
        }
    }

    pub fn list(state: &AppState) -> &[Expense] {
        &state.expenses
    }

    fn validate(amount: f64, description: &str) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_amount(&mut errors, amount);
        check_description(&mut errors, description);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
