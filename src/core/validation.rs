//! Field-level validation of user input.
//!
//! Every failing field is reported at once so a form can mark all of them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::domain::{Category, EntityId, ExpenseDraft, Preset};
use crate::utils::format::normalize_color;

pub const INVALID_AMOUNT: &str = "Please enter a valid amount";
pub const MISSING_CATEGORY: &str = "Please select a category";
pub const MISSING_DESCRIPTION: &str = "Please enter a description";
pub const MISSING_NAME: &str = "Category name is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Amount,
    Description,
    Category,
    Name,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Amount => "amount",
            Field::Description => "description",
            Field::Category => "category",
            Field::Name => "name",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation failed: ")?;
        for (idx, (field, message)) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Parses a user-typed amount; accepts only finite numbers above zero.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

pub(crate) fn check_amount(errors: &mut ValidationErrors, amount: f64) {
    if !amount.is_finite() || amount <= 0.0 {
        errors.add(Field::Amount, INVALID_AMOUNT);
    }
}

pub(crate) fn check_description(errors: &mut ValidationErrors, description: &str) {
    if description.trim().is_empty() {
        errors.add(Field::Description, MISSING_DESCRIPTION);
    }
}

pub(crate) fn check_name(errors: &mut ValidationErrors, name: &str) {
    if name.trim().is_empty() {
        errors.add(Field::Name, MISSING_NAME);
    }
}

/// Raw contents of the add-expense form.
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub amount: String,
    pub description: String,
    pub category_id: Option<EntityId>,
    pub date: DateTime<FixedOffset>,
}

impl ExpenseInput {
    pub fn validate(self) -> Result<ExpenseDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let amount = parse_amount(&self.amount);
        if amount.is_none() {
            errors.add(Field::Amount, INVALID_AMOUNT);
        }
        if self.category_id.is_none() {
            errors.add(Field::Category, MISSING_CATEGORY);
        }
        check_description(&mut errors, &self.description);
        errors.into_result(|| ExpenseDraft {
            amount: amount.unwrap_or_default(),
            description: self.description,
            category_id: self.category_id.unwrap_or_default(),
            date: self.date,
        })
    }
}

/// Raw contents of the preset form.
#[derive(Debug, Clone)]
pub struct PresetInput {
    pub amount: String,
    pub description: String,
    pub category_id: Option<EntityId>,
}

impl PresetInput {
    pub fn validate(self) -> Result<Preset, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let amount = parse_amount(&self.amount);
        if amount.is_none() {
            errors.add(Field::Amount, INVALID_AMOUNT);
        }
        if self.category_id.is_none() {
            errors.add(Field::Category, MISSING_CATEGORY);
        }
        check_description(&mut errors, &self.description);
        errors.into_result(|| {
            Preset::new(
                amount.unwrap_or_default(),
                self.description,
                self.category_id.unwrap_or_default(),
            )
        })
    }
}

/// Raw contents of the category form.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub color: String,
}

impl CategoryInput {
    pub fn validate(self) -> Result<Category, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, &self.name);
        errors.into_result(|| Category::new(self.name.trim(), normalize_color(&self.color)))
    }
}
