pub mod category;
pub mod common;
pub mod defaults;
pub mod expense;
pub mod filter;
pub mod preset;

pub use category::{Category, CategoryIndex};
pub use common::{Displayable, EntityId, Identifiable};
pub use expense::{Expense, ExpenseDraft};
pub use filter::{DateRange, FilterSpec, PriceRange};
pub use preset::Preset;
