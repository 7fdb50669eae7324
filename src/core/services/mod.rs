pub mod category_service;
pub mod expense_service;
pub mod filter_service;
pub mod grouping_service;
pub mod preset_service;
pub mod summary_service;
pub mod view_service;

pub use category_service::CategoryService;
pub use expense_service::ExpenseService;
pub use filter_service::FilterService;
pub use grouping_service::{DateGroup, GroupingService};
pub use preset_service::PresetService;
pub use summary_service::{AnalyticsSummary, CategoryTotal, DashboardSummary, SeriesPoint, SummaryService};
pub use view_service::{ViewCache, ViewQuery, ViewService};
