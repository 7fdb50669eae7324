use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::errors::CoreResult;
use crate::core::services::{
    AnalyticsSummary, CategoryService, DashboardSummary, DateGroup, ExpenseService,
    GroupingService, PresetService, SummaryService, ViewCache, ViewQuery, ViewService,
};
use crate::core::state::AppState;
use crate::core::time::Clock;
use crate::core::validation::{CategoryInput, ExpenseInput, PresetInput};
use crate::domain::defaults::{default_categories, default_presets};
use crate::domain::{
    Category, Displayable, EntityId, Expense, ExpenseDraft, FilterSpec, Preset,
};
use crate::storage::{load_records, save_records, Collection, EntityStore};
use crate::utils::format::format_amount;

/// How each collection was obtained when the session opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// Nothing stored yet; defaults were seeded and written back.
    Seeded,
    /// Nothing stored yet and no defaults apply.
    Empty,
    /// The store failed or held unreadable data; defaults kept in memory only.
    Fallback,
}

/// Per-collection outcome of [`ExpenseSession::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub expenses: LoadOutcome,
    pub categories: LoadOutcome,
    pub presets: LoadOutcome,
}

enum Loaded<T> {
    Found(Vec<T>),
    Absent,
    Failed,
}

fn load_collection<T: DeserializeOwned>(store: &dyn EntityStore, collection: Collection) -> Loaded<T> {
    match load_records(store, collection) {
        Ok(Some(records)) => Loaded::Found(records),
        Ok(None) => Loaded::Absent,
        Err(err) => {
            warn!(%collection, error = %err, "failed to load collection, using fallback");
            Loaded::Failed
        }
    }
}

/// Owns the in-memory collections and mirrors every mutation to the store.
///
/// Memory is authoritative: a failed save is logged and the mutation stays
/// applied.
pub struct ExpenseSession {
    state: AppState,
    store: Box<dyn EntityStore>,
    clock: Box<dyn Clock>,
    config: Config,
    version: u64,
    cache: ViewCache,
    report: LoadReport,
}

impl ExpenseSession {
    pub fn open(store: Box<dyn EntityStore>, clock: Box<dyn Clock>) -> Self {
        let (expenses, expenses_outcome) = match load_collection(store.as_ref(), Collection::Expenses) {
            Loaded::Found(records) => (records, LoadOutcome::Loaded),
            Loaded::Absent => (Vec::new(), LoadOutcome::Empty),
            Loaded::Failed => (Vec::new(), LoadOutcome::Fallback),
        };

        let (categories, categories_outcome) =
            match load_collection(store.as_ref(), Collection::Categories) {
                Loaded::Found(records) => (records, LoadOutcome::Loaded),
                Loaded::Absent => (default_categories(), LoadOutcome::Seeded),
                Loaded::Failed => (default_categories(), LoadOutcome::Fallback),
            };

        let (presets, presets_outcome) = match load_collection(store.as_ref(), Collection::Presets) {
            Loaded::Found(records) => (records, LoadOutcome::Loaded),
            Loaded::Absent => (default_presets(&categories), LoadOutcome::Seeded),
            Loaded::Failed => (default_presets(&categories), LoadOutcome::Fallback),
        };

        let report = LoadReport {
            expenses: expenses_outcome,
            categories: categories_outcome,
            presets: presets_outcome,
        };

        let session = Self {
            state: AppState::new(expenses, categories, presets),
            store,
            clock,
            config: Config::default(),
            version: 0,
            cache: ViewCache::new(),
            report,
        };

        if report.categories == LoadOutcome::Seeded {
            session.persist(Collection::Categories);
        }
        if report.presets == LoadOutcome::Seeded {
            session.persist(Collection::Presets);
        }

        info!(
            expenses = session.state.expenses.len(),
            categories = session.state.categories.len(),
            presets = session.state.presets.len(),
            "session opened"
        );
        session
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn expenses(&self) -> &[Expense] {
        ExpenseService::list(&self.state)
    }

    pub fn categories(&self) -> &[Category] {
        CategoryService::list(&self.state)
    }

    pub fn presets(&self) -> &[Preset] {
        PresetService::list(&self.state)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn load_report(&self) -> LoadReport {
        self.report
    }

    /// Bumped on every change that can alter a derived view.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn cache(&self) -> &ViewCache {
        &self.cache
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> CoreResult<Expense> {
        let expense = ExpenseService::add(&mut self.state, draft)?;
        debug!(expense = %expense.display_label(), "expense recorded");
        self.commit(Collection::Expenses);
        Ok(expense)
    }

    /// Validates raw form input and records it.
    pub fn quick_add(&mut self, input: ExpenseInput) -> CoreResult<Expense> {
        let draft = input.validate()?;
        self.add_expense(draft)
    }

    pub fn update_expense(&mut self, expense: Expense) -> CoreResult<()> {
        ExpenseService::update(&mut self.state, expense)?;
        self.commit(Collection::Expenses);
        Ok(())
    }

    pub fn delete_expense(&mut self, id: &EntityId) -> CoreResult<()> {
        ExpenseService::remove(&mut self.state, id)?;
        self.commit(Collection::Expenses);
        Ok(())
    }

    pub fn add_category(&mut self, input: CategoryInput) -> CoreResult<Category> {
        let category = CategoryService::add(&mut self.state, input.validate()?)?;
        debug!(category = %category.display_label(), "category added");
        self.commit(Collection::Categories);
        Ok(category)
    }

    pub fn update_category(&mut self, category: Category) -> CoreResult<()> {
        CategoryService::edit(&mut self.state, category)?;
        self.commit(Collection::Categories);
        Ok(())
    }

    /// Expenses and presets keep the dangling id.
    pub fn delete_category(&mut self, id: &EntityId) -> CoreResult<()> {
        CategoryService::remove(&mut self.state, id)?;
        self.commit(Collection::Categories);
        Ok(())
    }

    pub fn add_preset(&mut self, input: PresetInput) -> CoreResult<Preset> {
        let preset = PresetService::add(&mut self.state, input.validate()?)?;
        debug!(preset = %preset.display_label(), "preset added");
        self.persist(Collection::Presets);
        Ok(preset)
    }

    pub fn update_preset(&mut self, preset: Preset) -> CoreResult<()> {
        PresetService::edit(&mut self.state, preset)?;
        self.persist(Collection::Presets);
        Ok(())
    }

    pub fn delete_preset(&mut self, id: &EntityId) -> CoreResult<()> {
        PresetService::remove(&mut self.state, id)?;
        self.persist(Collection::Presets);
        Ok(())
    }

    /// Records an expense from the preset, dated now.
    pub fn apply_preset(&mut self, id: &EntityId) -> CoreResult<Expense> {
        let expense = PresetService::apply(&mut self.state, id, self.clock.now())?;
        debug!(expense = %expense.display_label(), "preset applied");
        self.commit(Collection::Expenses);
        Ok(expense)
    }

    pub fn view(&mut self, query: &ViewQuery) -> Vec<Expense> {
        self.cache.get_or_build(
            self.version,
            &self.state.expenses,
            &self.state.categories,
            query,
        )
    }

    /// Date groups of [`ExpenseSession::view`], by calendar day in the clock's offset.
    pub fn grouped_view(&mut self, query: &ViewQuery) -> Vec<DateGroup> {
        let offset = *self.clock.now().offset();
        GroupingService::group(&self.view(query), &offset)
    }

    /// The newest `limit` expenses; zero means all of them.
    pub fn recent(&mut self, limit: usize) -> Vec<Expense> {
        self.view(&ViewQuery::new().with_limit(limit))
    }

    /// [`ExpenseSession::recent`] with the configured dashboard limit.
    pub fn dashboard_recent(&mut self) -> Vec<Expense> {
        self.recent(self.config.recent_limit)
    }

    pub fn dashboard(&self) -> DashboardSummary {
        SummaryService::dashboard(&self.state.expenses, self.clock.now())
    }

    /// Summaries over the expenses matching `filter`.
    pub fn analytics(&self, filter: &FilterSpec) -> AnalyticsSummary {
        let view = ViewService::build_view(
            &self.state.expenses,
            &self.state.categories,
            Some(filter),
            None,
            None,
        );
        SummaryService::analytics(
            &view,
            &self.state.category_index(),
            self.clock.now(),
            self.config.trailing_months,
            self.config.trailing_days,
        )
    }

    /// `amount` in the configured currency.
    pub fn format_amount(&self, amount: f64) -> String {
        format_amount(amount, &self.config.currency)
    }

    fn commit(&mut self, collection: Collection) {
        self.version += 1;
        debug!(version = self.version, %collection, "state changed");
        self.persist(collection);
    }

    fn persist(&self, collection: Collection) {
        let store = self.store.as_ref();
        let result = match collection {
            Collection::Expenses => save_records(store, collection, &self.state.expenses),
            Collection::Categories => save_records(store, collection, &self.state.categories),
            Collection::Presets => save_records(store, collection, &self.state.presets),
        };
        if let Err(err) = result {
            warn!(%collection, error = %err, "failed to persist collection; keeping in-memory state");
        }
    }
}
