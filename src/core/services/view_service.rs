use serde::{Deserialize, Serialize};

use crate::domain::{filter::search_needle, Category, CategoryIndex, Expense, FilterSpec};

use super::filter_service::FilterService;

/// Everything a screen can ask of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewQuery {
    #[serde(default)]
    pub filter: Option<FilterSpec>,
    #[serde(default)]
    pub search: Option<String>,
    /// Zero behaves like no limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Composes search, filter, sort and limit into one derived list.
pub struct ViewService;

impl ViewService {
    /// Filters, sorts newest-first and truncates, without touching `expenses`.
    ///
    /// Expenses with equal timestamps keep their input order.
    pub fn build_view(
        expenses: &[Expense],
        categories: &[Category],
        filter: Option<&FilterSpec>,
        search: Option<&str>,
        limit: Option<usize>,
    ) -> Vec<Expense> {
        let index = CategoryIndex::new(categories);
        let needle = search.and_then(search_needle);

        let mut view: Vec<Expense> = expenses
            .iter()
            .filter(|expense| {
                needle
                    .as_deref()
                    .map_or(true, |needle| FilterService::matches_needle(expense, needle, &index))
            })
            .filter(|expense| filter.map_or(true, |spec| FilterService::matches(expense, spec, &index)))
            .cloned()
            .collect();

        // `sort_by` is stable.
        view.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(limit) = limit.filter(|limit| *limit > 0) {
            view.truncate(limit);
        }
        view
    }

    pub fn run(expenses: &[Expense], categories: &[Category], query: &ViewQuery) -> Vec<Expense> {
        Self::build_view(
            expenses,
            categories,
            query.filter.as_ref(),
            query.search.as_deref(),
            query.limit,
        )
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    version: u64,
    query: ViewQuery,
    output: Vec<Expense>,
}

/// Remembers the last computed view for a given collection version.
///
/// The caller bumps `version` whenever expenses or categories change; the
/// cached output is then never reused.
#[derive(Debug, Default)]
pub struct ViewCache {
    entry: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &mut self,
        version: u64,
        expenses: &[Expense],
        categories: &[Category],
        query: &ViewQuery,
    ) -> Vec<Expense> {
        if let Some(entry) = &self.entry {
            if entry.version == version && entry.query == *query {
                self.hits += 1;
                tracing::debug!(version, "view cache hit");
                return entry.output.clone();
            }
        }
        self.misses += 1;
        let output = ViewService::run(expenses, categories, query);
        tracing::debug!(version, rows = output.len(), "view recomputed");
        self.entry = Some(CacheEntry {
            version,
            query: query.clone(),
            output: output.clone(),
        });
        output
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateRange, EntityId};
    use chrono::{DateTime, FixedOffset};

    fn at(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    fn expense(amount: f64, description: &str, date: &str) -> Expense {
        Expense::new(amount, description, EntityId::nil(), at(date))
    }

    #[test]
    fn sorts_newest_first_with_stable_ties() {
        let input = vec![
            expense(1.0, "old", "2024-01-01T00:00:00Z"),
            expense(2.0, "tie-a", "2024-03-01T00:00:00Z"),
            expense(3.0, "new", "2024-04-01T00:00:00Z"),
            expense(4.0, "tie-b", "2024-03-01T00:00:00Z"),
        ];
        let view = ViewService::build_view(&input, &[], Some(&FilterSpec::default()), None, None);
        let order: Vec<_> = view.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(order, vec!["new", "tie-a", "tie-b", "old"]);
    }

    #[test]
    fn limit_applies_after_sorting() {
        let input = vec![
            expense(1.0, "a", "2024-01-01T00:00:00Z"),
            expense(2.0, "b", "2024-02-01T00:00:00Z"),
            expense(3.0, "c", "2024-03-01T00:00:00Z"),
        ];
        let view = ViewService::build_view(&input, &[], None, None, Some(2));
        let order: Vec<_> = view.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(order, vec!["c", "b"]);
        assert_eq!(ViewService::build_view(&input, &[], None, None, Some(0)).len(), 3);
    }

    #[test]
    fn standalone_search_works_without_filter() {
        let input = vec![
            expense(1.0, "Coffee beans", "2024-01-01T00:00:00Z"),
            expense(2.0, "Bus", "2024-02-01T00:00:00Z"),
        ];
        let view = ViewService::build_view(&input, &[], None, Some("COFFEE"), None);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].description, "Coffee beans");
    }

    #[test]
    fn search_and_filter_combine() {
        let input = vec![
            expense(100.0, "Lunch", "2024-04-15T12:00:00Z"),
            expense(50.0, "Lunch", "2024-05-01T12:00:00Z"),
            expense(25.0, "Dinner", "2024-05-10T12:00:00Z"),
        ];
        let filter = FilterSpec::new().with_date_range(DateRange::new(
            at("2024-05-01T00:00:00Z"),
            at("2024-05-31T23:59:59Z"),
        ));
        let view = ViewService::build_view(&input, &[], Some(&filter), Some("lunch"), None);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].amount, 50.0);
    }

    #[test]
    fn input_is_left_untouched() {
        let input = vec![
            expense(1.0, "a", "2024-01-01T00:00:00Z"),
            expense(2.0, "b", "2024-02-01T00:00:00Z"),
        ];
        let snapshot = input.clone();
        let _ = ViewService::build_view(&input, &[], None, None, Some(1));
        assert_eq!(input, snapshot);
    }

    #[test]
    fn cache_reuses_output_until_version_or_query_changes() {
        let input = vec![
            expense(1.0, "a", "2024-01-01T00:00:00Z"),
            expense(2.0, "b", "2024-02-01T00:00:00Z"),
        ];
        let query = ViewQuery::new().with_limit(1);
        let mut cache = ViewCache::new();

        let first = cache.get_or_build(1, &input, &[], &query);
        let second = cache.get_or_build(1, &input, &[], &query);
        assert_eq!(first, second);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));

        cache.get_or_build(2, &input, &[], &query);
        cache.get_or_build(2, &input, &[], &ViewQuery::new());
        assert_eq!(cache.misses(), 3);

        cache.invalidate();
        let fresh = cache.get_or_build(2, &input, &[], &ViewQuery::new());
        assert_eq!(fresh, ViewService::run(&input, &[], &ViewQuery::new()));
        assert_eq!(cache.misses(), 4);
    }

    #[test]
    fn query_rejects_unknown_fields() {
        let err = serde_json::from_str::<ViewQuery>(r#"{"limit":3,"sort":"asc"}"#)
            .expect_err("unknown field");
        assert!(err.to_string().contains("sort"));
    }
}
