//! Scalar and time-series aggregations over an already-filtered expense list.
//!
//! Every function accepts an empty slice and answers with zeros or empty
//! collections; nothing here divides by zero or returns NaN.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::domain::{CategoryIndex, EntityId, Expense};

/// Percent change reported when there is nothing to compare against.
pub const FULL_INCREASE_PERCENT: f64 = 100.0;

/// Spend attributed to one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_id: EntityId,
    pub name: String,
    pub color: String,
    pub total: f64,
    pub count: usize,
    /// Fraction of the overall total in `0.0..=1.0`; 0 when the overall total is 0.
    pub share: f64,
}

/// One bucket of a fixed-length chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub label: String,
    pub start: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_spent: f64,
    pub current_month_total: f64,
    pub previous_month_total: f64,
    pub month_change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total: f64,
    pub count: usize,
    pub daily_average: f64,
    pub by_category: Vec<CategoryTotal>,
    pub monthly: Vec<SeriesPoint>,
    pub weekly: Vec<SeriesPoint>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn total(expenses: &[Expense]) -> f64 {
        expenses.iter().fold(0.0, |acc, e| acc + e.amount)
    }

    pub fn count(expenses: &[Expense]) -> usize {
        expenses.len()
    }

    /// Number of distinct calendar dates the expenses fall on, seen from `offset`.
    pub fn distinct_days(expenses: &[Expense], offset: &FixedOffset) -> usize {
        expenses
            .iter()
            .map(|e| e.local_date(offset))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Total divided by the number of distinct days with spending; 0 when empty.
    pub fn daily_average(expenses: &[Expense], offset: &FixedOffset) -> f64 {
        let days = Self::distinct_days(expenses, offset);
        if days == 0 {
            return 0.0;
        }
        Self::total(expenses) / days as f64
    }

    /// `(current - previous) / previous * 100`, or 100 when `previous` is 0.
    pub fn percent_change(current: f64, previous: f64) -> f64 {
        if previous == 0.0 {
            return FULL_INCREASE_PERCENT;
        }
        (current - previous) / previous * 100.0
    }

    /// Sum per category id in order of first appearance; absent categories are omitted.
    pub fn category_totals(expenses: &[Expense]) -> Vec<(EntityId, f64, usize)> {
        let mut slots: HashMap<&EntityId, usize> = HashMap::new();
        let mut rows: Vec<(EntityId, f64, usize)> = Vec::new();
        for expense in expenses {
            let idx = *slots.entry(&expense.category_id).or_insert_with(|| {
                rows.push((expense.category_id.clone(), 0.0, 0));
                rows.len() - 1
            });
            rows[idx].1 += expense.amount;
            rows[idx].2 += 1;
        }
        rows
    }

    /// [`SummaryService::category_totals`] with names, colours and shares resolved.
    pub fn by_category(expenses: &[Expense], categories: &CategoryIndex<'_>) -> Vec<CategoryTotal> {
        let overall = Self::total(expenses);
        Self::category_totals(expenses)
            .into_iter()
            .map(|(category_id, total, count)| {
                let category = categories.resolve(&category_id);
                CategoryTotal {
                    category_id,
                    name: category.name.clone(),
                    color: category.color.clone(),
                    total,
                    count,
                    share: if overall > 0.0 { total / overall } else { 0.0 },
                }
            })
            .collect()
    }

    /// Total of expenses whose local date, seen from `offset`, lies in the month starting at `month_start`.
    pub fn month_total(expenses: &[Expense], month_start: NaiveDate, offset: &FixedOffset) -> f64 {
        let next = next_month_start(month_start);
        expenses
            .iter()
            .filter(|e| {
                let day = e.local_date(offset);
                month_start <= day && day < next
            })
            .fold(0.0, |acc, e| acc + e.amount)
    }

    /// Trailing `months` calendar months ending with the month of `now`, oldest first, zero-filled.
    pub fn monthly_series(
        expenses: &[Expense],
        now: DateTime<FixedOffset>,
        months: usize,
    ) -> Vec<SeriesPoint> {
        let offset = *now.offset();
        let mut sums: HashMap<NaiveDate, f64> = HashMap::new();
        for expense in expenses {
            let start = month_start(expense.local_date(&offset));
            *sums.entry(start).or_insert(0.0) += expense.amount;
        }

        let mut starts = Vec::with_capacity(months);
        let mut cursor = month_start(now.date_naive());
        for _ in 0..months {
            starts.push(cursor);
            cursor = previous_month_start(cursor);
        }
        starts
            .into_iter()
            .rev()
            .map(|start| SeriesPoint {
                label: start.format("%b").to_string(),
                start,
                total: sums.get(&start).copied().unwrap_or(0.0),
            })
            .collect()
    }

    /// Trailing `days` calendar days ending today, oldest first, zero-filled.
    pub fn daily_series(
        expenses: &[Expense],
        now: DateTime<FixedOffset>,
        days: usize,
    ) -> Vec<SeriesPoint> {
        let offset = *now.offset();
        let mut sums: HashMap<NaiveDate, f64> = HashMap::new();
        for expense in expenses {
            *sums.entry(expense.local_date(&offset)).or_insert(0.0) += expense.amount;
        }

        let today = now.date_naive();
        (0..days)
            .rev()
            .map(|back| {
                let day = today - Duration::days(back as i64);
                SeriesPoint {
                    label: day.format("%a").to_string(),
                    start: day,
                    total: sums.get(&day).copied().unwrap_or(0.0),
                }
            })
            .collect()
    }

    /// Whether a chart has anything other than zero buckets to draw.
    pub fn has_data(series: &[SeriesPoint]) -> bool {
        series.iter().any(|point| point.total > 0.0)
    }

    /// Headline numbers over the full collection relative to the month of `now`.
    pub fn dashboard(expenses: &[Expense], now: DateTime<FixedOffset>) -> DashboardSummary {
        let offset = *now.offset();
        let current_start = month_start(now.date_naive());
        let previous_start = previous_month_start(current_start);
        let current_month_total = Self::month_total(expenses, current_start, &offset);
        let previous_month_total = Self::month_total(expenses, previous_start, &offset);
        DashboardSummary {
            total_spent: Self::total(expenses),
            current_month_total,
            previous_month_total,
            month_change_percent: Self::percent_change(current_month_total, previous_month_total),
        }
    }

    pub fn analytics(
        expenses: &[Expense],
        categories: &CategoryIndex<'_>,
        now: DateTime<FixedOffset>,
        months: usize,
        days: usize,
    ) -> AnalyticsSummary {
        AnalyticsSummary {
            total: Self::total(expenses),
            count: Self::count(expenses),
            daily_average: Self::daily_average(expenses, now.offset()),
            by_category: Self::by_category(expenses, categories),
            monthly: Self::monthly_series(expenses, now, months),
            weekly: Self::daily_series(expenses, now, days),
        }
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

fn previous_month_start(start: NaiveDate) -> NaiveDate {
    month_start(start - Duration::days(1))
}

fn next_month_start(start: NaiveDate) -> NaiveDate {
    month_start(month_start(start) + Duration::days(31))
}
