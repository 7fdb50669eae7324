mod common;

use std::sync::Arc;

use common::{at, clock, expense, memory_session, now};
use expense_core::{
    core::{
        services::ViewQuery,
        session::LoadOutcome,
        validation::{CategoryInput, ExpenseInput, Field, PresetInput, INVALID_AMOUNT},
    },
    domain::{Category, EntityId, Expense, FilterSpec, Preset},
    storage::{Collection, MemoryStore},
    CoreError, ExpenseSession,
};

fn stored<T: serde::de::DeserializeOwned>(store: &MemoryStore, collection: Collection) -> Vec<T> {
    let raw = store.blob(collection).expect("collection persisted");
    serde_json::from_str(&raw).expect("valid json")
}

fn form(amount: &str, description: &str, category_id: Option<&EntityId>) -> ExpenseInput {
    ExpenseInput {
        amount: amount.into(),
        description: description.into(),
        category_id: category_id.cloned(),
        date: at("2024-05-19T18:30:00Z"),
    }
}

#[test]
fn first_run_seeds_and_persists_defaults() {
    let (session, store) = memory_session();
    let report = session.load_report();
    assert_eq!(report.expenses, LoadOutcome::Empty);
    assert_eq!(report.categories, LoadOutcome::Seeded);
    assert_eq!(report.presets, LoadOutcome::Seeded);

    let categories: Vec<Category> = stored(&store, Collection::Categories);
    let presets: Vec<Preset> = stored(&store, Collection::Presets);
    assert_eq!(categories, session.categories());
    assert_eq!(presets, session.presets());
    assert!(store.blob(Collection::Expenses).is_none());

    let food = categories.iter().find(|c| c.name == "Food & Drink").unwrap();
    let coffee = presets.iter().find(|p| p.description == "Coffee").unwrap();
    assert_eq!(coffee.category_id, food.id);
}

#[test]
fn stored_collections_are_loaded_as_is() {
    let category = Category::new("Groceries", "#10B981");
    let existing = expense(12.5, "Milk", &category.id, "2024-05-18T09:00:00Z");
    let store = MemoryStore::new()
        .with_blob(Collection::Expenses, serde_json::to_string(&vec![existing.clone()]).unwrap())
        .with_blob(Collection::Categories, serde_json::to_string(&vec![category.clone()]).unwrap())
        .with_blob(Collection::Presets, "[]");
    let session = ExpenseSession::open(Box::new(store), clock());

    assert_eq!(session.expenses(), &[existing]);
    assert_eq!(session.categories(), &[category]);
    assert!(session.presets().is_empty());
    assert_eq!(session.load_report().presets, LoadOutcome::Loaded);
}

#[test]
fn failed_loads_fall_back_without_persisting() {
    let store = Arc::new(MemoryStore::new());
    store.set_fail_loads(true);
    let session = ExpenseSession::open(Box::new(Arc::clone(&store)), clock());

    let report = session.load_report();
    assert_eq!(report.expenses, LoadOutcome::Fallback);
    assert_eq!(report.categories, LoadOutcome::Fallback);
    assert_eq!(report.presets, LoadOutcome::Fallback);
    assert!(session.expenses().is_empty());
    assert_eq!(session.categories().len(), 8);
    assert_eq!(session.presets().len(), 4);
    assert!(store.blob(Collection::Categories).is_none());
    assert!(store.blob(Collection::Presets).is_none());
}

#[test]
fn unreadable_json_counts_as_failed_load() {
    let store = Arc::new(MemoryStore::new().with_blob(Collection::Categories, "{oops"));
    let session = ExpenseSession::open(Box::new(Arc::clone(&store)), clock());
    assert_eq!(session.load_report().categories, LoadOutcome::Fallback);
    assert_eq!(session.categories().len(), 8);
    assert_eq!(store.blob(Collection::Categories).as_deref(), Some("{oops"));
}

#[test]
fn save_failure_keeps_in_memory_mutation() {
    let (mut session, store) = memory_session();
    store.set_fail_saves(true);
    let category = session.categories()[0].id.clone();

    let added = session.quick_add(form("42.50", "Dinner", Some(&category))).unwrap();
    assert_eq!(session.expenses(), &[added]);
    assert!(store.blob(Collection::Expenses).is_none());

    store.set_fail_saves(false);
    session.quick_add(form("3", "Tea", Some(&category))).unwrap();
    let persisted: Vec<Expense> = stored(&store, Collection::Expenses);
    assert_eq!(persisted.len(), 2);
}

#[test]
fn quick_add_reports_every_invalid_field() {
    let (mut session, store) = memory_session();
    let err = session.quick_add(form("abc", "   ", None)).unwrap_err();
    let CoreError::Validation(errors) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(Field::Amount), Some(INVALID_AMOUNT));
    assert!(session.expenses().is_empty());
    assert!(store.blob(Collection::Expenses).is_none());
}

#[test]
fn apply_preset_records_expense_at_now() {
    let (mut session, store) = memory_session();
    let preset = session
        .presets()
        .iter()
        .find(|p| p.description == "Bus Fare")
        .cloned()
        .unwrap();

    let recorded = session.apply_preset(&preset.id).unwrap();
    assert_eq!(recorded.amount, 2.5);
    assert_eq!(recorded.category_id, preset.category_id);
    assert_eq!(recorded.date, now());
    assert!(session.presets().contains(&preset));

    let persisted: Vec<Expense> = stored(&store, Collection::Expenses);
    assert_eq!(persisted, vec![recorded]);
}

#[test]
fn unknown_ids_fail_and_skip_persistence() {
    let (mut session, store) = memory_session();
    let ghost = expense(1.0, "ghost", &EntityId::new(), "2024-05-01T00:00:00Z");
    assert!(matches!(
        session.update_expense(ghost.clone()),
        Err(CoreError::ExpenseNotFound(_))
    ));
    assert!(matches!(
        session.delete_expense(&ghost.id),
        Err(CoreError::ExpenseNotFound(_))
    ));
    assert!(matches!(
        session.delete_category(&EntityId::new()),
        Err(CoreError::CategoryNotFound(_))
    ));
    assert!(matches!(
        session.apply_preset(&EntityId::new()),
        Err(CoreError::PresetNotFound(_))
    ));
    assert!(store.blob(Collection::Expenses).is_none());
    assert_eq!(session.version(), 0);
}

#[test]
fn deleting_category_leaves_orphans_uncategorized() {
    let (mut session, _store) = memory_session();
    let pets = session
        .add_category(CategoryInput {
            name: "Pets".into(),
            color: "orange".into(),
        })
        .unwrap();
    session.quick_add(form("20", "Kibble", Some(&pets.id))).unwrap();

    session.delete_category(&pets.id).unwrap();
    assert_eq!(session.expenses().len(), 1);

    let analytics = session.analytics(&FilterSpec::new());
    assert_eq!(analytics.by_category.len(), 1);
    assert_eq!(analytics.by_category[0].name, "Uncategorized");
    assert_eq!(analytics.by_category[0].total, 20.0);
}

#[test]
fn preset_crud_persists_each_change() {
    let (mut session, store) = memory_session();
    let category = session.categories()[2].id.clone();
    let preset = session
        .add_preset(PresetInput {
            amount: "9.99".into(),
            description: "Streaming".into(),
            category_id: Some(category),
        })
        .unwrap();
    let persisted: Vec<Preset> = stored(&store, Collection::Presets);
    assert_eq!(persisted.len(), 5);

    let mut cheaper = preset.clone();
    cheaper.amount = 7.99;
    session.update_preset(cheaper).unwrap();
    session.delete_preset(&preset.id).unwrap();
    let persisted: Vec<Preset> = stored(&store, Collection::Presets);
    assert_eq!(persisted.len(), 4);
    assert!(persisted.iter().all(|p| p.id != preset.id));
}

#[test]
fn dashboard_compares_current_and_previous_month() {
    let (mut session, _store) = memory_session();
    let category = session.categories()[0].id.clone();
    for (amount, date) in [
        ("40", "2024-04-10T12:00:00Z"),
        ("60", "2024-05-02T12:00:00Z"),
        ("10", "2024-02-02T12:00:00Z"),
    ] {
        session
            .quick_add(ExpenseInput {
                date: at(date),
                ..form(amount, "spend", Some(&category))
            })
            .unwrap();
    }
    let dashboard = session.dashboard();
    assert_eq!(dashboard.total_spent, 110.0);
    assert_eq!(dashboard.current_month_total, 60.0);
    assert_eq!(dashboard.previous_month_total, 40.0);
    assert_eq!(dashboard.month_change_percent, 50.0);
}

#[test]
fn analytics_uses_configured_windows() {
    let (mut session, _store) = memory_session();
    let category = session.categories()[0].id.clone();
    session.quick_add(form("15", "Lunch", Some(&category))).unwrap();
    session
        .quick_add(ExpenseInput {
            date: at("2024-05-20T08:00:00Z"),
            ..form("5", "Coffee", Some(&category))
        })
        .unwrap();

    let analytics = session.analytics(&FilterSpec::new().with_category(category.clone()));
    assert_eq!(analytics.count, 2);
    assert_eq!(analytics.total, 20.0);
    assert_eq!(analytics.daily_average, 10.0);
    assert_eq!(analytics.monthly.len(), 6);
    assert_eq!(analytics.weekly.len(), 7);
    let week: Vec<_> = analytics.weekly.iter().map(|p| p.total).collect();
    assert_eq!(&week[5..], &[15.0, 5.0]);
    assert_eq!(analytics.weekly[6].label, "Mon");
}

#[test]
fn views_are_cached_until_the_next_mutation() {
    let (mut session, _store) = memory_session();
    let category = session.categories()[0].id.clone();
    for (amount, date) in [
        ("1", "2024-05-01T08:00:00Z"),
        ("2", "2024-05-03T08:00:00Z"),
        ("3", "2024-05-01T20:00:00Z"),
    ] {
        session
            .quick_add(ExpenseInput {
                date: at(date),
                ..form(amount, "item", Some(&category))
            })
            .unwrap();
    }

    let query = ViewQuery::new().with_search("ITEM");
    let first = session.view(&query);
    let second = session.view(&query);
    assert_eq!(first, second);
    assert_eq!(session.cache().hits(), 1);

    let recent = session.recent(2);
    let amounts: Vec<_> = recent.iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![2.0, 3.0]);

    let groups = session.grouped_view(&ViewQuery::new());
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].expenses.len(), 2);

    session.delete_expense(&first[0].id).unwrap();
    let misses = session.cache().misses();
    let after = session.view(&query);
    assert_eq!(after.len(), 2);
    assert_eq!(session.cache().misses(), misses + 1);
}

#[test]
fn records_with_short_string_ids_survive_a_reload_and_mutation() {
    let raw = r#"[{"id":"k3j2h4g5f6d7s","amount":12.5,"description":"Lunch","categoryId":"a1b2c3d4e5f6g","date":"2024-05-01T12:00:00.000Z"}]"#;
    let store = Arc::new(MemoryStore::new().with_blob(Collection::Expenses, raw));
    let mut session = ExpenseSession::open(Box::new(Arc::clone(&store)), clock());

    assert_eq!(session.load_report().expenses, LoadOutcome::Loaded);
    assert_eq!(session.expenses().len(), 1);
    let lunch = &session.expenses()[0];
    assert_eq!(lunch.id.as_str(), "k3j2h4g5f6d7s");
    assert_eq!(lunch.category_id, EntityId::from("a1b2c3d4e5f6g"));

    let shared = EntityId::from("a1b2c3d4e5f6g");
    session.quick_add(form("3", "Tea", Some(&shared))).unwrap();
    let persisted: Vec<Expense> = stored(&store, Collection::Expenses);
    assert_eq!(persisted.len(), 2);
    assert!(persisted.iter().any(|e| e.id.as_str() == "k3j2h4g5f6d7s"));
    assert!(store.blob(Collection::Expenses).unwrap().contains("\"a1b2c3d4e5f6g\""));

    session.delete_expense(&EntityId::from("k3j2h4g5f6d7s")).unwrap();
    assert_eq!(session.expenses().len(), 1);
}

#[test]
fn late_evening_in_another_offset_counts_toward_the_local_day() {
    let (mut session, _store) = memory_session();
    let category = session.categories()[0].id.clone();
    for (amount, date) in [("10", "2024-04-30T23:30:00-05:00"), ("20", "2024-05-01T01:00:00Z")] {
        session
            .quick_add(ExpenseInput {
                date: at(date),
                ..form(amount, "late", Some(&category))
            })
            .unwrap();
    }

    let groups = session.grouped_view(&ViewQuery::new());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "Wednesday, May 1, 2024");

    let dashboard = session.dashboard();
    assert_eq!(dashboard.current_month_total, 30.0);
    assert_eq!(dashboard.previous_month_total, 0.0);

    let analytics = session.analytics(&FilterSpec::new());
    assert_eq!(analytics.daily_average, 30.0);
}
