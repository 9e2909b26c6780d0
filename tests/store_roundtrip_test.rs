use investor_intel::apis::sample::generate_sample_batch;
use investor_intel::export::{read_tabular_file, write_tabular_file};
use investor_intel::storage::{InvestorQuery, LoadPolicy, Store};
use investor_intel::types::Category;
use tempfile::tempdir;

#[test]
fn test_export_reread_reload_keeps_stats() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("investors.csv");

    let mut source_store = Store::open(dir.path().join("a.db"), LoadPolicy::Replace).unwrap();
    source_store.load(&generate_sample_batch()).unwrap();
    let exported = source_store.all().unwrap();
    write_tabular_file(&exported, &csv_path).unwrap();

    let mut fresh = Store::open(dir.path().join("b.db"), LoadPolicy::Replace).unwrap();
    fresh.load(&read_tabular_file(&csv_path).unwrap()).unwrap();

    assert_eq!(
        source_store.aggregate_stats().unwrap(),
        fresh.aggregate_stats().unwrap()
    );
    assert_eq!(exported, fresh.all().unwrap());
}

#[test]
fn test_sample_batch_statistics() {
    let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
    store.load(&generate_sample_batch()).unwrap();

    let stats = store.aggregate_stats().unwrap();
    assert_eq!(stats.total, 12);
    assert_eq!(stats.by_category.get("Family Office"), Some(&4));
    assert_eq!(stats.by_category.get("Venture Capital"), Some(&4));
    assert_eq!(stats.by_category.get("Private Equity"), Some(&1));
    assert_eq!(stats.by_category.get("Hedge Fund"), Some(&1));
    assert_eq!(stats.by_category.get("Institutional Investor"), Some(&2));
    assert_eq!(stats.top_states[0], ("CA".to_string(), 6));
    assert_eq!(stats.top_states[1], ("NY".to_string(), 4));
}

#[test]
fn test_california_vcs() {
    let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
    store.load(&generate_sample_batch()).unwrap();

    let rows = store
        .query(
            &InvestorQuery::new()
                .category(Category::VentureCapital.label())
                .state("CA"),
        )
        .unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Andreessen Horowitz",
            "Sequoia Capital",
            "Benchmark Capital",
            "Lightspeed Venture Partners"
        ]
    );
    assert_eq!(rows[0].city.as_deref(), Some("Menlo Park"));
}
