//! Integration tests for spotter-store
//!
//! These tests verify storage round trips and that cohort selection agrees
//! with the in-memory predicate.

use chrono::NaiveDate;
use spotter_domain::traits::PopulationSource;
use spotter_domain::{
    CohortFilter, DateWindow, FilterSelections, LiftResult, RecordSet, Sex, Taxonomy,
    UnionPopulation,
};
use spotter_store::SqliteStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn lifter(name: &str, sex: Sex, federation: &str, total: f64, on: NaiveDate) -> LiftResult {
    let mut result = LiftResult::new(name, sex, federation, "Raw", on, RecordSet::Opl);
    result.total_kg = Some(total);
    result.bodyweight_kg = Some(82.5);
    result.weight_class_kg = Some("83".to_string());
    result.age_class = Some("24-34".to_string());
    result
}

fn seeded_store() -> SqliteStore {
    let store = SqliteStore::new(":memory:", RecordSet::Opl).unwrap();
    let mut tested = lifter("Ann Lee", Sex::Female, "USAPL", 420.0, date(2024, 3, 2));
    tested.tested = true;
    tested.country = Some("USA".to_string());
    tested.scores.dots = Some(455.2);

    store
        .insert_batch(&[
            tested,
            lifter("Ann Lee", Sex::Female, "USPA", 400.0, date(2023, 8, 19)),
            lifter("Bo Kim", Sex::Male, "USPA", 650.0, date(2024, 6, 1)),
            lifter("Cy Dunn", Sex::Male, "WRPF", 700.0, date(2022, 11, 5)),
        ])
        .unwrap();
    store
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:", RecordSet::Ipf);
    assert!(store.is_ok(), "Store should initialize successfully");
    assert_eq!(store.unwrap().record_set(), RecordSet::Ipf);
}

#[test]
fn test_insert_and_read_back() {
    let store = seeded_store();
    assert_eq!(store.count().unwrap(), 4);

    let ann = store.athlete_results("Ann Lee").unwrap();
    assert_eq!(ann.len(), 2);

    let tested = ann.iter().find(|r| r.federation == "USAPL").unwrap();
    assert!(tested.tested);
    assert_eq!(tested.country.as_deref(), Some("USA"));
    assert_eq!(tested.scores.dots, Some(455.2));
    assert_eq!(tested.scores.wilks, None);
    assert_eq!(tested.date, date(2024, 3, 2));
    assert_eq!(tested.source, RecordSet::Opl);
}

#[test]
fn test_athlete_lookup_is_exact() {
    let store = seeded_store();
    assert!(store.athlete_results("ann lee").unwrap().is_empty());
    assert!(store.athlete_results("Ann").unwrap().is_empty());
}

#[test]
fn test_select_matches_predicate() {
    let store = seeded_store();
    let taxonomy = Taxonomy::default();

    let selections = FilterSelections {
        federation: Some("uspa".to_string()),
        sex: Some("M".to_string()),
        ..Default::default()
    };
    let filter = CohortFilter::build(&selections, &taxonomy);
    let rows = store.select(&filter).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Bo Kim");

    let everyone = store.select(&CohortFilter::any()).unwrap();
    assert_eq!(everyone.len(), 4);
}

#[test]
fn test_select_tested_only() {
    let store = seeded_store();
    let selections = FilterSelections {
        federation: Some("all-tested".to_string()),
        ..Default::default()
    };
    let rows = store
        .select(&CohortFilter::build(&selections, &Taxonomy::default()))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].federation, "USAPL");
}

#[test]
fn test_select_window() {
    let store = seeded_store();
    let window = DateWindow::resolve(date(2024, 9, 1));
    let rows = store
        .select(&CohortFilter::any().with_window(Some(window)))
        .unwrap();
    let mut names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Ann Lee", "Bo Kim"]);
}

#[test]
fn test_select_agrees_with_predicate_on_irregular_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("opl.db");
    let store = SqliteStore::new(&path, RecordSet::Opl).unwrap();
    store
        .insert_batch(&[
            lifter("Eve Ng", Sex::Female, "USAPL", 410.0, date(2024, 5, 1)),
            lifter("Flo Hart", Sex::Female, "USAPL", 390.0, date(2024, 5, 1)),
        ])
        .unwrap();

    // Older dataset rows carry a bare year and untrimmed codes
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute("UPDATE lift_results SET date = '2024' WHERE name = 'Eve Ng'", [])
        .unwrap();
    conn.execute(
        "UPDATE lift_results SET federation = 'USAPL ' WHERE name = 'Flo Hart'",
        [],
    )
    .unwrap();

    let window = DateWindow::resolve(date(2024, 9, 1));
    let filter = CohortFilter::build(
        &FilterSelections {
            federation: Some("usapl".to_string()),
            ..Default::default()
        },
        &Taxonomy::default(),
    )
    .with_window(Some(window));

    let everyone = store.select(&CohortFilter::any()).unwrap();
    assert_eq!(everyone.len(), 2);
    assert!(everyone.iter().all(|r| filter.matches(r)));

    let mut names: Vec<_> = store
        .select(&filter)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["Eve Ng", "Flo Hart"]);
}

#[test]
fn test_file_backed_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ipf.db");

    {
        let store = SqliteStore::new(&path, RecordSet::Ipf).unwrap();
        store
            .insert_result(&lifter("Di Fox", Sex::Female, "IPF", 480.0, date(2024, 6, 9)))
            .unwrap();
    }

    let reopened = SqliteStore::new(&path, RecordSet::Ipf).unwrap();
    let rows = reopened.athlete_results("Di Fox").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].source, RecordSet::Ipf);
}

#[test]
fn test_union_of_two_stores() {
    let opl = seeded_store();
    let ipf = SqliteStore::new(":memory:", RecordSet::Ipf).unwrap();
    ipf.insert_result(&lifter("Ann Lee", Sex::Female, "IPF", 430.0, date(2024, 10, 12)))
        .unwrap();

    let union = UnionPopulation::new(opl, ipf);
    let ann = union.athlete_results("Ann Lee").unwrap();
    assert_eq!(ann.len(), 3);
    assert!(ann.iter().any(|r| r.source == RecordSet::Ipf));
    assert_eq!(union.select(&CohortFilter::any()).unwrap().len(), 5);
}
