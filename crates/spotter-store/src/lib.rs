//! Spotter Storage Layer
//!
//! Implements [`PopulationSource`] over one SQLite record set. The two record
//! sets (OpenPowerlifting and OpenIPF) are separate databases merged at read
//! time by [`spotter_domain::UnionPopulation`].
//!
//! # Query strategy
//!
//! The cheap, indexable parts of a cohort filter (sex, federation codes, date
//! window) are pushed into the SQL `WHERE` clause. Every returned row is then
//! checked against [`CohortFilter::matches`], which remains the single source
//! of truth for membership.
//!
//! # Examples
//!
//! ```no_run
//! use spotter_domain::RecordSet;
//! use spotter_store::SqliteStore;
//!
//! let store = SqliteStore::new("opl.db", RecordSet::Opl).unwrap();
//! // Store is now ready to serve cohort selections
//! ```

#![warn(missing_docs)]

use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, Row};
use spotter_domain::cohort::FederationFilter;
use spotter_domain::traits::PopulationSource;
use spotter_domain::{CohortFilter, LiftResult, RecordSet, Sex, StoredScores};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

const COLUMNS: &str = "name, sex, event, equipment, age, age_class, division, bodyweight_kg,
     weight_class_kg, best_squat_kg, best_bench_kg, best_deadlift_kg, total_kg,
     dots, wilks, glossbrenner, goodlift, mcculloch, tested, country, federation, date, meet_name";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored data could not be interpreted
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A previous holder of the connection panicked
    #[error("Connection lock poisoned")]
    Poisoned,
}

/// SQLite-backed record set
///
/// # Thread Safety
///
/// The connection sits behind a mutex so one store can be shared across the
/// engine's blocking workers; queries against the same file are serialized.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    record_set: RecordSet,
}

impl SqliteStore {
    /// Open (or create) the database at `path` holding `record_set`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P, record_set: RecordSet) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
            record_set,
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Which record set this store serves
    pub fn record_set(&self) -> RecordSet {
        self.record_set
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.connection()?.execute_batch(schema)?;
        Ok(())
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Insert one result
    pub fn insert_result(&self, result: &LiftResult) -> Result<(), StoreError> {
        let conn = self.connection()?;
        insert_row(&conn, result)?;
        Ok(())
    }

    /// Insert many results in one transaction
    pub fn insert_batch(&self, results: &[LiftResult]) -> Result<usize, StoreError> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        for result in results {
            insert_row(&tx, result)?;
        }
        tx.commit()?;
        Ok(results.len())
    }

    /// Number of stored results
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM lift_results", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn query(
        &self,
        sql: &str,
        values: Vec<rusqlite::types::Value>,
    ) -> Result<Vec<LiftResult>, StoreError> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(sql)?;
        let record_set = self.record_set;
        let rows = stmt
            .query_map(params_from_iter(values), |row| read_row(row, record_set))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl PopulationSource for SqliteStore {
    type Error = StoreError;

    fn select(&self, filter: &CohortFilter) -> Result<Vec<LiftResult>, Self::Error> {
        let (sql, values) = select_sql(filter);
        let candidates = self.query(&sql, values)?;
        let scanned = candidates.len();

        let rows: Vec<LiftResult> = candidates.into_iter().filter(|r| filter.matches(r)).collect();
        debug!(
            record_set = self.record_set.as_str(),
            scanned,
            matched = rows.len(),
            "Cohort selection"
        );
        Ok(rows)
    }

    fn athlete_results(&self, name: &str) -> Result<Vec<LiftResult>, Self::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM lift_results WHERE name = ?1 AND sex IN ('M', 'F')"
        );
        self.query(&sql, vec![rusqlite::types::Value::Text(name.to_string())])
    }
}

/// SQL prefilter on sex and federation
///
/// The date window is left to [`CohortFilter::matches`]: stored dates are not
/// all full ISO dates, so text comparison would drop bare-year rows.
fn select_sql(filter: &CohortFilter) -> (String, Vec<rusqlite::types::Value>) {
    use rusqlite::types::Value;

    let mut sql = format!("SELECT {COLUMNS} FROM lift_results WHERE sex IN ('M', 'F')");
    let mut values: Vec<Value> = Vec::new();

    if let Some(sex) = filter.sex {
        sql.push_str(" AND sex = ?");
        values.push(Value::Text(sex.code().to_string()));
    }

    match &filter.federation {
        FederationFilter::Exact { code, .. } => {
            sql.push_str(" AND LOWER(TRIM(federation)) = ?");
            values.push(Value::Text(code.clone()));
        }
        FederationFilter::CountryGroup { codes, .. } | FederationFilter::FullyTestedGroup(codes) => {
            if codes.is_empty() {
                sql.push_str(" AND 0");
            } else {
                let placeholders = vec!["?"; codes.len()].join(", ");
                sql.push_str(&format!(" AND LOWER(TRIM(federation)) IN ({placeholders})"));
                values.extend(codes.iter().cloned().map(Value::Text));
            }
        }
        FederationFilter::TestedOnly => sql.push_str(" AND tested = 1"),
        FederationFilter::Any => {}
    }

    (sql, values)
}

fn insert_row(conn: &Connection, r: &LiftResult) -> Result<(), StoreError> {
    conn.execute(
        &format!(
            "INSERT INTO lift_results ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                     ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)"
        ),
        params![
            &r.name,
            r.sex.code(),
            &r.event,
            &r.equipment,
            r.age,
            &r.age_class,
            &r.division,
            r.bodyweight_kg,
            &r.weight_class_kg,
            r.best_squat_kg,
            r.best_bench_kg,
            r.best_deadlift_kg,
            r.total_kg,
            r.scores.dots,
            r.scores.wilks,
            r.scores.glossbrenner,
            r.scores.goodlift,
            r.scores.mcculloch,
            r.tested,
            &r.country,
            &r.federation,
            r.date.format(DATE_FORMAT).to_string(),
            &r.meet_name,
        ],
    )?;
    Ok(())
}

fn read_row(row: &Row<'_>, record_set: RecordSet) -> rusqlite::Result<LiftResult> {
    let sex_code: String = row.get(1)?;
    let sex = Sex::parse(&sex_code).ok_or_else(|| conversion_error(1, format!("Unknown sex: {}", sex_code)))?;

    let date_text: String = row.get(21)?;
    let date = parse_date(&date_text).ok_or_else(|| conversion_error(21, format!("Bad date: {}", date_text)))?;

    Ok(LiftResult {
        name: row.get(0)?,
        sex,
        event: row.get(2)?,
        equipment: row.get(3)?,
        age: row.get(4)?,
        age_class: row.get(5)?,
        division: row.get(6)?,
        bodyweight_kg: row.get(7)?,
        weight_class_kg: row.get(8)?,
        best_squat_kg: row.get(9)?,
        best_bench_kg: row.get(10)?,
        best_deadlift_kg: row.get(11)?,
        total_kg: row.get(12)?,
        scores: StoredScores {
            dots: row.get(13)?,
            wilks: row.get(14)?,
            glossbrenner: row.get(15)?,
            goodlift: row.get(16)?,
            mcculloch: row.get(17)?,
        },
        tested: row.get(18)?,
        country: row.get(19)?,
        federation: row.get(20)?,
        date,
        meet_name: row.get(22)?,
        source: record_set,
    })
}

/// Full ISO dates, or a bare year ("2019") read as January 1
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .or_else(|| text.parse::<i32>().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)))
}

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        Box::new(StoreError::InvalidData(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_forms() {
        assert_eq!(parse_date("2024-05-04"), NaiveDate::from_ymd_opt(2024, 5, 4));
        assert_eq!(parse_date("2019"), NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(parse_date("May 4"), None);
    }

    #[test]
    fn test_select_sql_pushes_down_federation_group() {
        let mut filter = CohortFilter::any();
        filter.federation = FederationFilter::CountryGroup {
            codes: vec!["usapl".to_string(), "uspa".to_string()],
            tested_only: false,
        };
        let (sql, values) = select_sql(&filter);
        assert!(sql.contains("IN (?, ?)"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_select_sql_empty_group_matches_nothing() {
        let mut filter = CohortFilter::any();
        filter.federation = FederationFilter::FullyTestedGroup(Vec::new());
        let (sql, values) = select_sql(&filter);
        assert!(sql.ends_with("AND 0"));
        assert!(values.is_empty());
    }
}
