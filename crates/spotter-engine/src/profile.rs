//! Athlete profile queries - personal bests and default filter selections
//!
//! Both inspect one athlete's own results across both record sets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spotter_domain::metric::points_of;
use spotter_domain::{CohortFilter, FilterSelections, Formula, Lift, LiftResult, Sex};

/// Results considered when deriving default selections
const DETAILS_DEPTH: usize = 10;

/// Competitions listed in the recent history
const RECENT_DEPTH: usize = 5;

/// Best value of one lift and where it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftBest {
    /// Weight lifted
    pub value: f64,
    /// Meet date
    pub date: NaiveDate,
    /// Meet name
    pub meet: Option<String>,
    /// Federation code
    pub federation: String,
}

/// One past competition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionSummary {
    /// Meet date
    pub date: NaiveDate,
    /// Meet name
    pub meet_name: Option<String>,
    /// Federation code
    pub federation: String,
    /// Equipment as recorded
    pub equipment: String,
    /// Weight class label
    pub weight_class: Option<String>,
    /// Division label
    pub division: Option<String>,
    /// Bodyweight
    pub bodyweight_kg: Option<f64>,
    /// Best squat
    pub squat_kg: Option<f64>,
    /// Best bench
    pub bench_kg: Option<f64>,
    /// Best deadlift
    pub deadlift_kg: Option<f64>,
    /// Total
    pub total_kg: Option<f64>,
    /// Dots, stored or recomputed
    pub dots: Option<f64>,
}

/// Personal bests under an optional filter, plus recent history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteBests {
    /// Athlete name
    pub name: String,
    /// Every recorded competition, ignoring filters
    pub total_meets: usize,
    /// Best squat
    pub best_squat: Option<LiftBest>,
    /// Best bench
    pub best_bench: Option<LiftBest>,
    /// Best deadlift
    pub best_deadlift: Option<LiftBest>,
    /// Best total
    pub best_total: Option<LiftBest>,
    /// Best IPF GL points
    pub best_goodlift: Option<f64>,
    /// Best Dots
    pub best_dots: Option<f64>,
    /// Most recent competitions, ignoring filters
    pub recent_competitions: Vec<CompetitionSummary>,
}

/// Filter defaults derived from an athlete's recent results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteDetails {
    /// Athlete name
    pub name: String,
    /// Most recent sex
    pub sex: Option<Sex>,
    /// Most recent non-empty country
    pub country: Option<String>,
    /// Most recent federation, lowercased
    pub federation: Option<String>,
    /// Most recent weight class, as "<class> kg"
    pub weight_class: Option<String>,
    /// Most recent equipment, lowercased
    pub equipment: Option<String>,
    /// Most recent division label
    pub division: Option<String>,
    /// Date of the latest competition
    pub last_competition: Option<NaiveDate>,
}

impl AthleteDetails {
    /// Selections that reproduce these defaults
    pub fn selections(&self) -> FilterSelections {
        FilterSelections {
            federation: self.federation.clone(),
            equipment: self.equipment.clone(),
            weight_class: self.weight_class.clone(),
            division: self.division.clone(),
            sex: self.sex.map(|s| s.code().to_string()),
            country: self.country.clone(),
        }
    }
}

/// Personal bests from an athlete's results
///
/// Bests honour `filter`; the meet count and recent history do not. `None`
/// when the athlete has no results at all.
pub fn athlete_bests(name: &str, results: &[LiftResult], filter: &CohortFilter) -> Option<AthleteBests> {
    if results.is_empty() {
        return None;
    }

    let filtered: Vec<&LiftResult> = results.iter().filter(|r| filter.matches(r)).collect();
    let best_points = |formula: Formula| {
        filtered
            .iter()
            .map(|r| points_of(r, formula))
            .fold(0.0_f64, f64::max)
    };

    let mut recent: Vec<&LiftResult> = results.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));

    Some(AthleteBests {
        name: name.to_string(),
        total_meets: results.len(),
        best_squat: best_lift(&filtered, Lift::Squat),
        best_bench: best_lift(&filtered, Lift::Bench),
        best_deadlift: best_lift(&filtered, Lift::Deadlift),
        best_total: best_lift(&filtered, Lift::Total),
        best_goodlift: Some(best_points(Formula::Goodlift)).filter(|v| *v > 0.0),
        best_dots: Some(best_points(Formula::Dots)).filter(|v| *v > 0.0),
        recent_competitions: recent
            .into_iter()
            .take(RECENT_DEPTH)
            .map(summarize)
            .collect(),
    })
}

/// Default selections from an athlete's ten most recent results
///
/// Each field takes the first non-empty value, newest first. `None` when the
/// athlete has no results.
pub fn athlete_details(name: &str, results: &[LiftResult]) -> Option<AthleteDetails> {
    let mut recent: Vec<&LiftResult> = results.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(DETAILS_DEPTH);

    let latest = recent.first()?;

    Some(AthleteDetails {
        name: name.to_string(),
        sex: Some(latest.sex),
        country: first_text(&recent, |r| r.country.as_deref()),
        federation: first_text(&recent, |r| Some(r.federation.as_str())).map(|f| f.to_lowercase()),
        weight_class: first_text(&recent, |r| r.weight_class_kg.as_deref()).map(|w| format!("{} kg", w)),
        equipment: first_text(&recent, |r| Some(r.equipment.as_str())).map(|e| e.to_lowercase()),
        division: first_text(&recent, |r| r.division.as_deref()),
        last_competition: Some(latest.date),
    })
}

/// First non-empty, trimmed value of a text field, newest result first
fn first_text<'a>(
    recent: &[&'a LiftResult],
    field: impl Fn(&'a LiftResult) -> Option<&'a str>,
) -> Option<String> {
    recent
        .iter()
        .filter_map(|r| field(*r))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Highest value of one lift, most recent first on ties
fn best_lift(results: &[&LiftResult], lift: Lift) -> Option<LiftBest> {
    results
        .iter()
        .filter(|r| r.lift_kg(lift) > 0.0)
        .max_by(|a, b| {
            a.lift_kg(lift)
                .total_cmp(&b.lift_kg(lift))
                .then_with(|| a.date.cmp(&b.date))
        })
        .map(|r| LiftBest {
            value: r.lift_kg(lift),
            date: r.date,
            meet: r.meet_name.clone(),
            federation: r.federation.clone(),
        })
}

fn summarize(r: &LiftResult) -> CompetitionSummary {
    let dots = points_of(r, Formula::Dots);
    CompetitionSummary {
        date: r.date,
        meet_name: r.meet_name.clone(),
        federation: r.federation.clone(),
        equipment: r.equipment.clone(),
        weight_class: r.weight_class_kg.clone(),
        division: r.division.clone(),
        bodyweight_kg: r.bodyweight_kg,
        squat_kg: r.best_squat_kg,
        bench_kg: r.best_bench_kg,
        deadlift_kg: r.best_deadlift_kg,
        total_kg: r.total_kg,
        dots: Some(dots).filter(|d| *d > 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotter_domain::{RecordSet, Taxonomy};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meet(on: NaiveDate, federation: &str, total: f64) -> LiftResult {
        let mut r = LiftResult::new("Kai Moss", Sex::Male, federation, "Raw", on, RecordSet::Opl);
        r.best_squat_kg = Some(total * 0.36);
        r.best_bench_kg = Some(total * 0.24);
        r.best_deadlift_kg = Some(total * 0.40);
        r.total_kg = Some(total);
        r.bodyweight_kg = Some(92.0);
        r.meet_name = Some(format!("Meet {}", on));
        r
    }

    #[test]
    fn test_bests_prefer_recent_on_ties() {
        let results = vec![
            meet(date(2022, 3, 1), "USAPL", 700.0),
            meet(date(2024, 3, 1), "USAPL", 700.0),
            meet(date(2023, 3, 1), "USPA", 650.0),
        ];
        let bests = athlete_bests("Kai Moss", &results, &CohortFilter::any()).unwrap();

        let total = bests.best_total.unwrap();
        assert_eq!(total.value, 700.0);
        assert_eq!(total.date, date(2024, 3, 1));
        assert_eq!(bests.total_meets, 3);
        assert!(bests.best_dots.unwrap() > 0.0);
        assert_eq!(bests.recent_competitions[0].date, date(2024, 3, 1));
    }

    #[test]
    fn test_bests_honour_filter_but_history_does_not() {
        let results = vec![
            meet(date(2022, 3, 1), "USAPL", 700.0),
            meet(date(2023, 3, 1), "USPA", 650.0),
        ];
        let selections = FilterSelections {
            federation: Some("uspa".to_string()),
            ..Default::default()
        };
        let filter = CohortFilter::build(&selections, &Taxonomy::default());
        let bests = athlete_bests("Kai Moss", &results, &filter).unwrap();

        assert_eq!(bests.best_total.unwrap().value, 650.0);
        assert_eq!(bests.recent_competitions.len(), 2);
        assert_eq!(bests.total_meets, 2);
    }

    #[test]
    fn test_recent_history_capped() {
        let results: Vec<_> = (1..=8).map(|m| meet(date(2024, m, 1), "IPF", 600.0)).collect();
        let bests = athlete_bests("Kai Moss", &results, &CohortFilter::any()).unwrap();
        assert_eq!(bests.recent_competitions.len(), 5);
        assert_eq!(bests.recent_competitions[0].date, date(2024, 8, 1));
    }

    #[test]
    fn test_unknown_athlete() {
        assert!(athlete_bests("Nobody", &[], &CohortFilter::any()).is_none());
        assert!(athlete_details("Nobody", &[]).is_none());
    }

    #[test]
    fn test_details_take_first_non_empty() {
        let mut newest = meet(date(2024, 9, 1), "USAPL", 600.0);
        newest.equipment = "Wraps".to_string();
        let mut older = meet(date(2024, 2, 1), "USAPL", 590.0);
        older.country = Some("USA".to_string());
        older.weight_class_kg = Some("93".to_string());
        older.division = Some("MR-O".to_string());

        let details = athlete_details("Kai Moss", &[older, newest]).unwrap();
        assert_eq!(details.federation.as_deref(), Some("usapl"));
        assert_eq!(details.equipment.as_deref(), Some("wraps"));
        assert_eq!(details.country.as_deref(), Some("USA"));
        assert_eq!(details.weight_class.as_deref(), Some("93 kg"));
        assert_eq!(details.division.as_deref(), Some("MR-O"));
        assert_eq!(details.last_competition, Some(date(2024, 9, 1)));

        let selections = details.selections();
        assert_eq!(selections.sex.as_deref(), Some("M"));
        assert_eq!(selections.country.as_deref(), Some("USA"));
    }

    #[test]
    fn test_details_ignore_old_results() {
        let mut results: Vec<_> = (1..=10).map(|m| meet(date(2024, m, 1), "IPF", 600.0)).collect();
        let mut ancient = meet(date(2010, 1, 1), "IPF", 500.0);
        ancient.country = Some("Norway".to_string());
        results.push(ancient);

        let details = athlete_details("Kai Moss", &results).unwrap();
        assert_eq!(details.country, None);
    }
}
