//! Ranking requests

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spotter_domain::{FilterSelections, Metric, Sex};

/// Who is being ranked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// A stored athlete, identified by exact name
    Athlete(String),
    /// Hypothetical lifts with no stored identity
    Manual(ManualEntry),
}

/// Manually entered lifts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    /// Best squat
    pub squat_kg: Option<f64>,
    /// Best bench press
    pub bench_kg: Option<f64>,
    /// Best deadlift
    pub deadlift_kg: Option<f64>,
    /// Bodyweight, required for points metrics
    pub bodyweight_kg: Option<f64>,
    /// Sex, required for points metrics
    pub sex: Option<Sex>,
    /// Age, used by McCulloch only
    pub age: Option<f64>,
}

impl ManualEntry {
    /// Sum of the entered lifts, ignoring missing and non-positive ones
    pub fn total_kg(&self) -> f64 {
        [self.squat_kg, self.bench_kg, self.deadlift_kg]
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite() && *v > 0.0)
            .sum()
    }

    /// Names of the fields a points metric still needs
    pub fn missing_for_points(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.bodyweight_kg.is_some_and(|bw| bw > 0.0) {
            missing.push("bodyweight");
        }
        if self.sex.is_none() {
            missing.push("sex");
        }
        missing
    }
}

/// One ranking request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRequest {
    /// Athlete or manual entry
    pub subject: Subject,
    /// What to rank by
    pub metric: Metric,
    /// Filter selections as supplied by the caller
    pub selections: FilterSelections,
    /// Date the current period is resolved against
    pub today: NaiveDate,
    /// Athletes listed on each side of the subject; `None` skips the list
    pub nearby_range: Option<usize>,
}

impl RankingRequest {
    /// Request for a stored athlete with no filters and no nearby list
    pub fn athlete(name: impl Into<String>, metric: Metric, today: NaiveDate) -> Self {
        Self {
            subject: Subject::Athlete(name.into()),
            metric,
            selections: FilterSelections::default(),
            today,
            nearby_range: None,
        }
    }

    /// Request for manual lifts with no filters
    pub fn manual(entry: ManualEntry, metric: Metric, today: NaiveDate) -> Self {
        Self {
            subject: Subject::Manual(entry),
            metric,
            selections: FilterSelections::default(),
            today,
            nearby_range: None,
        }
    }

    /// Replace the filter selections
    pub fn with_selections(mut self, selections: FilterSelections) -> Self {
        self.selections = selections;
        self
    }

    /// Ask for a nearby list of `range` athletes on each side
    pub fn with_nearby(mut self, range: usize) -> Self {
        self.nearby_range = Some(range);
        self
    }

    /// Athlete name, when the subject is stored
    pub fn athlete_name(&self) -> Option<&str> {
        match &self.subject {
            Subject::Athlete(name) => Some(name.as_str()),
            Subject::Manual(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_total_ignores_missing() {
        let entry = ManualEntry {
            squat_kg: Some(200.0),
            bench_kg: None,
            deadlift_kg: Some(-250.0),
            ..Default::default()
        };
        assert_eq!(entry.total_kg(), 200.0);
    }

    #[test]
    fn test_missing_for_points() {
        let entry = ManualEntry::default();
        assert_eq!(entry.missing_for_points(), vec!["bodyweight", "sex"]);

        let entry = ManualEntry {
            bodyweight_kg: Some(0.0),
            sex: Some(Sex::Male),
            ..Default::default()
        };
        assert_eq!(entry.missing_for_points(), vec!["bodyweight"]);
    }
}
