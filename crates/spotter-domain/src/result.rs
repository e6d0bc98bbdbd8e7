//! Result value objects produced by ranking

use serde::{Deserialize, Serialize};

/// Milestone rank thresholds, checked in this order
pub const MILESTONES: [usize; 6] = [100, 50, 20, 10, 5, 1];

/// An athlete's position inside one cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    /// 1-based rank; absent when the athlete has no qualifying value
    pub rank: Option<usize>,
    /// Distinct athletes with a positive value
    pub cohort_size: usize,
    /// The athlete's value under the metric
    pub score_value: f64,
    /// Whether the value is a normalized score rather than kilograms
    pub is_points_metric: bool,
}

impl RankResult {
    /// Result for an athlete with nothing to rank
    pub fn unranked(cohort_size: usize, score_value: f64, is_points_metric: bool) -> Self {
        Self {
            rank: None,
            cohort_size,
            score_value,
            is_points_metric,
        }
    }

    /// Share of the cohort ranked at or below the athlete, 0-100
    pub fn percentile(&self) -> Option<f64> {
        let rank = self.rank?;
        if self.cohort_size == 0 {
            return None;
        }
        let below = self.cohort_size.saturating_sub(rank) as f64;
        Some(100.0 * (below + 1.0) / self.cohort_size as f64)
    }
}

/// Distance to the next milestone rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneResult {
    /// Rank being aimed for
    pub target_rank: usize,
    /// Value of whoever holds that rank now
    pub target_value: f64,
    /// How much the athlete still needs; never negative
    pub gap: f64,
    /// "kg" or "points"
    pub unit: String,
}

/// One row of the nearby-athletes list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyAthlete {
    /// Athlete name
    pub name: String,
    /// Rank within the listed cohort
    pub rank: usize,
    /// Best value under the metric
    pub value: f64,
    /// Whether this row is the athlete the request was about
    pub is_query_athlete: bool,
}

/// First milestone strictly better than `rank`, if any
pub fn milestone_target(rank: usize) -> Option<usize> {
    if rank <= 1 {
        return None;
    }
    MILESTONES.iter().copied().find(|&threshold| threshold < rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_targets() {
        assert_eq!(milestone_target(300), Some(100));
        assert_eq!(milestone_target(101), Some(100));
        assert_eq!(milestone_target(100), Some(50));
        assert_eq!(milestone_target(30), Some(20));
        assert_eq!(milestone_target(2), Some(1));
        assert_eq!(milestone_target(1), None);
        assert_eq!(milestone_target(0), None);
    }

    #[test]
    fn test_percentile() {
        let top = RankResult {
            rank: Some(1),
            cohort_size: 200,
            score_value: 700.0,
            is_points_metric: false,
        };
        assert_eq!(top.percentile(), Some(100.0));

        let last = RankResult { rank: Some(200), ..top.clone() };
        assert_eq!(last.percentile(), Some(0.5));

        assert_eq!(RankResult::unranked(10, 0.0, false).percentile(), None);
    }
}
