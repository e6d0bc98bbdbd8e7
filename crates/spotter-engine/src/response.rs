//! Ranking responses

use serde::{Deserialize, Serialize};
use spotter_domain::{DateWindow, MilestoneResult, NearbyAthlete, RankResult};

/// Ranking inside one time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRanking {
    /// Rank, cohort size and value
    #[serde(flatten)]
    pub result: RankResult,
    /// Distance to the next milestone, when ranked below first
    pub milestone: Option<MilestoneResult>,
    /// False when the previous-year fallback was used
    pub is_current_period_data: bool,
    /// Dates covered; `None` is all-time
    pub window: Option<DateWindow>,
}

/// Athletes around the subject in the current-period cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyList {
    /// Rows ordered by rank ascending
    pub athletes: Vec<NearbyAthlete>,
    /// False when the previous-year fallback was used
    pub is_current_period_data: bool,
    /// "kg" or "points"
    pub unit: String,
}

/// Complete answer to a ranking request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResponse {
    /// Athlete name, absent for manual entries
    pub athlete: Option<String>,
    /// Metric display name
    pub metric: String,
    /// "kg" or "points"
    pub unit: String,
    /// The subject's value under the metric
    pub athlete_value: f64,
    /// Current-period ranking
    pub current: WindowRanking,
    /// All-time ranking
    pub all_time: WindowRanking,
    /// Nearby athletes, when requested and ranked
    pub nearby: Option<NearbyList>,
    /// Why nothing could be computed, if so
    pub message: Option<String>,
}
