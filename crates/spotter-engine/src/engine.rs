//! Rank engine - rank, milestone and nearby over one population slice
//!
//! The engine is synchronous and pure: it is handed every row matching the
//! request's cohort filter without a time window (a single repository read)
//! and derives the all-time cohort, the current-period cohort and the
//! athlete's own value from that one slice.

use crate::ranked::{RankedCohort, RankedEntry};
use crate::request::{ManualEntry, RankingRequest, Subject};
use crate::response::{NearbyList, RankingResponse, WindowRanking};
use spotter_domain::metric::points_of;
use spotter_domain::result::milestone_target;
use spotter_domain::scoring::{self, Formula};
use spotter_domain::{
    CohortFilter, DateWindow, EquipmentClass, ExactName, FilterSelections, IdentityStrategy,
    Lift, LiftResult, Metric, MilestoneResult, NearbyAthlete, RankResult, Taxonomy,
};
use tracing::{debug, info, warn};

/// The value a subject is ranked with
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectValue {
    /// Athlete name, absent for manual entries
    pub name: Option<String>,
    /// Best value under the metric
    pub value: f64,
    /// Best Dots, for Total tie-breaks
    pub dots: f64,
}

/// Stateless ranking logic plus its lookup tables
pub struct RankingEngine {
    taxonomy: Taxonomy,
    identity: Box<dyn IdentityStrategy>,
}

impl RankingEngine {
    /// Engine with exact-name identity
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self::with_identity(taxonomy, Box::new(ExactName))
    }

    /// Engine with a custom identity strategy
    pub fn with_identity(taxonomy: Taxonomy, identity: Box<dyn IdentityStrategy>) -> Self {
        Self { taxonomy, identity }
    }

    /// Taxonomy used to expand group tokens
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Identity strategy grouping rows into athletes
    pub fn identity(&self) -> &dyn IdentityStrategy {
        self.identity.as_ref()
    }

    /// Cohort filter (without a window) for a set of selections
    pub fn filter_for(&self, selections: &FilterSelections) -> CohortFilter {
        if let Some(token) = selections.federation.as_deref() {
            let token = token.trim().to_lowercase();
            if let Some(rest) = token.strip_prefix("all-") {
                let slug = rest.strip_suffix("-tested").unwrap_or(rest);
                if slug != "tested" && !self.taxonomy.has_country(slug) {
                    warn!(federation = %token, "Unknown country group, matching as a federation code");
                }
            }
        }
        if let Some(label) = selections.division.as_deref() {
            let known = spotter_domain::division::Division::parse(label).is_some();
            let all = label.trim().is_empty() || label.trim().eq_ignore_ascii_case("all divisions");
            if !known && !all {
                warn!(division = %label, "Unknown division, applying no age filter");
            }
        }
        CohortFilter::build(selections, &self.taxonomy)
    }

    /// Answer a ranking request from the rows matching its unwindowed filter
    ///
    /// Rows outside the filter are ignored, so passing a wider slice is safe.
    pub fn evaluate(&self, request: &RankingRequest, rows: &[LiftResult]) -> RankingResponse {
        let filter = self.filter_for(&request.selections);
        self.evaluate_with_filter(request, &filter, rows)
    }

    /// [`evaluate`](Self::evaluate) with the request's filter already built
    pub fn evaluate_with_filter(
        &self,
        request: &RankingRequest,
        filter: &CohortFilter,
        rows: &[LiftResult],
    ) -> RankingResponse {
        let metric = request.metric;
        let rows: Vec<&LiftResult> = rows.iter().filter(|r| filter.matches(r)).collect();

        let subject = match self.subject_value(request, filter, &rows) {
            Ok(subject) => subject,
            Err(message) => return self.unranked(request, message),
        };

        let all_time_cohort = RankedCohort::build(rows.iter().copied(), metric, self.identity());
        let all_time = self.window_ranking(&all_time_cohort, &subject, metric, None, true);

        let (current_cohort, window, is_current) = self.current_cohort(&rows, metric, request);
        let current = self.window_ranking(&current_cohort, &subject, metric, Some(window), is_current);

        let nearby = match (request.nearby_range, current.result.rank) {
            (Some(range), Some(rank)) => Some(NearbyList {
                athletes: self.nearby(&current_cohort, rank, range, &subject),
                is_current_period_data: is_current,
                unit: metric.unit().to_string(),
            }),
            _ => None,
        };

        let message = if subject.value <= 0.0 {
            Some(match &subject.name {
                Some(name) => format!("No qualifying {} results for {}", metric.label(), name),
                None => format!("No {} entered", metric.label()),
            })
        } else {
            None
        };

        RankingResponse {
            athlete: subject.name.clone(),
            metric: metric.label().to_string(),
            unit: metric.unit().to_string(),
            athlete_value: subject.value,
            current,
            all_time,
            nearby,
            message,
        }
    }

    /// Rank of a subject inside a cohort
    ///
    /// Absent when the subject has no positive value or nobody qualifies.
    pub fn rank(&self, cohort: &RankedCohort, subject: &SubjectValue, metric: Metric) -> RankResult {
        if subject.value <= 0.0 || cohort.is_empty() {
            return RankResult::unranked(cohort.len(), subject.value, metric.is_points());
        }
        RankResult {
            rank: Some(cohort.rank_of(subject.value, subject.dots)),
            cohort_size: cohort.len(),
            score_value: subject.value,
            is_points_metric: metric.is_points(),
        }
    }

    /// Distance from `rank` to the next milestone rank
    pub fn milestone(
        &self,
        cohort: &RankedCohort,
        rank: usize,
        subject: &SubjectValue,
        metric: Metric,
    ) -> Option<MilestoneResult> {
        let target_rank = milestone_target(rank)?;
        let holder = cohort.at_rank(target_rank)?;
        Some(MilestoneResult {
            target_rank,
            target_value: holder.value,
            gap: (holder.value - subject.value).max(0.0),
            unit: metric.unit().to_string(),
        })
    }

    /// Athletes ranked within `range` places of `rank`
    ///
    /// A named subject always appears exactly once, carrying their all-time
    /// value: if they are already listed that row is updated, otherwise they
    /// are added. The list is then re-sorted, renumbered from the first listed
    /// rank and trimmed to `range` rows either side of the subject.
    pub fn nearby(
        &self,
        cohort: &RankedCohort,
        rank: usize,
        range: usize,
        subject: &SubjectValue,
    ) -> Vec<NearbyAthlete> {
        let first_rank = rank.saturating_sub(range).max(1);
        let mut rows: Vec<(RankedEntry, bool)> = cohort
            .slice(first_rank, rank.saturating_add(range))
            .iter()
            .cloned()
            .map(|e| (e, false))
            .collect();

        let Some(name) = subject.name.as_deref() else {
            return number(rows, first_rank);
        };

        match rows
            .iter_mut()
            .find(|(e, _)| self.identity.same_athlete(&e.name, name))
        {
            Some((entry, is_subject)) => {
                entry.value = subject.value;
                entry.dots = subject.dots;
                *is_subject = true;
            }
            None => rows.push((
                RankedEntry {
                    name: name.to_string(),
                    value: subject.value,
                    dots: subject.dots,
                },
                true,
            )),
        }

        let tie_break = cohort.tie_break_by_dots();
        rows.sort_by(|(a, _), (b, _)| a.compare(b, tie_break));

        let listed = number(rows, first_rank);
        let position = listed.iter().position(|a| a.is_query_athlete).unwrap_or(0);
        let start = position.saturating_sub(range);
        let end = position.saturating_add(range).saturating_add(1).min(listed.len());
        listed[start..end].to_vec()
    }

    fn subject_value(
        &self,
        request: &RankingRequest,
        filter: &CohortFilter,
        rows: &[&LiftResult],
    ) -> Result<SubjectValue, String> {
        match &request.subject {
            Subject::Athlete(name) => {
                if name.trim().is_empty() {
                    return Err("athlete name is required".to_string());
                }
                let tie_break = request.metric.breaks_ties_by_dots();
                let (value, dots) = rows
                    .iter()
                    .filter(|r| self.identity.same_athlete(&r.name, name))
                    .fold((0.0_f64, 0.0_f64), |(value, dots), r| {
                        let row_dots = if tie_break { points_of(r, Formula::Dots) } else { 0.0 };
                        (value.max(request.metric.value_of(r)), dots.max(row_dots))
                    });
                Ok(SubjectValue {
                    name: Some(name.clone()),
                    value,
                    dots,
                })
            }
            Subject::Manual(entry) => manual_value(entry, request.metric, filter),
        }
    }

    fn current_cohort(
        &self,
        rows: &[&LiftResult],
        metric: Metric,
        request: &RankingRequest,
    ) -> (RankedCohort, DateWindow, bool) {
        let window = DateWindow::resolve(request.today);
        let cohort = self.windowed(rows, metric, &window);
        debug!(
            mode = ?window.mode,
            start = %window.start,
            end = %window.end,
            cohort = cohort.len(),
            "Current period resolved"
        );
        if !cohort.is_empty() {
            return (cohort, window, true);
        }

        let fallback = DateWindow::previous_year(request.today);
        info!(
            year = %fallback.start.format("%Y"),
            "No qualifying results in the current period, using the previous year"
        );
        let cohort = self.windowed(rows, metric, &fallback);
        (cohort, fallback, false)
    }

    fn windowed(&self, rows: &[&LiftResult], metric: Metric, window: &DateWindow) -> RankedCohort {
        RankedCohort::build(
            rows.iter().copied().filter(|r| window.contains(r.date)),
            metric,
            self.identity(),
        )
    }

    fn window_ranking(
        &self,
        cohort: &RankedCohort,
        subject: &SubjectValue,
        metric: Metric,
        window: Option<DateWindow>,
        is_current_period_data: bool,
    ) -> WindowRanking {
        let result = self.rank(cohort, subject, metric);
        let milestone = result
            .rank
            .and_then(|rank| self.milestone(cohort, rank, subject, metric));
        WindowRanking {
            result,
            milestone,
            is_current_period_data,
            window,
        }
    }

    fn unranked(&self, request: &RankingRequest, message: String) -> RankingResponse {
        let metric = request.metric;
        let empty = |window: Option<DateWindow>| WindowRanking {
            result: RankResult::unranked(0, 0.0, metric.is_points()),
            milestone: None,
            is_current_period_data: true,
            window,
        };
        RankingResponse {
            athlete: request.athlete_name().map(str::to_string),
            metric: metric.label().to_string(),
            unit: metric.unit().to_string(),
            athlete_value: 0.0,
            current: empty(Some(DateWindow::resolve(request.today))),
            all_time: empty(None),
            nearby: None,
            message: Some(message),
        }
    }
}

/// Value of a manual entry; points metrics need bodyweight and sex
fn manual_value(
    entry: &ManualEntry,
    metric: Metric,
    filter: &CohortFilter,
) -> Result<SubjectValue, String> {
    let total = entry.total_kg();

    let dots = match (entry.sex, entry.bodyweight_kg) {
        (Some(sex), Some(bw)) => scoring::dots(sex, bw, total),
        _ => 0.0,
    };

    let value = match metric {
        Metric::Lift(Lift::Total) => total,
        Metric::Lift(Lift::Squat) => positive(entry.squat_kg),
        Metric::Lift(Lift::Bench) => positive(entry.bench_kg),
        Metric::Lift(Lift::Deadlift) => positive(entry.deadlift_kg),
        Metric::Points(formula) => {
            let missing = entry.missing_for_points();
            let (Some(sex), Some(bw), true) = (entry.sex, entry.bodyweight_kg, missing.is_empty())
            else {
                return Err(format!("{} required for points-based rankings", missing.join(" and ")));
            };
            let class = filter.equipment.class().unwrap_or(EquipmentClass::RawEquivalent);
            match formula {
                Formula::McCulloch => scoring::mcculloch(sex, bw, total, entry.age),
                other => scoring::score(other, sex, bw, total, class),
            }
        }
    };

    Ok(SubjectValue {
        name: None,
        value,
        dots,
    })
}

fn positive(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0)
}

fn number(rows: Vec<(RankedEntry, bool)>, first_rank: usize) -> Vec<NearbyAthlete> {
    rows.into_iter()
        .enumerate()
        .map(|(i, (entry, is_query_athlete))| NearbyAthlete {
            name: entry.name,
            rank: first_rank + i,
            value: entry.value,
            is_query_athlete,
        })
        .collect()
}
