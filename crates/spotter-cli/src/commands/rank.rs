//! Rank and manual command implementations.

use crate::cli::{ManualArgs, RankArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::NaiveDate;
use spotter_domain::{FilterSelections, Metric, PopulationSource};
use spotter_engine::{ManualEntry, RankingRequest, RankingService, MAX_NEARBY_RANGE};
use std::fmt::Display;

/// Execute the rank command.
pub async fn execute_rank<S>(
    args: RankArgs,
    service: &RankingService<S>,
    formatter: &Formatter,
) -> Result<()>
where
    S: PopulationSource + Send + Sync + 'static,
    S::Error: Display + Send + 'static,
{
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput("Athlete name is required".to_string()));
    }

    let base = if args.defaults {
        match service.athlete_details(name).await? {
            Some(details) => details.selections(),
            None => {
                eprintln!("{}", formatter.warning(&format!("No results found for '{}'", name)));
                FilterSelections::default()
            }
        }
    } else {
        FilterSelections::default()
    };

    let nearby = checked_nearby(args.nearby)?.unwrap_or(service.config().default_nearby_range);
    let request = RankingRequest::athlete(name, Metric::parse(&args.metric), today_or(args.date))
        .with_selections(args.filters.over(base))
        .with_nearby(nearby);

    let response = service.rank(request).await?;
    println!("{}", formatter.format_ranking(&response)?);
    Ok(())
}

/// Execute the manual command.
pub async fn execute_manual<S>(
    args: ManualArgs,
    service: &RankingService<S>,
    formatter: &Formatter,
) -> Result<()>
where
    S: PopulationSource + Send + Sync + 'static,
    S::Error: Display + Send + 'static,
{
    let request = manual_request(&args)?;
    let response = service.rank(request).await?;
    println!("{}", formatter.format_ranking(&response)?);
    Ok(())
}

/// Build a manual ranking request, rejecting impossible entries.
///
/// The entry's sex is taken from the `--sex` filter.
pub fn manual_request(args: &ManualArgs) -> Result<RankingRequest> {
    let lifts = [
        ("squat", args.squat),
        ("bench", args.bench),
        ("deadlift", args.deadlift),
        ("bodyweight", args.bodyweight),
        ("age", args.age),
    ];
    for (field, value) in lifts {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(CliError::InvalidInput(format!("{} must be a positive number", field)));
            }
        }
    }

    let entry = ManualEntry {
        squat_kg: args.squat,
        bench_kg: args.bench,
        deadlift_kg: args.deadlift,
        bodyweight_kg: args.bodyweight,
        sex: args.filters.sex.map(Into::into),
        age: args.age,
    };
    if entry.total_kg() <= 0.0 {
        return Err(CliError::InvalidInput(
            "Enter at least one of --squat, --bench or --deadlift".to_string(),
        ));
    }

    let mut request = RankingRequest::manual(entry, Metric::parse(&args.metric), today_or(args.date))
        .with_selections(args.filters.selections());
    if let Some(range) = checked_nearby(args.nearby)? {
        request = request.with_nearby(range);
    }
    Ok(request)
}

fn checked_nearby(range: Option<usize>) -> Result<Option<usize>> {
    match range {
        Some(r) if r > MAX_NEARBY_RANGE => Err(CliError::InvalidInput(format!(
            "Nearby range must be at most {}",
            MAX_NEARBY_RANGE
        ))),
        other => Ok(other),
    }
}

fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{FilterArgs, SexArg};
    use spotter_domain::{Formula, Sex};
    use spotter_engine::Subject;

    fn manual_args() -> ManualArgs {
        ManualArgs {
            squat: Some(180.0),
            bench: Some(110.0),
            deadlift: Some(220.0),
            bodyweight: Some(82.5),
            age: None,
            metric: "Dots".to_string(),
            filters: FilterArgs {
                sex: Some(SexArg::Male),
                equipment: Some("raw".to_string()),
                ..Default::default()
            },
            nearby: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 1),
        }
    }

    #[test]
    fn test_manual_request_construction() {
        let request = manual_request(&manual_args()).unwrap();
        assert_eq!(request.metric, Metric::Points(Formula::Dots));
        assert_eq!(request.today, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(request.selections.sex.as_deref(), Some("M"));
        assert!(request.nearby_range.is_none());
        match request.subject {
            Subject::Manual(entry) => {
                assert_eq!(entry.total_kg(), 510.0);
                assert_eq!(entry.sex, Some(Sex::Male));
            }
            Subject::Athlete(_) => panic!("Expected a manual subject"),
        }
    }

    #[test]
    fn test_manual_request_rejects_empty_and_negative() {
        let mut args = manual_args();
        args.squat = None;
        args.bench = None;
        args.deadlift = None;
        assert!(matches!(manual_request(&args), Err(CliError::InvalidInput(_))));

        let mut args = manual_args();
        args.bodyweight = Some(-80.0);
        assert!(matches!(manual_request(&args), Err(CliError::InvalidInput(ref m)) if m.contains("bodyweight")));
    }

    #[test]
    fn test_nearby_range_capped() {
        let mut args = manual_args();
        args.nearby = Some(MAX_NEARBY_RANGE + 1);
        assert!(manual_request(&args).is_err());

        args.nearby = Some(3);
        assert_eq!(manual_request(&args).unwrap().nearby_range, Some(3));
    }
}
