//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use spotter_domain::WindowMode;
use spotter_engine::{AthleteBests, AthleteDetails, LiftBest, NearbyList, RankingResponse, WindowRanking};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a ranking response.
    pub fn format_ranking(&self, response: &RankingResponse) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
            OutputFormat::Table => Ok(self.format_ranking_table(response)),
            OutputFormat::Quiet => Ok(response
                .current
                .result
                .rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string())),
        }
    }

    /// Format personal bests.
    pub fn format_bests(&self, bests: &AthleteBests) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(bests)?),
            OutputFormat::Table => Ok(self.format_bests_table(bests)),
            OutputFormat::Quiet => Ok(bests
                .best_total
                .as_ref()
                .map(|b| format!("{:.1}", b.value))
                .unwrap_or_else(|| "-".to_string())),
        }
    }

    /// Format derived filter defaults.
    ///
    /// Quiet output is the equivalent `rank` flags, ready to paste.
    pub fn format_details(&self, details: &AthleteDetails) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(details)?),
            OutputFormat::Table => Ok(self.format_details_table(details)),
            OutputFormat::Quiet => {
                let selections = details.selections();
                let flags: Vec<String> = [
                    ("federation", selections.federation),
                    ("equipment", selections.equipment),
                    ("weight-class", selections.weight_class),
                    ("division", selections.division),
                    ("sex", selections.sex),
                    ("country", selections.country),
                ]
                .into_iter()
                .filter_map(|(flag, value)| value.map(|v| format!("--{} {:?}", flag, v)))
                .collect();
                Ok(flags.join(" "))
            }
        }
    }

    fn format_ranking_table(&self, response: &RankingResponse) -> String {
        let who = response.athlete.as_deref().unwrap_or("Manual entry");
        let mut out = vec![format!(
            "{} - {}: {}",
            self.colorize(who, "bold"),
            response.metric,
            value_text(response.athlete_value, &response.unit)
        )];

        let mut builder = Builder::default();
        builder.push_record(["Period", "Rank", "Cohort", "Percentile", "Next milestone"]);
        for ranking in [&response.current, &response.all_time] {
            builder.push_record(self.ranking_row(ranking));
        }
        out.push(styled(builder));

        if !response.current.is_current_period_data {
            out.push(self.info("No results in the current period; showing the previous year"));
        }
        if let Some(message) = &response.message {
            out.push(self.warning(message));
        }
        if let Some(nearby) = &response.nearby {
            out.push(self.format_nearby(nearby));
        }

        out.join("\n")
    }

    fn ranking_row(&self, ranking: &WindowRanking) -> [String; 5] {
        let result = &ranking.result;
        let milestone = match &ranking.milestone {
            Some(m) => format!(
                "Top {}: {} (+{})",
                m.target_rank,
                value_text(m.target_value, &m.unit),
                value_text(m.gap, &m.unit)
            ),
            None if result.rank == Some(1) => self.colorize("Top of the cohort", "green"),
            None => "-".to_string(),
        };
        [
            period_label(ranking),
            result.rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
            result.cohort_size.to_string(),
            result
                .percentile()
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_else(|| "-".to_string()),
            milestone,
        ]
    }

    fn format_nearby(&self, nearby: &NearbyList) -> String {
        if nearby.athletes.is_empty() {
            return self.colorize("No nearby athletes.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Rank", "Athlete", "Value"]);
        for athlete in &nearby.athletes {
            let name = if athlete.is_query_athlete {
                self.colorize(&format!("> {}", athlete.name), "cyan")
            } else {
                athlete.name.clone()
            };
            builder.push_record([
                athlete.rank.to_string(),
                name,
                value_text(athlete.value, &nearby.unit),
            ]);
        }
        styled(builder)
    }

    fn format_bests_table(&self, bests: &AthleteBests) -> String {
        let mut out = vec![format!(
            "{} - {} meet(s)",
            self.colorize(&bests.name, "bold"),
            bests.total_meets
        )];

        let mut builder = Builder::default();
        builder.push_record(["Lift", "Best", "Date", "Meet", "Federation"]);
        for (label, best) in [
            ("Squat", &bests.best_squat),
            ("Bench", &bests.best_bench),
            ("Deadlift", &bests.best_deadlift),
            ("Total", &bests.best_total),
        ] {
            builder.push_record(lift_row(label, best.as_ref()));
        }
        for (label, points) in [("GL Points", bests.best_goodlift), ("Dots", bests.best_dots)] {
            builder.push_record([
                label.to_string(),
                points.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".to_string()),
                String::new(),
                String::new(),
                String::new(),
            ]);
        }
        out.push(styled(builder));

        if !bests.recent_competitions.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Date", "Meet", "Federation", "Equipment", "Class", "Total", "Dots"]);
            for meet in &bests.recent_competitions {
                builder.push_record([
                    meet.date.to_string(),
                    meet.meet_name.clone().unwrap_or_default(),
                    meet.federation.clone(),
                    meet.equipment.clone(),
                    meet.weight_class.clone().unwrap_or_default(),
                    meet.total_kg.map(|t| format!("{:.1}", t)).unwrap_or_else(|| "-".to_string()),
                    meet.dots.map(|d| format!("{:.2}", d)).unwrap_or_else(|| "-".to_string()),
                ]);
            }
            out.push("Recent competitions:".to_string());
            out.push(styled(builder));
        }

        out.join("\n")
    }

    fn format_details_table(&self, details: &AthleteDetails) -> String {
        let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Name".to_string(), details.name.clone()]);
        builder.push_record([
            "Sex".to_string(),
            details.sex.map(|s| s.code().to_string()).unwrap_or_else(|| "-".to_string()),
        ]);
        builder.push_record(["Country".to_string(), text(&details.country)]);
        builder.push_record(["Federation".to_string(), text(&details.federation)]);
        builder.push_record(["Weight class".to_string(), text(&details.weight_class)]);
        builder.push_record(["Equipment".to_string(), text(&details.equipment)]);
        builder.push_record(["Division".to_string(), text(&details.division)]);
        builder.push_record([
            "Last competition".to_string(),
            details
                .last_competition
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
        styled(builder)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            "bold" => text.bold().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn lift_row(label: &str, best: Option<&LiftBest>) -> [String; 5] {
    match best {
        Some(b) => [
            label.to_string(),
            format!("{:.1} kg", b.value),
            b.date.to_string(),
            b.meet.clone().unwrap_or_default(),
            b.federation.clone(),
        ],
        None => [label.to_string(), "-".to_string(), String::new(), String::new(), String::new()],
    }
}

/// Human label for the period a ranking covers.
pub fn period_label(ranking: &WindowRanking) -> String {
    match ranking.window {
        None => "All time".to_string(),
        Some(window) => match window.mode {
            WindowMode::Rolling12Months => format!("{} to {}", window.start, window.end),
            WindowMode::CalendarYear => window.start.format("%Y").to_string(),
            WindowMode::PreviousYear => format!("{} (previous year)", window.start.format("%Y")),
        },
    }
}

fn value_text(value: f64, unit: &str) -> String {
    if unit == "kg" {
        format!("{:.1} kg", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spotter_domain::{DateWindow, MilestoneResult, NearbyAthlete, RankResult, Sex};

    fn window_ranking(rank: Option<usize>, window: Option<DateWindow>) -> WindowRanking {
        WindowRanking {
            result: RankResult {
                rank,
                cohort_size: 40,
                score_value: 452.3,
                is_points_metric: true,
            },
            milestone: rank.filter(|r| *r > 1).map(|_| MilestoneResult {
                target_rank: 10,
                target_value: 470.0,
                gap: 17.7,
                unit: "points".to_string(),
            }),
            is_current_period_data: true,
            window,
        }
    }

    fn response() -> RankingResponse {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        RankingResponse {
            athlete: Some("Jane Doe".to_string()),
            metric: "Dots".to_string(),
            unit: "points".to_string(),
            athlete_value: 452.3,
            current: window_ranking(Some(12), Some(DateWindow::resolve(today))),
            all_time: window_ranking(Some(1), None),
            nearby: Some(NearbyList {
                athletes: vec![
                    NearbyAthlete {
                        name: "Ana".to_string(),
                        rank: 11,
                        value: 455.0,
                        is_query_athlete: false,
                    },
                    NearbyAthlete {
                        name: "Jane Doe".to_string(),
                        rank: 12,
                        value: 452.3,
                        is_query_athlete: true,
                    },
                ],
                is_current_period_data: true,
                unit: "points".to_string(),
            }),
            message: None,
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_ranking(&response()).unwrap();
        assert!(output.contains("Jane Doe - Dots: 452.30"));
        assert!(output.contains("Next milestone"));
        assert!(output.contains("Top 10: 470.00 (+17.70)"));
        assert!(output.contains("All time"));
        assert!(output.contains("2025"));
        assert!(output.contains("> Jane Doe"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_ranking(&response()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["current"]["rank"], 12);
        assert_eq!(value["nearby"]["athletes"][1]["is_query_athlete"], true);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_ranking(&response()).unwrap(), "12");

        let mut unranked = response();
        unranked.current.result.rank = None;
        assert_eq!(formatter.format_ranking(&unranked).unwrap(), "-");
    }

    #[test]
    fn test_previous_year_label() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let ranking = window_ranking(Some(3), Some(DateWindow::previous_year(today)));
        assert_eq!(period_label(&ranking), "2024 (previous year)");
    }

    #[test]
    fn test_details_quiet_flags() {
        let details = AthleteDetails {
            name: "Kai Moss".to_string(),
            sex: Some(Sex::Male),
            country: Some("USA".to_string()),
            federation: Some("usapl".to_string()),
            weight_class: Some("93 kg".to_string()),
            equipment: Some("raw".to_string()),
            division: None,
            last_competition: None,
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(
            formatter.format_details(&details).unwrap(),
            r#"--federation "usapl" --equipment "raw" --weight-class "93 kg" --sex "M" --country "USA""#
        );
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
