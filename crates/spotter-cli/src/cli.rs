//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use spotter_domain::{FilterSelections, Sex};

/// Spotter CLI - see where a lifter stands among their peers.
#[derive(Debug, Parser)]
#[command(name = "spotter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SPOTTER_CONFIG")]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (rank only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank a recorded athlete
    Rank(RankArgs),

    /// Rank manually entered lifts
    Manual(ManualArgs),

    /// Show an athlete's personal bests
    Bests(BestsArgs),

    /// Show the filter defaults derived from an athlete's recent meets
    Details(DetailsArgs),

    /// Manage dataset profiles
    Profile(ProfileArgs),
}

/// Cohort filter selections shared by the ranking commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Federation code or group token (all, all-tested, fully-tested, all-usa, all-usa-tested, ...)
    #[arg(long)]
    pub federation: Option<String>,

    /// Equipment (raw, wraps, raw+wraps, single-ply, raw-equivalent, equipped, ...)
    #[arg(long)]
    pub equipment: Option<String>,

    /// Weight class label, e.g. "83" or "120+ kg"
    #[arg(long)]
    pub weight_class: Option<String>,

    /// Division (Sub-Junior, Junior, Open, Masters 1-4)
    #[arg(long)]
    pub division: Option<String>,

    /// Restrict the cohort to one sex
    #[arg(long, value_enum, ignore_case = true)]
    pub sex: Option<SexArg>,

    /// Restrict the cohort to athletes from one country
    #[arg(long)]
    pub country: Option<String>,
}

impl FilterArgs {
    /// Convert into engine filter selections.
    pub fn selections(&self) -> FilterSelections {
        FilterSelections {
            federation: self.federation.clone(),
            equipment: self.equipment.clone(),
            weight_class: self.weight_class.clone(),
            division: self.division.clone(),
            sex: self.sex.map(|s| Sex::from(s).code().to_string()),
            country: self.country.clone(),
        }
    }

    /// Layer the explicit selections over `base`.
    pub fn over(&self, base: FilterSelections) -> FilterSelections {
        let explicit = self.selections();
        FilterSelections {
            federation: explicit.federation.or(base.federation),
            equipment: explicit.equipment.or(base.equipment),
            weight_class: explicit.weight_class.or(base.weight_class),
            division: explicit.division.or(base.division),
            sex: explicit.sex.or(base.sex),
            country: explicit.country.or(base.country),
        }
    }
}

/// Arguments for the rank command.
#[derive(Debug, Parser)]
pub struct RankArgs {
    /// Athlete name, exactly as recorded
    pub name: String,

    /// Metric (Total, Squat, Bench, Deadlift, "GL Points", Dots, Glossbrenner, McCulloch, Wilks)
    #[arg(short, long, default_value = "Total")]
    pub metric: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Start from the athlete's own recent federation, class and equipment
    #[arg(long)]
    pub defaults: bool,

    /// Athletes listed either side of the athlete
    #[arg(short, long)]
    pub nearby: Option<usize>,

    /// Rank as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for the manual command.
#[derive(Debug, Parser)]
pub struct ManualArgs {
    /// Best squat in kg
    #[arg(long)]
    pub squat: Option<f64>,

    /// Best bench press in kg
    #[arg(long)]
    pub bench: Option<f64>,

    /// Best deadlift in kg
    #[arg(long)]
    pub deadlift: Option<f64>,

    /// Bodyweight in kg (points metrics only)
    #[arg(long)]
    pub bodyweight: Option<f64>,

    /// Age, used by McCulloch
    #[arg(long)]
    pub age: Option<f64>,

    /// Metric to rank by
    #[arg(short, long, default_value = "Total")]
    pub metric: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Athletes listed either side of the entered lifts
    #[arg(short, long)]
    pub nearby: Option<usize>,

    /// Rank as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for the bests command.
#[derive(Debug, Parser)]
pub struct BestsArgs {
    /// Athlete name, exactly as recorded
    pub name: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the details command.
#[derive(Debug, Parser)]
pub struct DetailsArgs {
    /// Athlete name, exactly as recorded
    pub name: String,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// OpenPowerlifting database file
        #[arg(long)]
        opl: String,
        /// OpenIPF database file
        #[arg(long)]
        ipf: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Sex argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SexArg {
    /// Male
    #[value(name = "m", alias = "male")]
    Male,
    /// Female
    #[value(name = "f", alias = "female")]
    Female,
}

impl From<SexArg> for Sex {
    fn from(sex: SexArg) -> Self {
        match sex {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_command() {
        let cli = Cli::parse_from([
            "spotter",
            "rank",
            "Jane Doe",
            "--metric",
            "Dots",
            "--federation",
            "all-usa-tested",
            "--sex",
            "F",
            "--nearby",
            "3",
        ]);
        match cli.command {
            Command::Rank(args) => {
                assert_eq!(args.name, "Jane Doe");
                assert_eq!(args.metric, "Dots");
                assert_eq!(args.nearby, Some(3));
                let selections = args.filters.selections();
                assert_eq!(selections.federation.as_deref(), Some("all-usa-tested"));
                assert_eq!(selections.sex.as_deref(), Some("F"));
            }
            _ => panic!("Expected Rank command"),
        }
    }

    #[test]
    fn test_manual_command_with_date() {
        let cli = Cli::parse_from([
            "spotter",
            "--format",
            "json",
            "manual",
            "--squat",
            "200",
            "--bench",
            "130",
            "--deadlift",
            "250",
            "--date",
            "2025-02-14",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Manual(args) => {
                assert_eq!(args.squat, Some(200.0));
                assert_eq!(args.metric, "Total");
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 2, 14));
                assert!(args.filters.federation.is_none() && args.filters.sex.is_none());
            }
            _ => panic!("Expected Manual command"),
        }
    }

    #[test]
    fn test_sex_conversion() {
        let sex: Sex = SexArg::Female.into();
        assert_eq!(sex, Sex::Female);
    }
}
