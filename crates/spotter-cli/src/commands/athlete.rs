//! Bests and details command implementations.

use crate::cli::{BestsArgs, DetailsArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use spotter_domain::PopulationSource;
use spotter_engine::RankingService;
use std::fmt::Display;

/// Execute the bests command.
pub async fn execute_bests<S>(
    args: BestsArgs,
    service: &RankingService<S>,
    formatter: &Formatter,
) -> Result<()>
where
    S: PopulationSource + Send + Sync + 'static,
    S::Error: Display + Send + 'static,
{
    let name = required_name(&args.name)?;
    match service.athlete_bests(name, &args.filters.selections()).await? {
        Some(bests) => println!("{}", formatter.format_bests(&bests)?),
        None => eprintln!("{}", formatter.warning(&format!("No results found for '{}'", name))),
    }
    Ok(())
}

/// Execute the details command.
pub async fn execute_details<S>(
    args: DetailsArgs,
    service: &RankingService<S>,
    formatter: &Formatter,
) -> Result<()>
where
    S: PopulationSource + Send + Sync + 'static,
    S::Error: Display + Send + 'static,
{
    let name = required_name(&args.name)?;
    match service.athlete_details(name).await? {
        Some(details) => println!("{}", formatter.format_details(&details)?),
        None => eprintln!("{}", formatter.warning(&format!("No results found for '{}'", name))),
    }
    Ok(())
}

fn required_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput("Athlete name is required".to_string()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_name() {
        assert_eq!(required_name("  Kai Moss ").unwrap(), "Kai Moss");
        assert!(matches!(required_name("   "), Err(CliError::InvalidInput(_))));
    }
}
