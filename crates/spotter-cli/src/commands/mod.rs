//! Command implementations.

pub mod athlete;
pub mod profile;
pub mod rank;

pub use self::athlete::{execute_bests, execute_details};
pub use self::profile::execute_profile;
pub use self::rank::{execute_manual, execute_rank};

use crate::config::Config;
use crate::error::{CliError, Result};
use spotter_domain::{RecordSet, UnionPopulation};
use spotter_engine::RankingService;
use spotter_store::SqliteStore;
use std::path::Path;

/// Both record sets of a profile, ranked as one population.
pub type Population = UnionPopulation<SqliteStore, SqliteStore>;

/// Open the active profile's databases behind a ranking service.
pub fn open_service(config: &Config) -> Result<RankingService<Population>> {
    let profile = config.active()?;
    let opl = open_store(&profile.opl_db, RecordSet::Opl)?;
    let ipf = open_store(&profile.ipf_db, RecordSet::Ipf)?;
    let service = RankingService::new(UnionPopulation::new(opl, ipf), config.engine_config()?)?;
    Ok(service)
}

fn open_store(path: &Path, record_set: RecordSet) -> Result<SqliteStore> {
    // Opening would silently create an empty database
    if !path.exists() {
        return Err(CliError::Config(format!(
            "{} database not found at {}",
            record_set.as_str(),
            path.display()
        )));
    }
    tracing::debug!(record_set = record_set.as_str(), path = %path.display(), "Opening record set");
    Ok(SqliteStore::new(path, record_set)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;
    use spotter_domain::{LiftResult, Sex};
    use tempfile::TempDir;

    #[test]
    fn test_missing_database_is_config_error() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.set_profile(
            "default".to_string(),
            Profile {
                opl_db: dir.path().join("opl.db"),
                ipf_db: dir.path().join("ipf.db"),
            },
        );

        let err = open_service(&config).err().unwrap();
        assert!(matches!(err, CliError::Config(ref m) if m.contains("opl database not found")));
        assert!(!dir.path().join("opl.db").exists());
    }

    #[test]
    fn test_open_existing_databases() {
        let dir = TempDir::new().unwrap();
        let opl_path = dir.path().join("opl.db");
        let ipf_path = dir.path().join("ipf.db");
        let on = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        SqliteStore::new(&opl_path, RecordSet::Opl)
            .unwrap()
            .insert_result(&LiftResult::new("Ana", Sex::Female, "USAPL", "Raw", on, RecordSet::Opl))
            .unwrap();
        SqliteStore::new(&ipf_path, RecordSet::Ipf).unwrap();

        let mut config = Config::default();
        config.set_profile(
            "default".to_string(),
            Profile {
                opl_db: opl_path,
                ipf_db: ipf_path,
            },
        );
        let service = open_service(&config).unwrap();
        assert_eq!(service.config().max_concurrent_queries, 3);
    }
}
