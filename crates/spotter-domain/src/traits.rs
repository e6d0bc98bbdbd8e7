//! Trait definitions for external interactions
//!
//! The population of lift results is owned by infrastructure; the domain only
//! sees it through [`PopulationSource`].

use crate::cohort::CohortFilter;
use crate::lift::LiftResult;

/// Read-only source of lift results
///
/// Implemented by the storage layer (spotter-store) once per record set, and
/// by [`crate::union::UnionPopulation`] for the merged population.
pub trait PopulationSource {
    /// Error type for read operations
    type Error;

    /// Every result matching `filter`
    fn select(&self, filter: &CohortFilter) -> Result<Vec<LiftResult>, Self::Error>;

    /// Every result recorded under exactly this name, in no particular order
    fn athlete_results(&self, name: &str) -> Result<Vec<LiftResult>, Self::Error>;
}

impl<T: PopulationSource + ?Sized> PopulationSource for std::sync::Arc<T> {
    type Error = T::Error;

    fn select(&self, filter: &CohortFilter) -> Result<Vec<LiftResult>, Self::Error> {
        (**self).select(filter)
    }

    fn athlete_results(&self, name: &str) -> Result<Vec<LiftResult>, Self::Error> {
        (**self).athlete_results(name)
    }
}
