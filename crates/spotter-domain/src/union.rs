//! Union population - two record sets read as one

use crate::cohort::CohortFilter;
use crate::lift::LiftResult;
use crate::traits::PopulationSource;

/// Logical union of two independently maintained record sets
///
/// Filters and athlete lookups are applied to both sets and the rows
/// concatenated; nothing downstream can tell which set a row came from
/// except through [`LiftResult::source`].
#[derive(Debug, Clone)]
pub struct UnionPopulation<A, B> {
    set_a: A,
    set_b: B,
}

impl<A, B> UnionPopulation<A, B> {
    /// Merge two sources
    pub fn new(set_a: A, set_b: B) -> Self {
        Self { set_a, set_b }
    }
}

impl<A, B> PopulationSource for UnionPopulation<A, B>
where
    A: PopulationSource,
    B: PopulationSource<Error = A::Error>,
{
    type Error = A::Error;

    fn select(&self, filter: &CohortFilter) -> Result<Vec<LiftResult>, Self::Error> {
        let mut rows = self.set_a.select(filter)?;
        rows.extend(self.set_b.select(filter)?);
        Ok(rows)
    }

    fn athlete_results(&self, name: &str) -> Result<Vec<LiftResult>, Self::Error> {
        let mut rows = self.set_a.athlete_results(name)?;
        rows.extend(self.set_b.athlete_results(name)?);
        Ok(rows)
    }
}
