//! Spotter Domain Layer
//!
//! Pure model and rules for ranking powerlifting results: no storage, no
//! async, no I/O. Infrastructure crates implement the traits defined here.
//!
//! ## Key Concepts
//!
//! - **LiftResult**: one athlete's entry at one meet, immutable once read
//! - **Score Calculator**: Dots, Wilks, Glossbrenner, Goodlift, McCulloch
//! - **Cohort Filter**: an immutable predicate built from filter selections
//! - **Time Window**: the current-period rule and its previous-year fallback
//! - **Population**: two record sets read as one through [`PopulationSource`]
//!
//! Athlete identity is the exact name string; see [`identity`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cohort;
pub mod division;
pub mod equipment;
pub mod identity;
pub mod lift;
pub mod metric;
pub mod result;
pub mod scoring;
pub mod taxonomy;
pub mod traits;
pub mod union;
pub mod window;

// Re-exports for convenience
pub use cohort::{CohortFilter, FilterSelections};
pub use equipment::{Equipment, EquipmentClass};
pub use identity::{ExactName, IdentityStrategy};
pub use lift::{Lift, LiftResult, RecordSet, Sex, StoredScores};
pub use metric::Metric;
pub use result::{MilestoneResult, NearbyAthlete, RankResult};
pub use scoring::Formula;
pub use taxonomy::Taxonomy;
pub use traits::PopulationSource;
pub use union::UnionPopulation;
pub use window::{DateWindow, WindowMode};
