//! Spotter Engine
//!
//! Ranks an athlete (or a manually entered set of lifts) inside a filtered
//! cohort of competition results.
//!
//! # Overview
//!
//! The engine is responsible for:
//! - **Ranking**: one best value per athlete, sorted, with Total ties broken by Dots
//! - **Time windows**: current-period ranking with a single previous-year fallback
//! - **Milestones**: distance to the next of ranks 100, 50, 20, 10, 5 and 1
//! - **Nearby athletes**: the competitors around the athlete's rank
//! - **Profiles**: personal bests and default filter selections
//!
//! ## Windows
//!
//! | Today | Current period | Fallback when empty |
//! |-------|----------------|---------------------|
//! | January to March | Rolling 12 months | Previous calendar year |
//! | April to December | Current calendar year | Previous calendar year |
//!
//! All-time ranking uses no window at all.
//!
//! # Usage
//!
//! ## Synchronous evaluation
//!
//! ```
//! use chrono::NaiveDate;
//! use spotter_domain::{LiftResult, Metric, RecordSet, Sex, Taxonomy};
//! use spotter_engine::{RankingEngine, RankingRequest};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let mut rows = Vec::new();
//! for (name, total) in [("Ana", 480.0), ("Bea", 510.0)] {
//!     let mut r = LiftResult::new(name, Sex::Female, "IPF", "Raw", today, RecordSet::Ipf);
//!     r.total_kg = Some(total);
//!     rows.push(r);
//! }
//!
//! let engine = RankingEngine::new(Taxonomy::default());
//! let request = RankingRequest::athlete("Ana", Metric::parse("Total"), today);
//! let response = engine.evaluate(&request, &rows);
//! assert_eq!(response.current.result.rank, Some(2));
//! assert_eq!(response.current.milestone.unwrap().gap, 30.0);
//! ```
//!
//! ## Service
//!
//! [`RankingService`] wraps any [`spotter_domain::PopulationSource`] and bounds
//! how many repository reads run at once.
//!
//! # Configuration
//!
//! ```toml
//! max_concurrent_queries = 3
//! default_nearby_range = 5
//! taxonomy_path = "/etc/spotter/taxonomy.toml"
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
pub mod profile;
mod ranked;
mod request;
mod response;
mod service;
pub mod taxonomy;

pub use config::{EngineConfig, MAX_NEARBY_RANGE};
pub use engine::{RankingEngine, SubjectValue};
pub use error::EngineError;
pub use profile::{AthleteBests, AthleteDetails, CompetitionSummary, LiftBest};
pub use ranked::{RankedCohort, RankedEntry};
pub use request::{ManualEntry, RankingRequest, Subject};
pub use response::{NearbyList, RankingResponse, WindowRanking};
pub use service::RankingService;
