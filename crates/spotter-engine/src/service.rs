//! Ranking service - async front door over a blocking population source
//!
//! Every request performs its repository reads on tokio's blocking pool,
//! with at most `max_concurrent_queries` reads in flight. Requests share no
//! mutable state, so identical concurrent requests return identical results.

use crate::profile::{self, AthleteBests, AthleteDetails};
use crate::request::{RankingRequest, Subject};
use crate::response::RankingResponse;
use crate::{EngineConfig, EngineError, RankingEngine};
use spotter_domain::traits::PopulationSource;
use spotter_domain::{FilterSelections, LiftResult, Metric};
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Ranking, bests and details over one population
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use spotter_domain::{Metric, RecordSet, UnionPopulation};
/// use spotter_engine::{EngineConfig, RankingRequest, RankingService};
/// use spotter_store::SqliteStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let population = UnionPopulation::new(
///         SqliteStore::new("opl.db", RecordSet::Opl)?,
///         SqliteStore::new("ipf.db", RecordSet::Ipf)?,
///     );
///     let service = RankingService::new(population, EngineConfig::default())?;
///
///     let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
///     let request = RankingRequest::athlete("Jane Doe", Metric::parse("Dots"), today).with_nearby(5);
///     let response = service.rank(request).await?;
///     println!("{:?}", response.current.result.rank);
///     Ok(())
/// }
/// ```
pub struct RankingService<S> {
    source: Arc<S>,
    engine: Arc<RankingEngine>,
    permits: Arc<Semaphore>,
    config: EngineConfig,
}

impl<S> Clone for RankingService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            engine: Arc::clone(&self.engine),
            permits: Arc::clone(&self.permits),
            config: self.config.clone(),
        }
    }
}

impl<S> RankingService<S>
where
    S: PopulationSource + Send + Sync + 'static,
    S::Error: Display + Send + 'static,
{
    /// Service over `source` with the configured taxonomy
    pub fn new(source: S, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let engine = RankingEngine::new(config.load_taxonomy()?);
        Ok(Self::with_engine(source, engine, config))
    }

    /// Service with a prepared engine (custom taxonomy or identity strategy)
    pub fn with_engine(source: S, engine: RankingEngine, config: EngineConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent_queries.max(1)));
        Self {
            source: Arc::new(source),
            engine: Arc::new(engine),
            permits,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ranking engine in use
    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }

    /// Rank a stored athlete or a manual entry
    ///
    /// One repository read serves the all-time cohort, the current-period
    /// cohort, its fallback and the athlete's own value. A repository failure
    /// fails the whole request.
    pub async fn rank(&self, request: RankingRequest) -> Result<RankingResponse, EngineError> {
        if let Subject::Manual(entry) = &request.subject {
            if request.metric.is_points() && !entry.missing_for_points().is_empty() {
                // Nothing to rank; skip the read
                return Ok(self.engine.evaluate(&request, &[]));
            }
        }

        let filter = Arc::new(self.engine.filter_for(&request.selections));
        let query_filter = Arc::clone(&filter);
        let rows = self.read(move |source| source.select(&query_filter)).await?;
        debug!(rows = rows.len(), metric = %request.metric, "Population loaded");

        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || engine.evaluate_with_filter(&request, &filter, &rows))
            .await
            .map_err(|e| EngineError::Worker(e.to_string()))
    }

    /// Personal bests for an athlete, narrowed by `selections`
    pub async fn athlete_bests(
        &self,
        name: &str,
        selections: &FilterSelections,
    ) -> Result<Option<AthleteBests>, EngineError> {
        let filter = self.engine.filter_for(selections);
        let results = self.athlete_results(name).await?;
        Ok(profile::athlete_bests(name, &results, &filter))
    }

    /// Default filter selections for an athlete
    pub async fn athlete_details(&self, name: &str) -> Result<Option<AthleteDetails>, EngineError> {
        let results = self.athlete_results(name).await?;
        Ok(profile::athlete_details(name, &results))
    }

    /// Rank an athlete using their own default selections
    ///
    /// `None` when the athlete has no results.
    pub async fn rank_with_defaults(
        &self,
        name: &str,
        metric: Metric,
        today: chrono::NaiveDate,
    ) -> Result<Option<RankingResponse>, EngineError> {
        let Some(details) = self.athlete_details(name).await? else {
            return Ok(None);
        };
        let request = RankingRequest::athlete(name, metric, today)
            .with_selections(details.selections())
            .with_nearby(self.config.default_nearby_range);
        self.rank(request).await.map(Some)
    }

    async fn athlete_results(&self, name: &str) -> Result<Vec<LiftResult>, EngineError> {
        let name = name.to_string();
        self.read(move |source| source.athlete_results(&name)).await
    }

    /// Run one blocking repository read under a concurrency permit
    async fn read<T, F>(&self, query: F) -> Result<T, EngineError>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T, S::Error> + Send + 'static,
    {
        let _permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| EngineError::Worker(e.to_string()))?;

        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || query(source.as_ref()))
            .await
            .map_err(|e| EngineError::Worker(e.to_string()))?
            .map_err(|e| EngineError::Repository(e.to_string()))
    }
}
