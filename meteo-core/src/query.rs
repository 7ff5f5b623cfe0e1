//! Query orchestration: the state machine that sequences geocoding and
//! forecast lookup for one city query at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::{
    error::LookupError,
    model::{DisplayModel, QueryState},
    provider::{ForecastProvider, LocationResolver},
};

/// Minimum trimmed query length accepted by [`QueryController::search`].
const MIN_QUERY_CHARS: usize = 2;

/// Owns the query text and the single [`QueryState`] cell, and runs the
/// resolve-then-fetch pipeline as a tokio task.
///
/// Starting a new query invalidates and aborts the previous one, so a slow
/// stale response can never overwrite the state of a later query.
pub struct QueryController {
    resolver: Arc<dyn LocationResolver>,
    forecast: Arc<dyn ForecastProvider>,
    language: String,
    query: String,
    state: Arc<Mutex<QueryState>>,
    generation: Arc<AtomicU64>,
    in_flight: Option<JoinHandle<()>>,
}

impl QueryController {
    pub fn new(
        resolver: Arc<dyn LocationResolver>,
        forecast: Arc<dyn ForecastProvider>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            forecast,
            language: language.into(),
            query: String::new(),
            state: Arc::new(Mutex::new(QueryState::Idle)),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: None,
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the current query text passes the input gate.
    pub fn can_search(&self) -> bool {
        self.query.trim().chars().count() >= MIN_QUERY_CHARS
    }

    /// Snapshot of the current state cell.
    pub fn state(&self) -> QueryState {
        self.state.lock().clone()
    }

    /// Starts a lookup for the current query text.
    ///
    /// Returns `false` and leaves the state untouched when the input gate
    /// rejects the query. Otherwise any in-flight lookup is invalidated, the
    /// state moves to `Loading` before the pipeline task is spawned, and the
    /// task later writes exactly one `Success` or `Failure`.
    pub fn search(&mut self) -> bool {
        if !self.can_search() {
            return false;
        }

        // Invalidate first: a superseded lookup must never write its outcome.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        *self.state.lock() = QueryState::Loading;

        let resolver = Arc::clone(&self.resolver);
        let forecast = Arc::clone(&self.forecast);
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.generation);
        let name = self.query.clone();
        let language = self.language.clone();

        self.in_flight = Some(tokio::spawn(async move {
            let outcome = run_pipeline(resolver, forecast, &name, &language).await;

            let mut state = state.lock();
            if latest.load(Ordering::SeqCst) != generation {
                tracing::debug!("discarding superseded lookup for {name:?}");
                return;
            }
            *state = match outcome {
                Ok(model) => QueryState::Success(model),
                Err(e) => QueryState::Failure(e.to_string()),
            };
        }));
        true
    }

    /// Waits for the in-flight lookup, if any, to reach its terminal state.
    pub async fn wait(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            // An aborted lookup surfaces as a JoinError; nothing to do either way.
            let _ = handle.await;
        }
    }
}

async fn run_pipeline(
    resolver: Arc<dyn LocationResolver>,
    forecast: Arc<dyn ForecastProvider>,
    name: &str,
    language: &str,
) -> Result<DisplayModel, LookupError> {
    let location = resolver.resolve(name, language).await?;
    let snapshot = forecast.fetch(location.latitude, location.longitude).await?;
    Ok(DisplayModel::assemble(location, snapshot))
}
