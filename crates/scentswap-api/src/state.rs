//! # Application State
//!
//! Shared state for the Axum application: the swap store, the in-process
//! listing pool standing in for the listing collaborator, the engine
//! configurations, and an optional Prometheus handle.

use std::sync::Arc;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use scentswap_safety::{ScreeningConfig, ScreeningEngine, ScreeningError};
use scentswap_trade::{InMemoryListingStore, SwapStore};
use scentswap_value::{MatchConfig, ValuationConfig};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The authoritative swap records.
    pub store: Arc<SwapStore>,
    /// The in-process listing pool; also the event consumer standing in
    /// for the listing collaborator.
    pub listings: Arc<InMemoryListingStore>,
    /// Valuation tables for the read-only engine routes.
    pub valuation: ValuationConfig,
    /// Suggestion scorer parameters.
    pub matching: MatchConfig,
    /// Prometheus rendering handle; present once metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build the application state over the given engine configurations.
    pub fn new(
        valuation: ValuationConfig,
        matching: MatchConfig,
        screening: ScreeningConfig,
    ) -> Result<Self, ScreeningError> {
        let listings = Arc::new(InMemoryListingStore::new());
        let store = Arc::new(SwapStore::new(
            listings.clone(),
            valuation.clone(),
            ScreeningEngine::new(screening)?,
        ));
        Ok(Self {
            store,
            listings,
            valuation,
            matching,
            metrics: None,
        })
    }

    /// Install the global Prometheus recorder and attach its handle.
    ///
    /// Installs a process-wide recorder — call it once, from the serving
    /// binary, not from tests.
    pub fn with_metrics(mut self) -> Result<Self, BuildError> {
        self.metrics = Some(PrometheusBuilder::new().install_recorder()?);
        Ok(self)
    }

    /// Drain the swap store's outbox into the in-process listing pool.
    ///
    /// In production the outbox feeds the notification transport and the
    /// real listing collaborator; in this self-contained deployment the
    /// in-memory pool consumes the lock events directly.
    pub fn pump_events(&self) {
        for event in self.store.drain_events() {
            self.listings.apply_event(&event);
        }
    }
}
