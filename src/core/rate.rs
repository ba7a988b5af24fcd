//! Exchange rate bound to a single view activation.

use crate::core::currency::{CurrencyPair, CurrencyRateProvider, RateQuote};
use crate::core::valuation::fetch_rate;
use futures::FutureExt;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum RateState {
    /// The fetch has not resolved yet.
    Loading,
    Ready(RateQuote),
    /// The fetch failed. Stays this way until the view is activated again.
    Unavailable,
}

impl RateState {
    pub fn rate(&self) -> Option<f64> {
        match self {
            RateState::Ready(quote) => Some(quote.value),
            RateState::Loading | RateState::Unavailable => None,
        }
    }
}

/// Holds the one rate fetch made when a view is activated.
///
/// Dropping the slot abandons a fetch that is still in flight; its result is
/// never observed.
#[derive(Debug)]
pub struct RateSlot {
    handle: Option<JoinHandle<Option<RateQuote>>>,
    state: RateState,
}

impl RateSlot {
    /// Starts fetching `pair` in the background. Needs a tokio runtime.
    pub fn spawn(provider: Arc<dyn CurrencyRateProvider>, pair: CurrencyPair) -> Self {
        debug!(%pair, "Activating rate fetch");
        let handle = tokio::spawn(async move { fetch_rate(provider.as_ref(), &pair).await });
        Self {
            handle: Some(handle),
            state: RateState::Loading,
        }
    }

    /// Current state, without waiting for a pending fetch.
    pub fn state(&mut self) -> &RateState {
        if let Some(handle) = self.handle.as_mut()
            && let Some(result) = handle.now_or_never()
        {
            self.state = resolve(result);
            self.handle = None;
        }
        &self.state
    }

    /// Waits for the fetch to resolve.
    pub async fn settle(&mut self) -> &RateState {
        if let Some(handle) = self.handle.take() {
            self.state = resolve(handle.await);
        }
        &self.state
    }
}

impl Drop for RateSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Discarding pending rate fetch");
            handle.abort();
        }
    }
}

fn resolve(result: Result<Option<RateQuote>, JoinError>) -> RateState {
    match result {
        Ok(Some(quote)) => RateState::Ready(quote),
        Ok(None) => RateState::Unavailable,
        Err(e) => {
            debug!(error = %e, "Rate fetch task did not complete");
            RateState::Unavailable
        }
    }
}
