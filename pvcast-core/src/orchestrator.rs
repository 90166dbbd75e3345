use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    backend::WeatherBackend,
    map::MapAdapter,
    state::{AppState, FetchTicket},
};

/// Runs fetch cycles against a [`WeatherBackend`].
///
/// The state lock is taken only to apply a transition and is released while
/// a request is in flight, so the view can keep reading (and re-trigger)
/// during a cycle.
#[derive(Debug, Clone)]
pub struct FetchOrchestrator {
    backend: Arc<dyn WeatherBackend>,
}

impl FetchOrchestrator {
    pub fn new(backend: Arc<dyn WeatherBackend>) -> Self {
        Self { backend }
    }

    /// One fetch cycle: forecast, then summary, for the coordinate current at
    /// the time of the call. The summary is only requested after the
    /// forecast succeeded.
    pub async fn run<M: MapAdapter>(&self, state: &Mutex<AppState<M>>) {
        let ticket = state.lock().await.begin_fetch();
        if let Some(ticket) = ticket {
            self.complete(state, ticket).await;
        }
    }

    /// Like [`run`](Self::run), but returns as soon as the state is
    /// `Loading` and finishes the requests in a background task.
    ///
    /// `None` means the coordinate was rejected and nothing was spawned.
    pub async fn spawn<M: MapAdapter + 'static>(
        &self,
        state: Arc<Mutex<AppState<M>>>,
    ) -> Option<JoinHandle<()>> {
        let ticket = state.lock().await.begin_fetch()?;
        let this = self.clone();
        Some(tokio::spawn(async move {
            this.complete(&state, ticket).await;
        }))
    }

    async fn complete<M: MapAdapter>(&self, state: &Mutex<AppState<M>>, ticket: FetchTicket) {
        let forecast = self.backend.forecast(ticket.position()).await;
        let proceed = state.lock().await.apply_forecast(&ticket, forecast);
        if !proceed {
            return;
        }

        let summary = self.backend.summary(ticket.position()).await;
        state.lock().await.apply_summary(&ticket, summary);
    }
}
