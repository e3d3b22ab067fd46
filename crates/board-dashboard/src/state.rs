use std::sync::{Arc, PoisonError, RwLock};

use board_client::BoardApi;
use board_core::{CancellationToken, RetryPolicy};
use tracing::debug;

use crate::{errors::DashboardError, load::load_dashboard, view::DashboardView};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardState {
    #[default]
    Idle,
    Loading,
    Loaded(DashboardView),
}

/// Shared dashboard handle.
///
/// The displayed state only changes when a refresh starts (`Loading`) and when one settles
/// (`Loaded`). Clones observe the same state. Refreshes may overlap: the view of the most
/// recently started refresh that succeeded wins, and the state never stays `Loading` once
/// nothing is running.
#[derive(Clone)]
pub struct Dashboard {
    api: Arc<dyn BoardApi>,
    policy: RetryPolicy,
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    state: DashboardState,
    /// Generation of the most recently started refresh.
    generation: u64,
    in_flight: usize,
    /// Newest successful view and the generation that produced it.
    settled: Option<(u64, DashboardView)>,
}

impl Inner {
    fn settled_state(&self) -> DashboardState {
        match &self.settled {
            Some((_, view)) => DashboardState::Loaded(view.clone()),
            None => DashboardState::Idle,
        }
    }
}

/// One running refresh; settles as failed if dropped before finishing.
struct InFlight<'a> {
    dashboard: &'a Dashboard,
    generation: u64,
    done: bool,
}

impl InFlight<'_> {
    fn finish(mut self, view: Option<DashboardView>) {
        self.done = true;
        self.dashboard.settle(self.generation, view);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.dashboard.settle(self.generation, None);
        }
    }
}

impl Dashboard {
    pub fn new(api: Arc<dyn BoardApi>, policy: RetryPolicy) -> Self {
        Self {
            api,
            policy,
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Reload all datasets; failed ones are fetched again from scratch.
    pub async fn refresh(&self) -> Result<DashboardView, DashboardError> {
        self.refresh_with_cancel(&CancellationToken::new()).await
    }

    /// Like [`Dashboard::refresh`]. A cancelled refresh leaves the last loaded view (or `Idle`) in place.
    pub async fn refresh_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<DashboardView, DashboardError> {
        let run = self.begin();
        debug!(generation = run.generation, "dashboard refresh started");

        match load_dashboard(Arc::clone(&self.api), self.policy, cancel).await {
            Ok(view) => {
                run.finish(Some(view.clone()));
                Ok(view)
            }
            Err(err) => {
                run.finish(None);
                Err(err)
            }
        }
    }

    fn begin(&self) -> InFlight<'_> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.generation += 1;
        inner.in_flight += 1;
        inner.state = DashboardState::Loading;
        InFlight {
            dashboard: self,
            generation: inner.generation,
            done: false,
        }
    }

    fn settle(&self, generation: u64, view: Option<DashboardView>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.in_flight = inner.in_flight.saturating_sub(1);

        let loaded = view.is_some();
        if let Some(view) = view
            && inner.settled.as_ref().is_none_or(|(g, _)| *g < generation)
        {
            inner.settled = Some((generation, view));
        }

        // Latest refresh succeeded, or nothing is left running.
        if (loaded && generation == inner.generation) || inner.in_flight == 0 {
            inner.state = inner.settled_state();
        }
    }
}
