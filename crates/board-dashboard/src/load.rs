use std::sync::Arc;

use board_client::BoardApi;
use board_core::{CancellationToken, RetryPolicy, aggregate_with_cancel};
use tracing::{info, instrument, warn};

use crate::{dataset::DatasetKind, errors::DashboardError, view::DashboardView};

/// Load every dashboard dataset concurrently and settle on a view.
///
/// Each dataset is retried under `policy` on its own. Failed datasets shape the view
/// (degraded or failed); only a cancelled or broken batch is an error.
#[instrument(level = "debug", skip_all)]
pub async fn load_dashboard(
    api: Arc<dyn BoardApi>,
    policy: RetryPolicy,
    cancel: &CancellationToken,
) -> Result<DashboardView, DashboardError> {
    let kinds = DatasetKind::ALL;
    let tasks = kinds
        .iter()
        .map(|kind| kind.task(Arc::clone(&api)))
        .collect();

    let result = aggregate_with_cancel(tasks, policy, cancel).await?;
    let view = DashboardView::from_result(&kinds, result);

    match &view {
        DashboardView::Ready { .. } => info!("dashboard loaded"),
        DashboardView::Degraded { warning, .. } => warn!(%warning, "dashboard loaded partially"),
        DashboardView::Failed { message, .. } => warn!(%message, "dashboard failed to load"),
    }
    Ok(view)
}
