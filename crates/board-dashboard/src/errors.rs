use board_core::CoreError;
use thiserror::Error;

/// A dashboard load that produced no view at all.
///
/// Failed datasets are not errors: they end up in [`crate::DashboardView`].
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dashboard load cancelled")]
    Cancelled,

    #[error("dashboard load failed: {0}")]
    Core(CoreError),
}

impl From<CoreError> for DashboardError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Cancelled => DashboardError::Cancelled,
            other => DashboardError::Core(other),
        }
    }
}
