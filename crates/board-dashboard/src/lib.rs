//! Dashboard composition on top of the partial-failure aggregator.
//!
//! The three chart datasets load concurrently; whatever arrived is shown even when some of them failed.

mod errors;
pub use errors::DashboardError;

mod dataset;
pub use dataset::{Dataset, DatasetKind};

mod view;
pub use view::{DashboardData, DashboardView, DatasetFailure};

mod load;
pub use load::load_dashboard;

mod state;
pub use state::{Dashboard, DashboardState};

pub mod charts;
