use std::fmt;
use std::sync::Arc;

use board_client::BoardApi;
use board_core::FetchTask;
use board_model::{CoffeeBrand, CoffeeConsumption, WeeklyMood};
use serde::{Deserialize, Serialize};

/// The datasets a dashboard is built from, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatasetKind {
    Brands,
    MoodTrend,
    Consumption,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Brands,
        DatasetKind::MoodTrend,
        DatasetKind::Consumption,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DatasetKind::Brands => "top-coffee-brands",
            DatasetKind::MoodTrend => "weekly-mood-trend",
            DatasetKind::Consumption => "coffee-consumption",
        }
    }

    /// Fetch task reading this dataset from `api`.
    pub fn task(self, api: Arc<dyn BoardApi>) -> FetchTask<Dataset> {
        FetchTask::new(self.id(), move || {
            let api = Arc::clone(&api);
            async move {
                match self {
                    DatasetKind::Brands => api.top_coffee_brands().await.map(Dataset::Brands),
                    DatasetKind::MoodTrend => api.weekly_mood_trend().await.map(Dataset::MoodTrend),
                    DatasetKind::Consumption => {
                        api.coffee_consumption().await.map(Dataset::Consumption)
                    }
                }
            }
        })
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Payload of one dashboard slot; a batch mixes all three.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Brands(Vec<CoffeeBrand>),
    MoodTrend(Vec<WeeklyMood>),
    Consumption(CoffeeConsumption),
}

impl Dataset {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Brands(_) => DatasetKind::Brands,
            Dataset::MoodTrend(_) => DatasetKind::MoodTrend,
            Dataset::Consumption(_) => DatasetKind::Consumption,
        }
    }
}
