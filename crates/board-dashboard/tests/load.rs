use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use board_client::{BoardApi, ClientError};
use board_core::{CancellationToken, ErrorKind, RetryPolicy};
use board_dashboard::{
    Dashboard, DashboardError, DashboardState, DashboardView, DatasetKind, load_dashboard,
};
use board_model::{
    CoffeeBrand, CoffeeConsumption, CoffeeDataPoint, MockPosts, Post, PostId, TeamCoffee,
    WeeklyMood,
};

/// Backend double: each dataset fails its first `n` calls (`u32::MAX` = always).
#[derive(Default)]
struct FakeApi {
    brands_failures: u32,
    mood_failures: u32,
    consumption_failures: u32,
    delay_ms: u64,
    brands_calls: AtomicU32,
    mood_calls: AtomicU32,
    consumption_calls: AtomicU32,
}

impl FakeApi {
    async fn answer<T>(&self, calls: &AtomicU32, failures: u32, value: T) -> Result<T, ClientError> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        let n = calls.fetch_add(1, Ordering::SeqCst);
        if n < failures {
            Err(ClientError::Status {
                status: 503,
                body: "unavailable".into(),
            })
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl BoardApi for FakeApi {
    async fn top_coffee_brands(&self) -> Result<Vec<CoffeeBrand>, ClientError> {
        let value = vec![CoffeeBrand {
            brand: "Starbucks".into(),
            popularity: 40.0,
        }];
        self.answer(&self.brands_calls, self.brands_failures, value).await
    }

    async fn weekly_mood_trend(&self) -> Result<Vec<WeeklyMood>, ClientError> {
        let value = vec![WeeklyMood {
            week: "2024-W01".into(),
            happy: 50.0,
            tired: 30.0,
            stressed: 20.0,
        }];
        self.answer(&self.mood_calls, self.mood_failures, value).await
    }

    async fn coffee_consumption(&self) -> Result<CoffeeConsumption, ClientError> {
        let value = CoffeeConsumption {
            teams: vec![TeamCoffee {
                team: "Frontend".into(),
                series: vec![CoffeeDataPoint {
                    cups: 1,
                    bugs: 3.0,
                    productivity: 60.0,
                }],
            }],
        };
        self.answer(&self.consumption_calls, self.consumption_failures, value)
            .await
    }

    async fn mock_posts(&self, _count: u32) -> Result<MockPosts, ClientError> {
        Ok(MockPosts {
            items: Vec::new(),
            count: 0,
        })
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, ClientError> {
        Err(ClientError::Status {
            status: 404,
            body: format!("post {id} not found"),
        })
    }
}

fn policy() -> RetryPolicy {
    RetryPolicy::new(3, 100).unwrap()
}

#[tokio::test(start_paused = true)]
async fn all_datasets_loaded_is_ready() {
    let api = Arc::new(FakeApi::default());
    let view = load_dashboard(api, policy(), &CancellationToken::new())
        .await
        .unwrap();

    let DashboardView::Ready { data } = &view else {
        panic!("expected ready view, got {view:?}");
    };
    assert!(data.brands.is_some());
    assert!(data.mood_trend.is_some());
    assert!(data.consumption.is_some());
    assert_eq!(data.charts().len(), 5);
    assert!(view.warning().is_none());
}

#[tokio::test(start_paused = true)]
async fn transient_failures_recover_within_policy() {
    let api = Arc::new(FakeApi {
        mood_failures: 2,
        ..Default::default()
    });
    let view = load_dashboard(api.clone(), policy(), &CancellationToken::new())
        .await
        .unwrap();

    assert!(matches!(view, DashboardView::Ready { .. }));
    assert_eq!(api.mood_calls.load(Ordering::SeqCst), 3);
    assert_eq!(api.brands_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn one_failed_dataset_degrades_with_warning() {
    let api = Arc::new(FakeApi {
        consumption_failures: u32::MAX,
        ..Default::default()
    });
    let view = load_dashboard(api.clone(), policy(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(view.warning(), Some("1 of 3 datasets failed to load"));
    let data = view.data().unwrap();
    assert!(data.brands.is_some());
    assert!(data.consumption.is_none());

    let failures = view.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].dataset, DatasetKind::Consumption);
    assert!(failures[0].error.message.contains("503"));
    assert_eq!(api.consumption_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn nothing_loaded_is_a_single_blocking_error() {
    let api = Arc::new(FakeApi {
        brands_failures: u32::MAX,
        mood_failures: u32::MAX,
        consumption_failures: u32::MAX,
        ..Default::default()
    });
    let view = load_dashboard(api, policy(), &CancellationToken::new())
        .await
        .unwrap();

    let DashboardView::Failed { message, failures } = &view else {
        panic!("expected failed view, got {view:?}");
    };
    assert!(message.starts_with("failed to load the dashboard"));
    assert_eq!(failures.len(), 3);
    assert!(view.data().is_none());
}

#[tokio::test(start_paused = true)]
async fn refresh_reports_loading_until_settled() {
    let api = Arc::new(FakeApi {
        delay_ms: 200,
        ..Default::default()
    });
    let dashboard = Dashboard::new(api, policy());
    assert_eq!(dashboard.state(), DashboardState::Idle);

    let handle = tokio::spawn({
        let dashboard = dashboard.clone();
        async move { dashboard.refresh().await }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(dashboard.state(), DashboardState::Loading);

    let view = handle.await.unwrap().unwrap();
    assert_eq!(dashboard.state(), DashboardState::Loaded(view));
}

#[tokio::test(start_paused = true)]
async fn refresh_refetches_failed_datasets() {
    let api = Arc::new(FakeApi {
        brands_failures: 3,
        ..Default::default()
    });
    let dashboard = Dashboard::new(api.clone(), policy());

    let first = dashboard.refresh().await.unwrap();
    assert!(matches!(first, DashboardView::Degraded { .. }));

    let second = dashboard.refresh().await.unwrap();
    assert!(matches!(second, DashboardView::Ready { .. }));
    assert_eq!(api.brands_calls.load(Ordering::SeqCst), 4);
    assert_eq!(api.mood_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn cancelled_refresh_keeps_previous_state() {
    let api = Arc::new(FakeApi {
        delay_ms: 500,
        ..Default::default()
    });
    let dashboard = Dashboard::new(api, policy());

    let cancel = CancellationToken::new();
    let handle = tokio::spawn({
        let dashboard = dashboard.clone();
        let cancel = cancel.clone();
        async move { dashboard.refresh_with_cancel(&cancel).await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let err = handle.await.unwrap().unwrap_err();
    assert!(matches!(err, DashboardError::Cancelled));
    assert_eq!(dashboard.state(), DashboardState::Idle);
}

#[tokio::test(start_paused = true)]
async fn failures_carry_normalized_error_kind() {
    let api = Arc::new(FakeApi {
        brands_failures: u32::MAX,
        ..Default::default()
    });
    let view = load_dashboard(api, RetryPolicy::once(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(view.failures()[0].error.kind, ErrorKind::Failed);
}

#[tokio::test(start_paused = true)]
async fn cancelled_overlapping_refresh_keeps_the_newer_view() {
    let api = Arc::new(FakeApi {
        delay_ms: 200,
        ..Default::default()
    });
    let dashboard = Dashboard::new(api, policy());

    let first = tokio::spawn({
        let dashboard = dashboard.clone();
        async move { dashboard.refresh().await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;

    let cancel = CancellationToken::new();
    let second = tokio::spawn({
        let dashboard = dashboard.clone();
        let cancel = cancel.clone();
        async move { dashboard.refresh_with_cancel(&cancel).await }
    });

    // first settles at 200ms, second is still loading until 210ms
    tokio::time::sleep(Duration::from_millis(195)).await;
    let view = first.await.unwrap().unwrap();
    assert_eq!(dashboard.state(), DashboardState::Loading);

    cancel.cancel();
    let err = second.await.unwrap().unwrap_err();
    assert!(matches!(err, DashboardError::Cancelled));
    assert_eq!(dashboard.state(), DashboardState::Loaded(view));
}

#[tokio::test(start_paused = true)]
async fn dropped_refresh_does_not_leave_loading() {
    let api = Arc::new(FakeApi {
        delay_ms: 500,
        ..Default::default()
    });
    let dashboard = Dashboard::new(api, policy());

    let timed_out = tokio::time::timeout(Duration::from_millis(100), dashboard.refresh()).await;
    assert!(timed_out.is_err());
    assert_eq!(dashboard.state(), DashboardState::Idle);

    let view = dashboard.refresh().await.unwrap();
    assert_eq!(dashboard.state(), DashboardState::Loaded(view));
}
