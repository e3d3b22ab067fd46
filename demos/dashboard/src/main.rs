use std::env;
use std::sync::Arc;

use tracing::{info, warn};

use board_client::{BoardApi, BoardClient, ClientConfig};
use board_core::{CancellationToken, FetchTask, RetryPolicy, retry_with_cancel};
use board_dashboard::Dashboard;
use board_model::{MOCK_POSTS_DEFAULT_COUNT, PostFilter, Session};
use board_observe::logger_init_from_env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    let log_cfg = logger_init_from_env()?;
    info!("logger initialized: format={:?}, level={}", log_cfg.format, log_cfg.level);

    // 2) Client
    let mut config = ClientConfig::default();
    if let Ok(url) = env::var("BOARD_API_URL") {
        config.base_url = url;
    }
    let mut client = BoardClient::new(&config)?;
    if let Ok(token) = env::var("BOARD_TOKEN") {
        client = client.with_session(Session::from_token(token));
    }
    info!(
        "client configured: base_url={}, authenticated={}",
        config.base_url,
        client.session().is_authenticated()
    );
    if let Some(user) = client.session().user_id() {
        info!("session user: {}", user);
    }

    // 3) Ctrl+C cancels whatever is in flight
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    // 4) Dashboard
    let api: Arc<dyn BoardApi> = Arc::new(client);
    let policy = RetryPolicy::default();
    let dashboard = Dashboard::new(Arc::clone(&api), policy);
    let view = dashboard.refresh_with_cancel(&cancel).await?;
    if let Some(warning) = view.warning() {
        warn!("{}", warning);
    }
    if let Some(data) = view.data() {
        for chart in data.charts() {
            info!("chart {:?}: {} series", chart.kind, chart.series.len());
        }
    }
    println!("{}", serde_json::to_string_pretty(&view)?);

    // 5) Public listing: first local page of mock posts
    let task = FetchTask::new("mock-posts", move || {
        let api = Arc::clone(&api);
        async move { api.mock_posts(MOCK_POSTS_DEFAULT_COUNT).await }
    });
    match retry_with_cancel(&task, &policy, &cancel).await {
        Ok(mock) => {
            let page = PostFilter::new().apply(&mock.items);
            info!("mock posts: {} total, page {}", page.total, page.page + 1);
            for post in &page.items {
                println!("[{}] {}", post.category, post.title);
            }
        }
        Err(err) => warn!("mock posts unavailable: {}", err),
    }

    Ok(())
}
