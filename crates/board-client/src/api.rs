use async_trait::async_trait;
use board_model::{CoffeeBrand, CoffeeConsumption, MockPosts, Post, PostId, WeeklyMood};

use crate::errors::ClientError;

/// Read side of the board backend.
///
/// This trait abstracts the transport so callers can:
/// - Use the provided [`crate::BoardClient`] over HTTP
/// - Substitute fixtures or fault-injecting fakes in tests
#[async_trait]
pub trait BoardApi: Send + Sync + 'static {
    /// `GET /mock/top-coffee-brands`
    async fn top_coffee_brands(&self) -> Result<Vec<CoffeeBrand>, ClientError>;

    /// `GET /mock/weekly-mood-trend`
    async fn weekly_mood_trend(&self) -> Result<Vec<WeeklyMood>, ClientError>;

    /// `GET /mock/coffee-consumption`
    async fn coffee_consumption(&self) -> Result<CoffeeConsumption, ClientError>;

    /// `GET /mock/posts?count=N`
    async fn mock_posts(&self, count: u32) -> Result<MockPosts, ClientError>;

    /// `GET /posts/{id}`
    async fn get_post(&self, id: &PostId) -> Result<Post, ClientError>;
}
