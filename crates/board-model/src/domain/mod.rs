mod category;
pub use category::Category;

mod post;
pub use post::{CreatePostRequest, MockPosts, Post, PostId, UpdatePostRequest};

mod post_query;
pub use post_query::{PostPage, PostQuery, SortField, SortOrder};

mod post_filter;
pub use post_filter::{PostFilter, PostListPage};

mod draft;
pub use draft::{FORBIDDEN_WORDS, MAX_TAG_LEN, MAX_TAGS, PostDraft};

mod auth;
pub use auth::{LoginRequest, LoginResponse};

mod session;
pub use session::Session;

mod chart;
pub use chart::{CoffeeBrand, CoffeeConsumption, CoffeeDataPoint, TeamCoffee, WeeklyMood};

/// Default number of mock posts requested by the public listing.
pub const MOCK_POSTS_DEFAULT_COUNT: u32 = 300;
