use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use board_model::{
    CoffeeBrand, CoffeeConsumption, CreatePostRequest, LoginRequest, LoginResponse, MockPosts,
    Post, PostId, PostPage, PostQuery, Session, UpdatePostRequest, WeeklyMood,
};

use crate::{api::BoardApi, config::ClientConfig, errors::ClientError};

/// HTTP client for the board backend.
///
/// The session is explicit state of the client: requests carry its bearer token when present,
/// and write operations refuse to run without one.
#[derive(Clone)]
pub struct BoardClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl BoardClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.parsed_base_url()?,
            session: Session::anonymous(),
        })
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `POST /auth/login`; returns the session for the issued token.
    ///
    /// The client itself is not modified: pass the session to [`BoardClient::with_session`].
    #[instrument(level = "debug", skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<Session, ClientError> {
        let rb = self.request(Method::POST, &["auth", "login"])?.json(request);
        let response: LoginResponse = self.send_json(rb).await?;
        if response.token.is_empty() {
            return Err(ClientError::InvalidResponse("login returned an empty token".into()));
        }
        debug!("login succeeded");
        Ok(Session::from_token(response.token))
    }

    /// `GET /posts`: the logged-in user's posts, cursor-paginated and filtered server-side.
    pub async fn get_posts(&self, query: &PostQuery) -> Result<PostPage, ClientError> {
        self.require_auth()?;
        let rb = self.request(Method::GET, &["posts"])?.query(query);
        self.send_json(rb).await
    }

    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, ClientError> {
        self.require_auth()?;
        let rb = self.request(Method::POST, &["posts"])?.json(request);
        self.send_json(rb).await
    }

    /// `PATCH /posts/{id}`
    pub async fn update_post(
        &self,
        id: &PostId,
        request: &UpdatePostRequest,
    ) -> Result<Post, ClientError> {
        self.require_auth()?;
        let rb = self.request(Method::PATCH, &["posts", id.as_str()])?.json(request);
        self.send_json(rb).await
    }

    pub async fn delete_post(&self, id: &PostId) -> Result<(), ClientError> {
        self.require_auth()?;
        let rb = self.request(Method::DELETE, &["posts", id.as_str()])?;
        self.send_empty(rb).await
    }

    /// `DELETE /posts`: removes every post of the logged-in user.
    pub async fn delete_all_posts(&self) -> Result<(), ClientError> {
        self.require_auth()?;
        let rb = self.request(Method::DELETE, &["posts"])?;
        self.send_empty(rb).await
    }

    fn require_auth(&self) -> Result<(), ClientError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::Unauthenticated)
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("base url '{}' cannot carry paths", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(segments)?;
        let rb = self.http.request(method, url);
        Ok(match self.session.token() {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        })
    }

    async fn send(&self, rb: RequestBuilder) -> Result<Response, ClientError> {
        let response = rb.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        warn!(%url, status = status.as_u16(), "backend rejected request");
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<R: DeserializeOwned>(&self, rb: RequestBuilder) -> Result<R, ClientError> {
        let response = self.send(rb).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ClientError::InvalidResponse(format!("failed to parse response: {e}, body: {body}"))
        })
    }

    async fn send_empty(&self, rb: RequestBuilder) -> Result<(), ClientError> {
        self.send(rb).await.map(|_| ())
    }
}

#[async_trait]
impl BoardApi for BoardClient {
    async fn top_coffee_brands(&self) -> Result<Vec<CoffeeBrand>, ClientError> {
        let rb = self.request(Method::GET, &["mock", "top-coffee-brands"])?;
        self.send_json(rb).await
    }

    async fn weekly_mood_trend(&self) -> Result<Vec<WeeklyMood>, ClientError> {
        let rb = self.request(Method::GET, &["mock", "weekly-mood-trend"])?;
        self.send_json(rb).await
    }

    async fn coffee_consumption(&self) -> Result<CoffeeConsumption, ClientError> {
        let rb = self.request(Method::GET, &["mock", "coffee-consumption"])?;
        self.send_json(rb).await
    }

    async fn mock_posts(&self, count: u32) -> Result<MockPosts, ClientError> {
        let rb = self
            .request(Method::GET, &["mock", "posts"])?
            .query(&[("count", count)]);
        self.send_json(rb).await
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, ClientError> {
        let rb = self.request(Method::GET, &["posts", id.as_str()])?;
        self.send_json(rb).await
    }
}
