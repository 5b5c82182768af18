//! # Backend seam
//!
//! Every flow talks to the Pinspire API through [`PinspireBackend`], an async
//! trait with one method per endpoint. [`ServerBackend`] forwards to the
//! server functions in the `api` crate; tests substitute an in-memory fake.

use std::future::Future;

use api::models::{
    AuthResponse, BoardList, CallbackResult, CaptionRequest, ConnectHandle, GeneratedCaption,
    GeneratedImage, ImageRequest, PinterestAccount, PinterestCredentials, PinterestMode, Post, PostInput, PostPatch,
    PublishOutcome, UserInfo,
};

use crate::error::BackendError;

pub type BackendResult<T> = Result<T, BackendError>;

/// The Pinspire REST API as seen by the client flows.
pub trait PinspireBackend {
    fn login(
        &self,
        username: String,
        password: String,
    ) -> impl Future<Output = BackendResult<AuthResponse>>;
    fn signup(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> impl Future<Output = BackendResult<AuthResponse>>;
    fn demo_login(&self) -> impl Future<Output = BackendResult<AuthResponse>>;
    fn current_user(&self) -> impl Future<Output = BackendResult<Option<UserInfo>>>;
    fn logout(&self) -> impl Future<Output = BackendResult<()>>;
    fn update_profile(
        &self,
        username: String,
        email: String,
    ) -> impl Future<Output = BackendResult<UserInfo>>;
    fn update_password(
        &self,
        current_password: String,
        new_password: String,
    ) -> impl Future<Output = BackendResult<()>>;

    fn list_posts(&self) -> impl Future<Output = BackendResult<Vec<Post>>>;
    fn get_post(&self, id: String) -> impl Future<Output = BackendResult<Post>>;
    fn create_post(&self, input: PostInput) -> impl Future<Output = BackendResult<Post>>;
    fn update_post(
        &self,
        id: String,
        patch: PostPatch,
    ) -> impl Future<Output = BackendResult<Post>>;
    fn delete_post(&self, id: String) -> impl Future<Output = BackendResult<()>>;

    fn generate_caption(
        &self,
        request: CaptionRequest,
    ) -> impl Future<Output = BackendResult<GeneratedCaption>>;
    fn generate_image(
        &self,
        request: ImageRequest,
    ) -> impl Future<Output = BackendResult<GeneratedImage>>;
    fn suggest_hashtags(&self, topic: String) -> impl Future<Output = BackendResult<Vec<String>>>;

    fn pinterest_mode(&self) -> impl Future<Output = BackendResult<PinterestMode>>;
    fn pinterest_connect(&self) -> impl Future<Output = BackendResult<ConnectHandle>>;
    fn pinterest_callback(
        &self,
        code: String,
        state: String,
    ) -> impl Future<Output = BackendResult<CallbackResult>>;
    fn pinterest_disconnect(&self) -> impl Future<Output = BackendResult<()>>;
    fn pinterest_boards(&self) -> impl Future<Output = BackendResult<BoardList>>;
    fn pinterest_account(&self) -> impl Future<Output = BackendResult<PinterestAccount>>;
    fn publish_post(
        &self,
        id: String,
        board_ids: Vec<String>,
    ) -> impl Future<Output = BackendResult<PublishOutcome>>;

    fn pinterest_credentials(
        &self,
    ) -> impl Future<Output = BackendResult<Option<PinterestCredentials>>>;
    fn save_pinterest_credentials(
        &self,
        app_id: String,
        app_secret: String,
        redirect_uri: String,
    ) -> impl Future<Output = BackendResult<PinterestCredentials>>;
    fn delete_pinterest_credentials(&self) -> impl Future<Output = BackendResult<()>>;
}

/// Calls the `api` server functions over HTTP.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerBackend;

fn remote<T, E: std::fmt::Display>(result: Result<T, E>) -> BackendResult<T> {
    result.map_err(BackendError::new)
}

impl PinspireBackend for ServerBackend {
    async fn login(&self, username: String, password: String) -> BackendResult<AuthResponse> {
        remote(api::login(username, password).await)
    }

    async fn signup(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> BackendResult<AuthResponse> {
        remote(api::signup(username, email, password).await)
    }

    async fn demo_login(&self) -> BackendResult<AuthResponse> {
        remote(api::demo_login().await)
    }

    async fn current_user(&self) -> BackendResult<Option<UserInfo>> {
        remote(api::get_current_user().await)
    }

    async fn logout(&self) -> BackendResult<()> {
        remote(api::logout().await)
    }

    async fn update_profile(&self, username: String, email: String) -> BackendResult<UserInfo> {
        remote(api::update_profile(username, email).await)
    }

    async fn update_password(
        &self,
        current_password: String,
        new_password: String,
    ) -> BackendResult<()> {
        remote(api::update_password(current_password, new_password).await)
    }

    async fn list_posts(&self) -> BackendResult<Vec<Post>> {
        remote(api::list_posts().await)
    }

    async fn get_post(&self, id: String) -> BackendResult<Post> {
        remote(api::get_post(id).await)
    }

    async fn create_post(&self, input: PostInput) -> BackendResult<Post> {
        remote(api::create_post(input).await)
    }

    async fn update_post(&self, id: String, patch: PostPatch) -> BackendResult<Post> {
        remote(api::update_post(id, patch).await)
    }

    async fn delete_post(&self, id: String) -> BackendResult<()> {
        remote(api::delete_post(id).await)
    }

    async fn generate_caption(&self, request: CaptionRequest) -> BackendResult<GeneratedCaption> {
        remote(api::generate_caption(request).await)
    }

    async fn generate_image(&self, request: ImageRequest) -> BackendResult<GeneratedImage> {
        remote(api::generate_image(request).await)
    }

    async fn suggest_hashtags(&self, topic: String) -> BackendResult<Vec<String>> {
        remote(api::suggest_hashtags(topic).await)
    }

    async fn pinterest_mode(&self) -> BackendResult<PinterestMode> {
        remote(api::pinterest_mode().await)
    }

    async fn pinterest_connect(&self) -> BackendResult<ConnectHandle> {
        remote(api::pinterest_connect().await)
    }

    async fn pinterest_callback(&self, code: String, state: String) -> BackendResult<CallbackResult> {
        remote(api::pinterest_callback(code, state).await)
    }

    async fn pinterest_disconnect(&self) -> BackendResult<()> {
        remote(api::pinterest_disconnect().await)
    }

    async fn pinterest_boards(&self) -> BackendResult<BoardList> {
        remote(api::pinterest_boards().await)
    }

    async fn pinterest_account(&self) -> BackendResult<PinterestAccount> {
        remote(api::pinterest_account().await)
    }

    async fn publish_post(&self, id: String, board_ids: Vec<String>) -> BackendResult<PublishOutcome> {
        remote(api::publish_post(id, board_ids).await)
    }

    async fn pinterest_credentials(&self) -> BackendResult<Option<PinterestCredentials>> {
        remote(api::get_pinterest_credentials().await)
    }

    async fn save_pinterest_credentials(
        &self,
        app_id: String,
        app_secret: String,
        redirect_uri: String,
    ) -> BackendResult<PinterestCredentials> {
        remote(api::save_pinterest_credentials(app_id, app_secret, redirect_uri).await)
    }

    async fn delete_pinterest_credentials(&self) -> BackendResult<()> {
        remote(api::delete_pinterest_credentials().await)
    }
}
