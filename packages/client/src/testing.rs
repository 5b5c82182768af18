//! In-memory [`PinspireBackend`] used by the flow tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use api::models::{
    AuthResponse, Board, BoardList, CallbackResult, CaptionRequest, ConnectHandle,
    GeneratedCaption, GeneratedImage, ImageRequest, PinterestAccount, PinterestCredentials,
    PinterestMode, Post,
    PostInput, PostPatch, PostStatus, PublishOutcome, UserInfo,
};
use store::{MemoryStorage, SessionStore};

use crate::backend::{BackendResult, PinspireBackend};
use crate::error::BackendError;

pub fn user(name: &str) -> UserInfo {
    UserInfo {
        id: format!("id-{name}"),
        username: name.to_string(),
        email: format!("{name}@example.com"),
        pinterest_connected: false,
    }
}

pub fn post(id: &str, status: PostStatus) -> Post {
    Post {
        id: id.to_string(),
        caption: format!("caption {id}"),
        image_url: None,
        scheduled_time: None,
        status,
        boards: Vec::new(),
        ai_generated_caption: false,
        ai_generated_image: false,
        pinterest_post_id: None,
        created_at: "2026-10-01T12:00:00+00:00".to_string(),
        published_at: None,
    }
}

pub fn signed_in_session(name: &str) -> SessionStore<MemoryStorage> {
    let session = SessionStore::new(MemoryStorage::new());
    session.sign_in("token-1".to_string(), user(name));
    session
}

/// Records every call by endpoint name and answers from in-memory state.
#[derive(Default)]
pub struct FakeBackend {
    calls: RefCell<Vec<(String, String)>>,
    failures: RefCell<HashMap<&'static str, String>>,
    pub posts: RefCell<Vec<Post>>,
    pub mock_mode: Cell<bool>,
    pub connected: Cell<bool>,
    pub server_user: RefCell<Option<UserInfo>>,
    next_id: Cell<u32>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.mock_mode.set(true);
        backend
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        let backend = Self::new();
        *backend.posts.borrow_mut() = posts;
        backend
    }

    /// Make `endpoint` fail with `message` from now on.
    pub fn fail(&self, endpoint: &'static str, message: &str) {
        self.failures
            .borrow_mut()
            .insert(endpoint, message.to_string());
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|(name, _)| name == endpoint)
            .count()
    }

    /// Arguments of the calls to `endpoint`, in order.
    pub fn args_of(&self, endpoint: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|(name, _)| name == endpoint)
            .map(|(_, args)| args.clone())
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, endpoint: &'static str, args: impl Into<String>) -> BackendResult<()> {
        self.calls
            .borrow_mut()
            .push((endpoint.to_string(), args.into()));
        match self.failures.borrow().get(endpoint) {
            Some(message) => Err(BackendError::new(message)),
            None => Ok(()),
        }
    }

    fn issue(&self, user: UserInfo) -> AuthResponse {
        *self.server_user.borrow_mut() = Some(user.clone());
        AuthResponse {
            access_token: "token-1".to_string(),
            token_type: "bearer".to_string(),
            user,
        }
    }

    fn new_id(&self) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("post-{id}")
    }
}

impl PinspireBackend for FakeBackend {
    async fn login(&self, username: String, password: String) -> BackendResult<AuthResponse> {
        self.record("login", format!("{username}:{password}"))?;
        Ok(self.issue(user(&username)))
    }

    async fn signup(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> BackendResult<AuthResponse> {
        self.record("signup", format!("{username}:{email}:{password}"))?;
        let mut info = user(&username);
        info.email = email;
        Ok(self.issue(info))
    }

    async fn demo_login(&self) -> BackendResult<AuthResponse> {
        self.record("demo_login", "")?;
        Ok(self.issue(user("demo")))
    }

    async fn current_user(&self) -> BackendResult<Option<UserInfo>> {
        self.record("current_user", "")?;
        Ok(self.server_user.borrow().clone())
    }

    async fn logout(&self) -> BackendResult<()> {
        self.record("logout", "")?;
        *self.server_user.borrow_mut() = None;
        Ok(())
    }

    async fn update_profile(&self, username: String, email: String) -> BackendResult<UserInfo> {
        self.record("update_profile", format!("{username}:{email}"))?;
        let mut info = user(&username);
        info.email = email;
        info.pinterest_connected = self.connected.get();
        Ok(info)
    }

    async fn update_password(
        &self,
        current_password: String,
        new_password: String,
    ) -> BackendResult<()> {
        self.record("update_password", format!("{current_password}:{new_password}"))
    }

    async fn list_posts(&self) -> BackendResult<Vec<Post>> {
        self.record("list_posts", "")?;
        Ok(self.posts.borrow().clone())
    }

    async fn get_post(&self, id: String) -> BackendResult<Post> {
        self.record("get_post", id.clone())?;
        self.posts
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| BackendError::new("Post not found"))
    }

    async fn create_post(&self, input: PostInput) -> BackendResult<Post> {
        self.record("create_post", input.caption.clone())?;
        let mut created = post(&self.new_id(), PostStatus::for_schedule(input.scheduled_time.as_deref()));
        created.caption = input.caption;
        created.image_url = input.image_url;
        created.scheduled_time = input.scheduled_time;
        created.boards = input.boards;
        created.ai_generated_caption = input.ai_generated_caption;
        created.ai_generated_image = input.ai_generated_image;
        self.posts.borrow_mut().insert(0, created.clone());
        Ok(created)
    }

    async fn update_post(&self, id: String, patch: PostPatch) -> BackendResult<Post> {
        self.record("update_post", id.clone())?;
        let mut posts = self.posts.borrow_mut();
        let existing = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BackendError::new("Post not found"))?;
        if let Some(caption) = patch.caption {
            existing.caption = caption;
        }
        if let Some(url) = patch.image_url {
            existing.image_url = Some(url);
        }
        if let Some(boards) = patch.boards {
            existing.boards = boards;
        }
        if let Some(time) = patch.scheduled_time {
            existing.scheduled_time = Some(time);
        }
        Ok(existing.clone())
    }

    async fn delete_post(&self, id: String) -> BackendResult<()> {
        self.record("delete_post", id.clone())?;
        self.posts.borrow_mut().retain(|p| p.id != id);
        Ok(())
    }

    async fn generate_caption(&self, request: CaptionRequest) -> BackendResult<GeneratedCaption> {
        self.record("generate_caption", request.keywords.join("|"))?;
        Ok(GeneratedCaption {
            caption: format!("A {} caption about {}", request.tone, request.topic),
        })
    }

    async fn generate_image(&self, request: ImageRequest) -> BackendResult<GeneratedImage> {
        self.record(
            "generate_image",
            format!("{}:{}:{}", request.size, request.quality, request.style),
        )?;
        Ok(GeneratedImage {
            image_url: "https://images.example.com/generated.png".to_string(),
            prompt: request.prompt.clone(),
            revised_prompt: Some(format!("{}, in soft light", request.prompt)),
            note: None,
        })
    }

    async fn suggest_hashtags(&self, topic: String) -> BackendResult<Vec<String>> {
        self.record("suggest_hashtags", topic)?;
        Ok(vec!["#cozy".to_string(), "#homedecor".to_string()])
    }

    async fn pinterest_mode(&self) -> BackendResult<PinterestMode> {
        self.record("pinterest_mode", "")?;
        let is_mock = self.mock_mode.get();
        Ok(PinterestMode {
            is_mock,
            mode: if is_mock { "MOCK" } else { "REAL" }.to_string(),
            message: String::new(),
            app_id_configured: !is_mock,
            app_secret_configured: !is_mock,
        })
    }

    async fn pinterest_connect(&self) -> BackendResult<ConnectHandle> {
        self.record("pinterest_connect", "")?;
        let is_mock = self.mock_mode.get();
        Ok(ConnectHandle {
            auth_url: if is_mock {
                "/pinterest/mock-auth?state=state-1&mock=true".to_string()
            } else {
                "https://www.pinterest.com/oauth/?client_id=1&state=state-1".to_string()
            },
            state: "state-1".to_string(),
            is_mock,
        })
    }

    async fn pinterest_callback(&self, code: String, state: String) -> BackendResult<CallbackResult> {
        self.record("pinterest_callback", format!("{code}:{state}"))?;
        self.connected.set(true);
        Ok(CallbackResult {
            success: true,
            message: "Pinterest account connected successfully".to_string(),
            is_mock: self.mock_mode.get(),
        })
    }

    async fn pinterest_disconnect(&self) -> BackendResult<()> {
        self.record("pinterest_disconnect", "")?;
        self.connected.set(false);
        Ok(())
    }

    async fn pinterest_boards(&self) -> BackendResult<BoardList> {
        self.record("pinterest_boards", "")?;
        Ok(BoardList {
            boards: vec![Board {
                id: "mock_board_1".to_string(),
                name: "My Inspiration Board".to_string(),
                description: None,
                pin_count: 15,
                privacy: Some("PUBLIC".to_string()),
            }],
            is_mock: self.mock_mode.get(),
        })
    }

    async fn pinterest_account(&self) -> BackendResult<PinterestAccount> {
        self.record("pinterest_account", "")?;
        if !self.connected.get() {
            return Err(BackendError::new("Pinterest not connected"));
        }
        Ok(PinterestAccount {
            username: "mock_user".to_string(),
            is_mock: self.mock_mode.get(),
        })
    }

    async fn publish_post(&self, id: String, board_ids: Vec<String>) -> BackendResult<PublishOutcome> {
        self.record("publish_post", format!("{id}:{}", board_ids.join(",")))?;
        Ok(PublishOutcome {
            success: true,
            is_mock: self.mock_mode.get(),
            message: "Post published to Pinterest successfully".to_string(),
            pin_ids: board_ids.iter().map(|b| format!("pin-{b}")).collect(),
        })
    }

    async fn pinterest_credentials(&self) -> BackendResult<Option<PinterestCredentials>> {
        self.record("pinterest_credentials", "")?;
        Ok(None)
    }

    async fn save_pinterest_credentials(
        &self,
        app_id: String,
        app_secret: String,
        redirect_uri: String,
    ) -> BackendResult<PinterestCredentials> {
        self.record("save_pinterest_credentials", format!("{app_id}:{app_secret}"))?;
        self.connected.set(false);
        Ok(PinterestCredentials {
            app_id,
            redirect_uri,
            has_secret: true,
        })
    }

    async fn delete_pinterest_credentials(&self) -> BackendResult<()> {
        self.record("delete_pinterest_credentials", "")?;
        self.connected.set(false);
        Ok(())
    }
}
