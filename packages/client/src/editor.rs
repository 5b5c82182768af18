//! # Post editor flow
//!
//! [`PostEditor`] owns the form being edited and the id of the post it is
//! bound to. The id is set by [`PostEditor::load`] for an existing post, or
//! after the first successful create, so saving twice updates the same post
//! instead of creating a duplicate.
//!
//! | Operation | Requires | Request |
//! |-----------|----------|---------|
//! | [`generate_caption`](PostEditor::generate_caption) | topic | `POST /api/ai/generate-caption` |
//! | [`generate_image`](PostEditor::generate_image) | prompt | `POST /api/ai/generate-image` |
//! | [`suggest_hashtags`](PostEditor::suggest_hashtags) | topic | `POST /api/ai/suggest-hashtags` |
//! | [`save_draft`](PostEditor::save_draft) | caption | create or `PUT /api/posts/:id` |
//! | [`schedule`](PostEditor::schedule) | caption, schedule time | create or `PUT /api/posts/:id` |
//! | [`publish_to_pinterest`](PostEditor::publish_to_pinterest) | connection, caption, image, boards | save if new, then `POST /api/pinterest/post/:id` |

use api::models::{CaptionRequest, GeneratedImage, ImageRequest, Post, PostInput, PostPatch};
use store::{SessionStorage, SessionStore};

use crate::backend::PinspireBackend;
use crate::error::FlowError;
use crate::nav::{Destination, Transition, PUBLISH_REDIRECT_DELAY, SAVE_REDIRECT_DELAY};

/// Inputs of the caption generator.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionPrompt {
    pub topic: String,
    pub tone: String,
    /// Comma separated.
    pub keywords: String,
}

impl Default for CaptionPrompt {
    fn default() -> Self {
        Self {
            topic: String::new(),
            tone: "engaging".to_string(),
            keywords: String::new(),
        }
    }
}

impl CaptionPrompt {
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn to_request(&self) -> Result<CaptionRequest, FlowError> {
        if self.topic.trim().is_empty() {
            return Err(FlowError::validation(
                "Please enter a topic for caption generation",
            ));
        }
        Ok(CaptionRequest {
            topic: self.topic.clone(),
            tone: self.tone.clone(),
            keywords: self.keyword_list(),
        })
    }
}

/// Inputs of the image generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePrompt {
    pub prompt: String,
    pub size: String,
    pub quality: String,
    pub style: String,
}

impl Default for ImagePrompt {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
            style: "vivid".to_string(),
        }
    }
}

impl ImagePrompt {
    fn to_request(&self) -> Result<ImageRequest, FlowError> {
        if self.prompt.trim().is_empty() {
            return Err(FlowError::validation("Please enter an image prompt"));
        }
        Ok(ImageRequest {
            prompt: self.prompt.clone(),
            size: self.size.clone(),
            quality: self.quality.clone(),
            style: self.style.clone(),
        })
    }
}

/// The post fields being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostForm {
    pub caption: String,
    pub image_url: String,
    /// `YYYY-MM-DDTHH:MM`, empty when unscheduled.
    pub scheduled_time: String,
    pub boards: Vec<String>,
    pub ai_generated_caption: bool,
    pub ai_generated_image: bool,
}

impl PostForm {
    pub fn from_post(post: &Post) -> Self {
        Self {
            caption: post.caption.clone(),
            image_url: post.image_url.clone().unwrap_or_default(),
            scheduled_time: post.scheduled_time.clone().unwrap_or_default(),
            boards: post.boards.clone(),
            ai_generated_caption: post.ai_generated_caption,
            ai_generated_image: post.ai_generated_image,
        }
    }

    pub fn toggle_board(&mut self, board_id: &str) {
        if let Some(pos) = self.boards.iter().position(|b| b == board_id) {
            self.boards.remove(pos);
        } else {
            self.boards.push(board_id.to_string());
        }
    }

    /// Take a generated caption. Other fields are left as they are.
    pub fn apply_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
        self.ai_generated_caption = true;
    }

    /// Take a generated image. Other fields are left as they are.
    pub fn apply_image(&mut self, image_url: &str) {
        self.image_url = image_url.to_string();
        self.ai_generated_image = true;
    }

    /// Append hashtags not already in the caption.
    pub fn append_hashtags(&mut self, tags: &[String]) {
        let missing: Vec<&str> = tags
            .iter()
            .map(String::as_str)
            .filter(|tag| !self.caption.contains(tag))
            .collect();
        if missing.is_empty() {
            return;
        }
        if !self.caption.is_empty() {
            self.caption.push_str("\n\n");
        }
        self.caption.push_str(&missing.join(" "));
    }

    fn optional(value: &str) -> Option<String> {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn to_input(&self) -> PostInput {
        PostInput {
            caption: self.caption.clone(),
            image_url: Self::optional(&self.image_url),
            scheduled_time: Self::optional(&self.scheduled_time),
            boards: self.boards.clone(),
            ai_generated_caption: self.ai_generated_caption,
            ai_generated_image: self.ai_generated_image,
        }
    }

    fn to_patch(&self) -> PostPatch {
        PostPatch {
            caption: Some(self.caption.clone()),
            image_url: Some(self.image_url.trim().to_string()),
            boards: Some(self.boards.clone()),
            scheduled_time: Some(self.scheduled_time.trim().to_string()),
        }
    }

    fn require_caption(&self) -> Result<(), FlowError> {
        if self.caption.trim().is_empty() {
            return Err(FlowError::validation("Please add a caption"));
        }
        Ok(())
    }
}

/// A finished save or publish: what to tell the user and where to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub post_id: String,
    pub message: String,
    pub transition: Transition,
}

pub struct PostEditor<'a, B, S> {
    backend: &'a B,
    session: &'a SessionStore<S>,
    post_id: Option<String>,
    pub form: PostForm,
}

impl<'a, B: PinspireBackend, S: SessionStorage> PostEditor<'a, B, S> {
    /// An editor for a new post, or for `edit_id` once [`load`](Self::load) has run.
    pub fn new(backend: &'a B, session: &'a SessionStore<S>, edit_id: Option<String>) -> Self {
        Self {
            backend,
            session,
            post_id: edit_id,
            form: PostForm::default(),
        }
    }

    pub fn post_id(&self) -> Option<&str> {
        self.post_id.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.post_id.is_some()
    }

    pub async fn load(&mut self) -> Result<(), FlowError> {
        let Some(id) = self.post_id.clone() else {
            return Ok(());
        };
        let post = self
            .backend
            .get_post(id)
            .await
            .map_err(|e| FlowError::remote(e, "Failed to fetch post"))?;
        self.form = PostForm::from_post(&post);
        Ok(())
    }

    pub async fn generate_caption(&mut self, prompt: &CaptionPrompt) -> Result<String, FlowError> {
        let request = prompt.to_request()?;
        let generated = self
            .backend
            .generate_caption(request)
            .await
            .map_err(|e| FlowError::remote(e, "Failed to generate caption"))?;

        self.form.apply_caption(&generated.caption);
        Ok(generated.caption)
    }

    pub async fn generate_image(&mut self, prompt: &ImagePrompt) -> Result<GeneratedImage, FlowError> {
        let request = prompt.to_request()?;
        let image = self
            .backend
            .generate_image(request)
            .await
            .map_err(|e| FlowError::remote(e, "Failed to generate image"))?;

        self.form.apply_image(&image.image_url);
        Ok(image)
    }

    /// Suggest hashtags for the caption topic and append them to the caption.
    pub async fn suggest_hashtags(&mut self, prompt: &CaptionPrompt) -> Result<Vec<String>, FlowError> {
        let request = prompt.to_request()?;
        let tags = self
            .backend
            .suggest_hashtags(request.topic)
            .await
            .map_err(|e| FlowError::remote(e, "Failed to suggest hashtags"))?;

        self.form.append_hashtags(&tags);
        Ok(tags)
    }

    /// Create the post, or update the bound one. Returns the post id.
    async fn persist(&mut self) -> Result<String, crate::error::BackendError> {
        match self.post_id.clone() {
            Some(id) => {
                self.backend.update_post(id.clone(), self.form.to_patch()).await?;
                Ok(id)
            }
            None => {
                let post = self.backend.create_post(self.form.to_input()).await?;
                tracing::debug!(post = %post.id, "post created");
                self.post_id = Some(post.id.clone());
                Ok(post.id)
            }
        }
    }

    fn saved(post_id: String, message: &str, delay: std::time::Duration) -> Saved {
        Saved {
            post_id,
            message: message.to_string(),
            transition: Transition::after(Destination::Dashboard, delay),
        }
    }

    pub async fn save_draft(&mut self) -> Result<Saved, FlowError> {
        self.form.require_caption()?;

        let message = if self.is_editing() {
            "Post updated successfully!"
        } else {
            "Post saved as draft!"
        };
        let post_id = self
            .persist()
            .await
            .map_err(|e| FlowError::remote(e, "Failed to save post"))?;

        Ok(Self::saved(post_id, message, SAVE_REDIRECT_DELAY))
    }

    pub async fn schedule(&mut self) -> Result<Saved, FlowError> {
        self.form.require_caption()?;
        if self.form.scheduled_time.trim().is_empty() {
            return Err(FlowError::validation("Please select a schedule time"));
        }

        let post_id = self
            .persist()
            .await
            .map_err(|e| FlowError::remote(e, "Failed to schedule post"))?;

        Ok(Self::saved(
            post_id,
            "Post scheduled successfully!",
            SAVE_REDIRECT_DELAY,
        ))
    }

    /// Publish to `board_ids`, saving the post first if it has never been saved.
    pub async fn publish_to_pinterest(&mut self, board_ids: &[String]) -> Result<Saved, FlowError> {
        if !self.session.pinterest_connected() {
            return Err(FlowError::validation(
                "Please connect your Pinterest account first from the Dashboard",
            ));
        }
        self.form.require_caption()?;
        if self.form.image_url.trim().is_empty() {
            return Err(FlowError::validation(
                "Please add an image URL to post to Pinterest",
            ));
        }
        if board_ids.is_empty() {
            return Err(FlowError::validation("Please select at least one board"));
        }

        let fallback = "Failed to post to Pinterest";
        let post_id = match self.post_id.clone() {
            Some(id) => id,
            None => self
                .persist()
                .await
                .map_err(|e| FlowError::remote(e, fallback))?,
        };

        let outcome = self
            .backend
            .publish_post(post_id.clone(), board_ids.to_vec())
            .await
            .map_err(|e| FlowError::remote(e, fallback))?;

        if !outcome.success {
            return Err(FlowError::Remote(fallback.to_string()));
        }

        let message = if outcome.is_mock {
            "Posted to Pinterest successfully! (Mock Mode)"
        } else {
            "Posted to Pinterest successfully!"
        };
        Ok(Self::saved(post_id, message, PUBLISH_REDIRECT_DELAY))
    }
}
