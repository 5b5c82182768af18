//! Data models for the application.

mod ai;
mod pinterest;
mod post;
mod user;

pub use ai::{
    CaptionRequest, GeneratedCaption, GeneratedImage, ImageRequest, CAPTION_TONES,
    IMAGE_QUALITIES, IMAGE_SIZES, IMAGE_STYLES,
};
pub use pinterest::{
    Board, BoardList, CallbackResult, ConnectHandle, PinterestAccount, PinterestCredentials,
    PinterestMode,
    PublishOutcome, DEFAULT_REDIRECT_URI,
};
pub use post::{Post, PostInput, PostPatch, PostStatus};
#[cfg(feature = "server")]
pub use post::PostRow;
#[cfg(feature = "server")]
pub use user::User;
pub use user::{AuthResponse, UserInfo};
