use std::path::Path;

use async_trait::async_trait;

use storycast_core::types::Account;

use crate::error::Result;
use crate::session::SessionRecord;

/// An authenticated handle that can publish stories.
#[async_trait]
pub trait StoryClient: Send + Sync {
    async fn upload_photo_story(&self, path: &Path) -> Result<()>;
    async fn upload_video_story(&self, path: &Path) -> Result<()>;
}

/// The login capability of the story platform.
///
/// `cached` is the session blob from a previous login, if one exists. The
/// platform may use it to skip parts of the handshake, but it always
/// (re-)authenticates with the supplied credentials and always returns the
/// session state to persist for next time.
#[async_trait]
pub trait StoryPlatform: Send + Sync {
    async fn login(
        &self,
        account: &Account,
        cached: Option<SessionRecord>,
    ) -> Result<(Box<dyn StoryClient>, SessionRecord)>;
}
