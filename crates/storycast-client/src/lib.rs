//! `storycast-client` — the seam around the story platform.
//!
//! The rest of the system only sees two traits: [`StoryPlatform`] (login)
//! and [`StoryClient`] (story uploads). The HTTP implementation talks to a
//! configurable base URL; tests substitute mocks at the same seam.
//!
//! Session blobs are opaque to this crate's callers: [`SessionStore`]
//! persists one JSON file per username so a later login can hand the cached
//! state back to the platform.

pub mod error;
pub mod http;
pub mod login;
pub mod session;
pub mod traits;

pub use error::{ClientError, Result};
pub use http::HttpPlatform;
pub use login::login_with_cache;
pub use session::{SessionRecord, SessionStore};
pub use traits::{StoryClient, StoryPlatform};
