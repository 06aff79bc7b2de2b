use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use storycast_core::types::Account;

use crate::error::{ClientError, Result};
use crate::session::SessionRecord;
use crate::traits::{StoryClient, StoryPlatform};

/// HTTP implementation of the story platform.
pub struct HttpPlatform {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPlatform {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    /// Bearer token for subsequent upload calls.
    token: String,
    /// Full session state to cache for the next login.
    session: serde_json::Value,
}

#[async_trait]
impl StoryPlatform for HttpPlatform {
    async fn login(
        &self,
        account: &Account,
        cached: Option<SessionRecord>,
    ) -> Result<(Box<dyn StoryClient>, SessionRecord)> {
        let url = format!("{}/v1/auth/login", self.base_url);
        let body = serde_json::json!({
            "username": account.username,
            "password": account.password,
            "session": cached.map(|c| c.0),
        });

        debug!(username = %account.username, "authenticating");
        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Auth {
                username: account.username.clone(),
                message,
            });
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %message, "login error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let login: LoginResponse = resp.json().await?;
        let client = HttpStoryClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: login.token,
        };
        Ok((Box::new(client), SessionRecord(login.session)))
    }
}

/// Authenticated upload handle returned by [`HttpPlatform::login`].
pub struct HttpStoryClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpStoryClient {
    async fn upload(&self, kind: &str, path: &Path, mime: &str) -> Result<()> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "story".to_string());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new().part("media", part);

        let url = format!("{}/v1/stories/{kind}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), path = %path.display(), "upload rejected");
            return Err(ClientError::Upload {
                status: status.as_u16(),
                message,
            });
        }

        debug!(path = %path.display(), kind, "story uploaded");
        Ok(())
    }
}

#[async_trait]
impl StoryClient for HttpStoryClient {
    async fn upload_photo_story(&self, path: &Path) -> Result<()> {
        self.upload("photo", path, image_mime(path)).await
    }

    async fn upload_video_story(&self, path: &Path) -> Result<()> {
        self.upload("video", path, "video/mp4").await
    }
}

/// MIME type from the file extension. Conversion upstream guarantees photo
/// uploads only ever see jpg/jpeg/png here.
fn image_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn mime_follows_extension_case_insensitively() {
        assert_eq!(image_mime(&PathBuf::from("a.PNG")), "image/png");
        assert_eq!(image_mime(&PathBuf::from("a.jpeg")), "image/jpeg");
        assert_eq!(image_mime(&PathBuf::from("a.jpg")), "image/jpeg");
        assert_eq!(image_mime(&PathBuf::from("a")), "application/octet-stream");
    }
}
