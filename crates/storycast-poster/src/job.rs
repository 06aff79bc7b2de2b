use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use storycast_client::{login_with_cache, SessionStore, StoryClient, StoryPlatform};
use storycast_core::config::UPLOAD_PACING_SECS;
use storycast_core::telemetry;
use storycast_core::types::{Account, DayConfig, Weekday};
use storycast_logs::{AttemptStatus, LogStore};

use crate::error::{PosterError, Result};
use crate::marker::MarkerStore;
use crate::{convert, media};

/// The posting workflow for one weekday.
///
/// Holds the accounts/config snapshot captured when the scheduler was
/// started — panel edits after that point do not reach a constructed job.
pub struct PostJob {
    accounts: Vec<Account>,
    config: BTreeMap<Weekday, DayConfig>,
    platform: Arc<dyn StoryPlatform>,
    sessions: SessionStore,
    markers: MarkerStore,
    logs: Arc<LogStore>,
}

impl PostJob {
    pub fn new(
        accounts: Vec<Account>,
        config: BTreeMap<Weekday, DayConfig>,
        platform: Arc<dyn StoryPlatform>,
        sessions: SessionStore,
        markers: MarkerStore,
        logs: Arc<LogStore>,
    ) -> Self {
        Self {
            accounts,
            config,
            platform,
            sessions,
            markers,
            logs,
        }
    }

    /// Run the posting pass for `day`.
    ///
    /// Accounts are processed strictly in list order, one file at a time,
    /// with a fixed pause after every upload attempt. Only infrastructure
    /// failures (log table, marker file) escape; everything per-file is
    /// downgraded to a FAIL row.
    pub async fn run(&self, day: Weekday) -> Result<()> {
        let Some(cfg) = self.config.get(&day) else {
            debug!(%day, "no config for day, nothing to post");
            return Ok(());
        };

        for account in &self.accounts {
            telemetry::tag("account", &account.username);
            telemetry::tag("day", &day.to_string());

            if self.markers.posted(day, &account.username) {
                debug!(username = %account.username, %day, "already posted, skipping");
                continue;
            }
            if !cfg.folder.exists() {
                debug!(folder = %cfg.folder.display(), "folder missing, skipping account");
                continue;
            }
            let files = media::scan_media(&cfg.folder)?;
            if files.is_empty() {
                debug!(folder = %cfg.folder.display(), "no eligible media, skipping account");
                continue;
            }

            // Login failure aborts this account for the day: no rows, no
            // marker, so the next weekly trigger gets a fresh attempt.
            let client = match login_with_cache(self.platform.as_ref(), &self.sessions, account).await
            {
                Ok(client) => client,
                Err(e) => {
                    error!(username = %account.username, %day, "login failed, skipping account: {e}");
                    telemetry::report(&e);
                    continue;
                }
            };

            for file in &files {
                match self.post_one(client.as_ref(), file).await {
                    Ok(uploaded) => {
                        self.logs.append(
                            &account.username,
                            day,
                            &uploaded,
                            AttemptStatus::Success,
                            "",
                        )?;
                    }
                    Err((attempted, e)) => {
                        error!(path = %attempted.display(), "upload failed: {e}");
                        telemetry::report(&e);
                        self.logs.append(
                            &account.username,
                            day,
                            &attempted,
                            AttemptStatus::Fail,
                            &e.to_string(),
                        )?;
                    }
                }
                // Fixed pacing against the platform's abuse detection.
                tokio::time::sleep(Duration::from_secs(UPLOAD_PACING_SECS)).await;
            }

            // Set even when individual uploads failed: a completed pass is
            // "posted" for the rest of the day.
            self.markers.mark(day, &account.username)?;
            info!(username = %account.username, %day, files = files.len(), "posting pass complete");
        }
        Ok(())
    }

    /// Upload one file, converting webp first. Returns the path that was
    /// actually uploaded (the converted one for webp) so the log row shows
    /// what went over the wire.
    async fn post_one(
        &self,
        client: &dyn StoryClient,
        file: &Path,
    ) -> std::result::Result<PathBuf, (PathBuf, PosterError)> {
        let ext = file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let (upload_path, ext) = if ext == "webp" {
            match convert::webp_to_jpeg(file) {
                Ok(jpeg) => (jpeg, "jpg".to_string()),
                Err(e) => return Err((file.to_path_buf(), e)),
            }
        } else {
            (file.to_path_buf(), ext)
        };

        let result = if ext == "mp4" {
            client.upload_video_story(&upload_path).await
        } else {
            client.upload_photo_story(&upload_path).await
        };

        match result {
            Ok(()) => Ok(upload_path),
            Err(e) => Err((upload_path, e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use storycast_client::error::ClientError;
    use storycast_client::SessionRecord;
    use storycast_core::types::PostTime;

    /// Shared record of (kind, file name) uploads across mock clients.
    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(String, String)>>>);

    impl Recorder {
        fn names(&self) -> Vec<String> {
            self.0.lock().unwrap().iter().map(|(_, n)| n.clone()).collect()
        }
        fn kinds(&self) -> Vec<(String, String)> {
            self.0.lock().unwrap().clone()
        }
    }

    struct MockClient {
        rec: Recorder,
        fail_names: Vec<String>,
    }

    impl MockClient {
        fn attempt(&self, kind: &str, path: &Path) -> storycast_client::Result<()> {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            if self.fail_names.contains(&name) {
                return Err(ClientError::Upload {
                    status: 500,
                    message: "simulated platform failure".to_string(),
                });
            }
            self.rec.0.lock().unwrap().push((kind.to_string(), name));
            Ok(())
        }
    }

    #[async_trait]
    impl StoryClient for MockClient {
        async fn upload_photo_story(&self, path: &Path) -> storycast_client::Result<()> {
            self.attempt("photo", path)
        }
        async fn upload_video_story(&self, path: &Path) -> storycast_client::Result<()> {
            self.attempt("video", path)
        }
    }

    struct MockPlatform {
        rec: Recorder,
        fail_names: Vec<String>,
        reject_users: Vec<String>,
        logins: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl StoryPlatform for MockPlatform {
        async fn login(
            &self,
            account: &Account,
            _cached: Option<SessionRecord>,
        ) -> storycast_client::Result<(Box<dyn StoryClient>, SessionRecord)> {
            self.logins.lock().unwrap().push(account.username.clone());
            if self.reject_users.contains(&account.username) {
                return Err(ClientError::Auth {
                    username: account.username.clone(),
                    message: "bad password".to_string(),
                });
            }
            let client = MockClient {
                rec: self.rec.clone(),
                fail_names: self.fail_names.clone(),
            };
            Ok((Box::new(client), SessionRecord(json!({"token": "t"}))))
        }
    }

    struct Fixture {
        job: PostJob,
        rec: Recorder,
        logins: Arc<Mutex<Vec<String>>>,
        logs: Arc<LogStore>,
        // held for their Drop
        _media: tempfile::TempDir,
        state: tempfile::TempDir,
    }

    const DAY: Weekday = Weekday::Monday;

    fn fixture(
        files: &[&str],
        accounts: &[&str],
        fail_names: &[&str],
        reject_users: &[&str],
    ) -> Fixture {
        let media_dir = tempfile::tempdir().expect("media dir");
        for name in files {
            std::fs::write(media_dir.path().join(name), b"media bytes").expect("write");
        }
        let state = tempfile::tempdir().expect("state dir");

        let rec = Recorder::default();
        let logins = Arc::new(Mutex::new(Vec::new()));
        let platform = Arc::new(MockPlatform {
            rec: rec.clone(),
            fail_names: fail_names.iter().map(|s| s.to_string()).collect(),
            reject_users: reject_users.iter().map(|s| s.to_string()).collect(),
            logins: logins.clone(),
        });

        let logs = Arc::new(
            LogStore::new(rusqlite::Connection::open_in_memory().expect("sqlite"))
                .expect("log store"),
        );
        let mut config = BTreeMap::new();
        config.insert(
            DAY,
            DayConfig {
                day: DAY,
                folder: media_dir.path().to_path_buf(),
                time: PostTime::new(9, 0).unwrap(),
            },
        );

        let job = PostJob::new(
            accounts
                .iter()
                .map(|u| Account::new(*u, "pw").unwrap())
                .collect(),
            config,
            platform,
            SessionStore::new(state.path().join("sessions")).expect("sessions"),
            MarkerStore::new(state.path().join("markers")).expect("markers"),
            logs.clone(),
        );

        Fixture {
            job,
            rec,
            logins,
            logs,
            _media: media_dir,
            state,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn uploads_in_natural_order_and_sets_marker() {
        let fx = fixture(&["b.jpg", "a2.jpg", "a10.jpg"], &["alice"], &[], &[]);

        fx.job.run(DAY).await.expect("run");

        assert_eq!(fx.rec.names(), vec!["a2.jpg", "a10.jpg", "b.jpg"]);
        let rows = fx.logs.recent(100).expect("rows");
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.status == AttemptStatus::Success));
        assert!(fx
            .state
            .path()
            .join("markers/posted_monday_alice.txt")
            .exists());
    }

    #[tokio::test(start_paused = true)]
    async fn second_run_is_idempotent() {
        let fx = fixture(&["img1.png"], &["alice"], &[], &[]);

        fx.job.run(DAY).await.expect("first run");
        let after_first = fx.logs.recent(100).expect("rows").len();
        fx.job.run(DAY).await.expect("second run");

        assert_eq!(fx.logs.recent(100).expect("rows").len(), after_first);
        // the marker short-circuits before login
        assert_eq!(fx.logins.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn one_bad_file_does_not_block_the_batch() {
        let fx = fixture(
            &["img1.jpg", "img2.jpg", "img3.jpg"],
            &["alice"],
            &["img2.jpg"],
            &[],
        );

        fx.job.run(DAY).await.expect("run");

        let rows = fx.logs.recent(100).expect("rows");
        let failures: Vec<_> = rows
            .iter()
            .filter(|r| r.status == AttemptStatus::Fail)
            .collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].file_path.ends_with("img2.jpg"));
        assert!(failures[0].msg.contains("simulated platform failure"));
        // a pass with failures still counts as posted
        assert!(fx
            .state
            .path()
            .join("markers/posted_monday_alice.txt")
            .exists());
    }

    #[tokio::test(start_paused = true)]
    async fn auth_failure_aborts_only_that_account() {
        let fx = fixture(&["img1.jpg"], &["alice", "bob"], &[], &["alice"]);

        fx.job.run(DAY).await.expect("run");

        let rows = fx.logs.recent(100).expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "bob");
        assert!(!fx
            .state
            .path()
            .join("markers/posted_monday_alice.txt")
            .exists());
        assert!(fx
            .state
            .path()
            .join("markers/posted_monday_bob.txt")
            .exists());
        assert_eq!(*fx.logins.lock().unwrap(), vec!["alice", "bob"]);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_folder_is_quietly_skipped() {
        let mut fx = fixture(&[], &["alice"], &[], &[]);
        // point the day at a folder that does not exist
        let gone = fx.state.path().join("vanished");
        fx.job.config.get_mut(&DAY).unwrap().folder = gone;

        fx.job.run(DAY).await.expect("run");

        assert!(fx.logs.recent(100).expect("rows").is_empty());
        assert!(fx.logins.lock().unwrap().is_empty());
        assert!(!fx
            .state
            .path()
            .join("markers/posted_monday_alice.txt")
            .exists());
    }

    #[tokio::test(start_paused = true)]
    async fn folder_without_media_skips_before_login() {
        let fx = fixture(&["notes.txt", "readme.md"], &["alice"], &[], &[]);

        fx.job.run(DAY).await.expect("run");

        assert!(fx.logs.recent(100).expect("rows").is_empty());
        assert!(fx.logins.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn mp4_goes_to_the_video_endpoint() {
        let fx = fixture(&["clip.mp4", "pic.png"], &["alice"], &[], &[]);

        fx.job.run(DAY).await.expect("run");

        assert_eq!(
            fx.rec.kinds(),
            vec![
                ("video".to_string(), "clip.mp4".to_string()),
                ("photo".to_string(), "pic.png".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn login_persists_the_session_blob() {
        let fx = fixture(&["img1.jpg"], &["alice"], &[], &[]);

        fx.job.run(DAY).await.expect("run");

        assert!(fx.state.path().join("sessions/alice.json").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn unconfigured_day_is_a_no_op() {
        let fx = fixture(&["img1.jpg"], &["alice"], &[], &[]);

        fx.job.run(Weekday::Sunday).await.expect("run");

        assert!(fx.logs.recent(100).expect("rows").is_empty());
        assert!(fx.logins.lock().unwrap().is_empty());
    }
}
