use storycast_core::types::Account;
use tracing::info;

use crate::error::Result;
use crate::session::SessionStore;
use crate::traits::{StoryClient, StoryPlatform};

/// Authenticate `account` against the platform, reusing any cached session.
///
/// The contract, in order:
/// 1. load the cached session blob for the username if one exists;
/// 2. always authenticate with the supplied credentials (the platform
///    decides how much of the cached state is still usable);
/// 3. persist the returned session blob before handing the client back.
///
/// Auth failures propagate to the caller — the posting job treats them as
/// an abort for that account's run.
pub async fn login_with_cache(
    platform: &dyn StoryPlatform,
    store: &SessionStore,
    account: &Account,
) -> Result<Box<dyn StoryClient>> {
    let cached = store.load(&account.username)?;
    let had_cache = cached.is_some();

    let (client, session) = platform.login(account, cached).await?;
    store.save(&account.username, &session)?;

    info!(username = %account.username, reused_session = had_cache, "logged in");
    Ok(client)
}
