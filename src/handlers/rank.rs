//! The `rank` command.

use crate::levels::LevelProgress;
use crate::persistence::{StoreError, XpStore};
use crate::types::UserId;

/// Returns `user`'s level and XP. Users with no record are at zero XP.
pub async fn rank(store: &XpStore, user: UserId) -> Result<LevelProgress, StoreError> {
    let xp = store.get(&user).await?.map(|record| record.xp).unwrap_or(0);
    Ok(LevelProgress::from_xp(xp))
}
