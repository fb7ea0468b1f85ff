//! The `leaderboard` command.

use std::collections::BTreeMap;

use tracing::warn;

use crate::effects::{DiscordEffect, DiscordInterpreter, DiscordResponse};
use crate::persistence::{StoreError, XpStore};
use crate::replies::{LEADERBOARD_SIZE, LeaderboardEntry};
use crate::types::{UserId, XpRecord};

/// Returns the top `limit` users by XP, highest first.
///
/// The sort is stable over the store's key order, so users with equal XP
/// always come out in the same order for the same store contents.
pub fn top_entries(records: &BTreeMap<UserId, XpRecord>, limit: usize) -> Vec<(UserId, u64)> {
    let mut entries: Vec<(UserId, u64)> = records
        .iter()
        .map(|(&user, record)| (user, record.xp))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(limit);
    entries
}

/// Builds the leaderboard, resolving each user ID to a name.
///
/// A user that can't be resolved is shown by ID.
pub async fn leaderboard<I: DiscordInterpreter>(
    store: &XpStore,
    interpreter: &I,
) -> Result<Vec<LeaderboardEntry>, StoreError> {
    let records = store.snapshot().await?;
    let mut entries = Vec::new();

    for (index, (user, xp)) in top_entries(&records, LEADERBOARD_SIZE)
        .into_iter()
        .enumerate()
    {
        entries.push(LeaderboardEntry {
            position: index + 1,
            display_name: display_name(interpreter, user).await,
            xp,
        });
    }

    Ok(entries)
}

async fn display_name<I: DiscordInterpreter>(interpreter: &I, user: UserId) -> String {
    match interpreter.interpret(DiscordEffect::FetchUser { user }).await {
        Ok(DiscordResponse::User(data)) => data.name,
        Ok(other) => {
            warn!(user = %user, response = ?other, "Unexpected response to user lookup");
            user.to_string()
        }
        Err(e) => {
            warn!(user = %user, error = %e, "Failed to fetch user");
            user.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockInterpreter, TestStores};
    use proptest::prelude::*;

    fn records(entries: &[(u64, u64)]) -> BTreeMap<UserId, XpRecord> {
        entries
            .iter()
            .map(|&(user, xp)| (UserId(user), XpRecord { xp }))
            .collect()
    }

    #[test]
    fn sorts_by_xp_descending_and_truncates() {
        let top = top_entries(
            &records(&[(1, 10), (2, 70), (3, 30), (4, 90), (5, 50), (6, 20)]),
            5,
        );
        let users: Vec<u64> = top.iter().map(|(u, _)| u.0).collect();
        assert_eq!(users, vec![4, 2, 5, 3, 6]);
    }

    #[test]
    fn ties_keep_key_order() {
        let top = top_entries(&records(&[(9, 40), (3, 40), (5, 40)]), 5);
        let users: Vec<u64> = top.iter().map(|(u, _)| u.0).collect();
        assert_eq!(users, vec![3, 5, 9]);
    }

    proptest! {
        #[test]
        fn top_entries_is_sorted_and_bounded(
            entries in prop::collection::btree_map(any::<u64>(), 0u64..10_000, 0..20),
            limit in 0usize..8,
        ) {
            let records: BTreeMap<UserId, XpRecord> = entries
                .iter()
                .map(|(&u, &xp)| (UserId(u), XpRecord { xp }))
                .collect();
            let top = top_entries(&records, limit);

            prop_assert_eq!(top.len(), records.len().min(limit));
            prop_assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        }
    }

    #[tokio::test]
    async fn resolves_names_and_positions() {
        let stores = TestStores::new();
        stores.xp.upsert(UserId(1), XpRecord { xp: 20 }).await.unwrap();
        stores.xp.upsert(UserId(2), XpRecord { xp: 80 }).await.unwrap();
        let interpreter = MockInterpreter::new()
            .with_user(UserId(1), "ana")
            .with_user(UserId(2), "ben");

        let board = leaderboard(&stores.xp, &interpreter).await.unwrap();

        assert_eq!(
            board,
            vec![
                LeaderboardEntry {
                    position: 1,
                    display_name: "ben".to_string(),
                    xp: 80,
                },
                LeaderboardEntry {
                    position: 2,
                    display_name: "ana".to_string(),
                    xp: 20,
                },
            ]
        );
    }

    #[tokio::test]
    async fn unresolvable_user_falls_back_to_id() {
        let stores = TestStores::new();
        stores.xp.upsert(UserId(77), XpRecord { xp: 20 }).await.unwrap();

        let board = leaderboard(&stores.xp, &MockInterpreter::new()).await.unwrap();

        assert_eq!(board[0].display_name, "77");
    }

    #[tokio::test]
    async fn repeated_calls_are_identical() {
        let stores = TestStores::new();
        for user in 1..=7u64 {
            stores
                .xp
                .upsert(UserId(user), XpRecord { xp: (user % 3) * 10 })
                .await
                .unwrap();
        }
        let interpreter = MockInterpreter::new();

        let first = leaderboard(&stores.xp, &interpreter).await.unwrap();
        let second = leaderboard(&stores.xp, &interpreter).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }
}
