//! Shared test fixtures: temporary stores and a recording mock interpreter.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;
use std::sync::Mutex;

use tempfile::TempDir;
use thiserror::Error;

use crate::effects::{DiscordEffect, DiscordInterpreter, DiscordResponse, RoleData, UserData};
use crate::handlers::Stores;
use crate::types::{GuildId, RoleId, UserId};

/// Stores backed by files in a temporary directory.
pub struct TestStores {
    stores: Stores,
    _dir: TempDir,
}

impl TestStores {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let stores = Stores::open(
            &dir.path().join("xp_data.json"),
            &dir.path().join("rank_roles.json"),
        )
        .unwrap();
        TestStores { stores, _dir: dir }
    }
}

impl Deref for TestStores {
    type Target = Stores;

    fn deref(&self) -> &Stores {
        &self.stores
    }
}

#[derive(Debug, Error)]
#[error("mock failure: {0}")]
pub struct MockError(pub String);

/// Interpreter that records every effect and answers from canned data.
#[derive(Default)]
pub struct MockInterpreter {
    guild_roles: BTreeMap<GuildId, Vec<RoleData>>,
    users: BTreeMap<UserId, String>,
    failing_roles: BTreeSet<RoleId>,
    fail_role_lookup: bool,
    fail_messages: bool,
    effects: Mutex<Vec<DiscordEffect>>,
}

impl MockInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `role` exist in `guild` with the given name.
    pub fn with_role(mut self, guild: GuildId, role: RoleId, name: &str) -> Self {
        self.guild_roles.entry(guild).or_default().push(RoleData {
            id: role,
            name: name.to_string(),
        });
        self
    }

    /// Makes `user` resolvable with the given name.
    pub fn with_user(mut self, user: UserId, name: &str) -> Self {
        self.users.insert(user, name.to_string());
        self
    }

    /// Makes grants and revokes of `role` fail.
    pub fn failing_role(mut self, role: RoleId) -> Self {
        self.failing_roles.insert(role);
        self
    }

    /// Makes `ListGuildRoles` fail.
    pub fn failing_role_lookup(mut self) -> Self {
        self.fail_role_lookup = true;
        self
    }

    /// Makes `SendMessage` fail.
    pub fn failing_messages(mut self) -> Self {
        self.fail_messages = true;
        self
    }

    /// All effects interpreted so far, in order.
    pub fn effects(&self) -> Vec<DiscordEffect> {
        self.effects.lock().unwrap().clone()
    }

    /// Contents of all `SendMessage` effects, in order.
    pub fn sent_messages(&self) -> Vec<String> {
        self.effects()
            .into_iter()
            .filter_map(|effect| match effect {
                DiscordEffect::SendMessage { content, .. } => Some(content),
                _ => None,
            })
            .collect()
    }

    fn respond(&self, effect: &DiscordEffect) -> Result<DiscordResponse, MockError> {
        match effect {
            DiscordEffect::SendMessage { .. } if self.fail_messages => {
                Err(MockError("send failed".to_string()))
            }
            DiscordEffect::SendMessage { .. } => Ok(DiscordResponse::Ok),
            DiscordEffect::AddRole { role, .. } | DiscordEffect::RemoveRole { role, .. } => {
                if self.failing_roles.contains(role) {
                    Err(MockError(format!("role {} change failed", role)))
                } else {
                    Ok(DiscordResponse::Ok)
                }
            }
            DiscordEffect::ListGuildRoles { .. } if self.fail_role_lookup => {
                Err(MockError("role lookup failed".to_string()))
            }
            DiscordEffect::ListGuildRoles { guild } => Ok(DiscordResponse::Roles(
                self.guild_roles.get(guild).cloned().unwrap_or_default(),
            )),
            DiscordEffect::FetchUser { user } => match self.users.get(user) {
                Some(name) => Ok(DiscordResponse::User(UserData {
                    id: *user,
                    name: name.clone(),
                })),
                None => Err(MockError(format!("unknown user {}", user))),
            },
        }
    }
}

impl DiscordInterpreter for MockInterpreter {
    type Error = MockError;

    async fn interpret(&self, effect: DiscordEffect) -> Result<DiscordResponse, Self::Error> {
        self.effects.lock().unwrap().push(effect.clone());
        self.respond(&effect)
    }
}
