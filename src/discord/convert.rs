//! Conversions between serenity IDs and the crate's ID newtypes.

use serenity::model::id as sid;

use crate::types::{ChannelId, GuildId, RoleId, UserId};

pub fn user_id(id: sid::UserId) -> UserId {
    UserId(id.get())
}

pub fn guild_id(id: sid::GuildId) -> GuildId {
    GuildId(id.get())
}

pub fn role_id(id: sid::RoleId) -> RoleId {
    RoleId(id.get())
}

pub fn channel_id(id: sid::ChannelId) -> ChannelId {
    ChannelId(id.get())
}

/// Serenity IDs are non-zero. Stored IDs come from Discord, so zero only
/// appears in a hand-edited file; such entries are mapped to `None`.
pub fn to_serenity_user(id: UserId) -> Option<sid::UserId> {
    (id.0 != 0).then(|| sid::UserId::new(id.0))
}

pub fn to_serenity_guild(id: GuildId) -> Option<sid::GuildId> {
    (id.0 != 0).then(|| sid::GuildId::new(id.0))
}

pub fn to_serenity_role(id: RoleId) -> Option<sid::RoleId> {
    (id.0 != 0).then(|| sid::RoleId::new(id.0))
}

pub fn to_serenity_channel(id: ChannelId) -> Option<sid::ChannelId> {
    (id.0 != 0).then(|| sid::ChannelId::new(id.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn user_roundtrip(n in 1u64..=u64::MAX) {
            let converted = to_serenity_user(UserId(n)).unwrap();
            prop_assert_eq!(user_id(converted), UserId(n));
        }

        #[test]
        fn role_roundtrip(n in 1u64..=u64::MAX) {
            let converted = to_serenity_role(RoleId(n)).unwrap();
            prop_assert_eq!(role_id(converted), RoleId(n));
        }
    }

    #[test]
    fn zero_ids_are_rejected() {
        assert!(to_serenity_user(UserId(0)).is_none());
        assert!(to_serenity_guild(GuildId(0)).is_none());
        assert!(to_serenity_role(RoleId(0)).is_none());
        assert!(to_serenity_channel(ChannelId(0)).is_none());
    }
}
