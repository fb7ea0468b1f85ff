//! Persistence layer for XP and rank-role data.
//!
//! # File Layout
//!
//! ```text
//! xp_data.json     # { "<user_id>": { "xp": N } }
//! rank_roles.json  # { "<guild_id>": { "<role_id>": LEVEL } }
//! ```
//!
//! Both files are plain JSON objects, read whole and written whole. See
//! [`store`] for the locking and crash-safety rules.

pub mod store;

pub use store::{JsonStore, RankRoleStore, StoreError, XpStore};
