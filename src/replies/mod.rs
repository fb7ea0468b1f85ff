//! User-visible message text.
//!
//! All strings the bot posts or replies with are built here so that handlers
//! only deal with data.

mod format;

pub use format::{
    LEADERBOARD_SIZE, LeaderboardEntry, format_add_rank_role, format_leaderboard, format_level_up,
    format_rank, format_role_changes,
};
