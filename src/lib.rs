//! Maharlika Bot - a Discord bot that awards XP for chat activity.
//!
//! Members earn XP per message, level up on a doubling schedule, and are
//! granted the roles each guild maps to their level.

pub mod commands;
pub mod config;
pub mod discord;
pub mod effects;
pub mod events;
pub mod handlers;
pub mod levels;
pub mod persistence;
pub mod replies;
pub mod roles;
pub mod server;
pub mod types;

#[cfg(test)]
mod test_utils;
