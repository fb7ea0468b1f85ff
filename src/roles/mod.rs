//! Level-role reconciliation.
//!
//! Given a member's level and a guild's role thresholds, decides which roles
//! to grant and which to revoke. Applying the changes is left to the caller.

mod reconcile;

pub use reconcile::{RoleDiff, reconcile_roles};
