//! Pure role reconciliation.

use std::collections::BTreeSet;

use crate::types::{LevelRoles, RoleId};

/// Roles to add to and remove from a member.
///
/// The two sets are always disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDiff {
    pub to_grant: BTreeSet<RoleId>,
    pub to_revoke: BTreeSet<RoleId>,
}

impl RoleDiff {
    /// Returns true if no role needs to change.
    pub fn is_empty(&self) -> bool {
        self.to_grant.is_empty() && self.to_revoke.is_empty()
    }
}

/// Computes the role changes for a member at `new_level`.
///
/// Thresholds are inclusive: a role whose required level equals `new_level`
/// is granted. Roles are banded additively, so every role at or below the
/// member's level is kept, not just the highest one.
///
/// Entries for roles that no longer exist on the platform (`role_exists`
/// returns false) are skipped without error.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use maharlika_bot::roles::reconcile_roles;
/// use maharlika_bot::types::{LevelRoles, RoleId};
///
/// let level_roles = LevelRoles::from([(RoleId(1), 5), (RoleId(2), 10)]);
/// let held = BTreeSet::from([RoleId(1)]);
///
/// let diff = reconcile_roles(12, &level_roles, &held, |_| true);
/// assert_eq!(diff.to_grant, BTreeSet::from([RoleId(2)]));
/// assert!(diff.to_revoke.is_empty());
/// ```
pub fn reconcile_roles(
    new_level: u32,
    level_roles: &LevelRoles,
    held_roles: &BTreeSet<RoleId>,
    role_exists: impl Fn(RoleId) -> bool,
) -> RoleDiff {
    let level = i64::from(new_level);
    let mut diff = RoleDiff::default();

    for (&role, &required_level) in level_roles {
        if !role_exists(role) {
            continue;
        }

        let eligible = level >= required_level;
        let held = held_roles.contains(&role);

        if eligible && !held {
            diff.to_grant.insert(role);
        } else if !eligible && held {
            diff.to_revoke.insert(role);
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roles(entries: &[(u64, i64)]) -> LevelRoles {
        entries.iter().map(|&(r, l)| (RoleId(r), l)).collect()
    }

    fn held(ids: &[u64]) -> BTreeSet<RoleId> {
        ids.iter().copied().map(RoleId).collect()
    }

    #[test]
    fn grants_newly_reached_role() {
        let diff = reconcile_roles(12, &roles(&[(1, 5), (2, 10)]), &held(&[1]), |_| true);
        assert_eq!(diff.to_grant, held(&[2]));
        assert!(diff.to_revoke.is_empty());
    }

    #[test]
    fn revokes_role_above_level() {
        let diff = reconcile_roles(3, &roles(&[(1, 5), (2, 10)]), &held(&[1]), |_| true);
        assert!(diff.to_grant.is_empty());
        assert_eq!(diff.to_revoke, held(&[1]));
    }

    #[test]
    fn threshold_is_inclusive() {
        let diff = reconcile_roles(5, &roles(&[(1, 5)]), &held(&[]), |_| true);
        assert_eq!(diff.to_grant, held(&[1]));
    }

    #[test]
    fn roles_are_additive() {
        let diff = reconcile_roles(10, &roles(&[(1, 3), (2, 5), (3, 10)]), &held(&[]), |_| true);
        assert_eq!(diff.to_grant, held(&[1, 2, 3]));
    }

    #[test]
    fn already_correct_roles_are_untouched() {
        let diff = reconcile_roles(6, &roles(&[(1, 5), (2, 10)]), &held(&[1]), |_| true);
        assert!(diff.is_empty());
    }

    #[test]
    fn dangling_roles_are_skipped() {
        let diff = reconcile_roles(
            1,
            &roles(&[(1, 0), (2, 5)]),
            &held(&[2]),
            |role| role != RoleId(1) && role != RoleId(2),
        );
        assert!(diff.is_empty());
    }

    #[test]
    fn zero_and_negative_thresholds_grant_immediately() {
        let diff = reconcile_roles(0, &roles(&[(1, 0), (2, -4)]), &held(&[]), |_| true);
        assert_eq!(diff.to_grant, held(&[1, 2]));
    }

    #[test]
    fn unmanaged_held_roles_are_ignored() {
        let diff = reconcile_roles(0, &roles(&[(1, 5)]), &held(&[99]), |_| true);
        assert!(diff.is_empty());
    }

    proptest! {
        #[test]
        fn outputs_are_disjoint_and_managed(
            level in 0u32..50,
            mapping in prop::collection::btree_map(0u64..20, -5i64..50, 0..10),
            held_ids in prop::collection::btree_set(0u64..25, 0..10),
            missing in prop::collection::btree_set(0u64..20, 0..5),
        ) {
            let level_roles: LevelRoles = mapping.iter().map(|(&r, &l)| (RoleId(r), l)).collect();
            let held_roles: BTreeSet<RoleId> = held_ids.iter().copied().map(RoleId).collect();
            let diff =
                reconcile_roles(level, &level_roles, &held_roles, |r| !missing.contains(&r.0));

            prop_assert!(diff.to_grant.is_disjoint(&diff.to_revoke));
            for role in diff.to_grant.iter().chain(diff.to_revoke.iter()) {
                prop_assert!(level_roles.contains_key(role));
                prop_assert!(!missing.contains(&role.0));
            }
            for role in &diff.to_grant {
                prop_assert!(!held_roles.contains(role));
                prop_assert!(i64::from(level) >= level_roles[role]);
            }
            for role in &diff.to_revoke {
                prop_assert!(held_roles.contains(role));
                prop_assert!(i64::from(level) < level_roles[role]);
            }
        }

        #[test]
        fn applying_diff_reaches_fixed_point(
            level in 0u32..50,
            mapping in prop::collection::btree_map(0u64..20, -5i64..50, 0..10),
            held_ids in prop::collection::btree_set(0u64..25, 0..10),
        ) {
            let level_roles: LevelRoles = mapping.iter().map(|(&r, &l)| (RoleId(r), l)).collect();
            let mut held_roles: BTreeSet<RoleId> = held_ids.iter().copied().map(RoleId).collect();
            let diff = reconcile_roles(level, &level_roles, &held_roles, |_| true);

            held_roles.extend(diff.to_grant.iter().copied());
            held_roles.retain(|r| !diff.to_revoke.contains(r));

            let again = reconcile_roles(level, &level_roles, &held_roles, |_| true);
            prop_assert!(again.is_empty());
        }
    }
}
