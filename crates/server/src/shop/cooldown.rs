//! Cooldown gate: pure time arithmetic over session state.
//!
//! The gate never records on a mere permission check. Callers check first,
//! run the guarded mutation, and record immediately before committing it, so
//! a request rejected for unrelated reasons (bad quantity, unknown product)
//! never consumes the cooldown window.

use chrono::{DateTime, TimeDelta, Utc};

use pantry_core::{ActionKind, UserSession};

/// Per-action cooldown durations. Policy lives here with the callers, not in
/// the gate functions, which take the duration as a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    /// Minimum gap between stock re-counts of one product by one user.
    pub check: TimeDelta,
    /// Minimum gap between purchases of one product by one user.
    pub buy: TimeDelta,
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self {
            check: TimeDelta::milliseconds(120_000),
            buy: TimeDelta::milliseconds(5_000),
        }
    }
}

impl CooldownPolicy {
    /// The configured duration for an action kind.
    #[must_use]
    pub const fn duration_for(&self, kind: ActionKind) -> TimeDelta {
        match kind {
            ActionKind::Check => self.check,
            ActionKind::Buy => self.buy,
        }
    }
}

/// Whether the action is permitted at `now`.
///
/// Permitted iff strictly more than `cooldown` has elapsed since the last
/// successful invocation; an absent entry counts as infinitely long ago.
#[must_use]
pub fn can_act(
    session: &UserSession,
    action_key: &str,
    cooldown: TimeDelta,
    now: DateTime<Utc>,
) -> bool {
    session
        .last_actions
        .get(action_key)
        .is_none_or(|&last| now - last > cooldown)
}

/// Time left until the action is permitted again, or `None` when it already
/// is. The complement of [`can_act`].
#[must_use]
pub fn remaining(
    session: &UserSession,
    action_key: &str,
    cooldown: TimeDelta,
    now: DateTime<Utc>,
) -> Option<TimeDelta> {
    session
        .last_actions
        .get(action_key)
        .map(|&last| last + cooldown - now)
        .filter(|&left| left >= TimeDelta::zero())
}

/// Stamp the action as successfully invoked at `now`.
pub fn record(session: &mut UserSession, action_key: String, now: DateTime<Utc>) {
    session.last_actions.insert(action_key, now);
}
