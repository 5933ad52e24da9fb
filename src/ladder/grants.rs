//! Time-boxed privileges attached to ladder entries.
//!
//! Each helper takes an entry by reference and returns the updated copy; the
//! caller decides when to persist it.

use crate::config::LadderRules;
use crate::model::PlayerLadderEntry;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Protect a player from challenges for `immunity_days` after a win.
pub fn grant_immunity(
    entry: &PlayerLadderEntry,
    now: DateTime<Utc>,
    rules: &LadderRules,
) -> PlayerLadderEntry {
    let mut next = entry.clone();
    next.immunity_until = Some(now + Duration::days(rules.immunity_days));
    debug!(target = "ladder.grants", player = %entry.display_name(), until = ?next.immunity_until, "immunity");
    next
}

/// Extended upward reach for players who moved down a ladder.
pub fn grant_fast_track(
    entry: &PlayerLadderEntry,
    now: DateTime<Utc>,
    rules: &LadderRules,
) -> PlayerLadderEntry {
    let mut next = entry.clone();
    next.fast_track_challenges_remaining = rules.fast_track_challenges;
    next.fast_track_expiration_date = Some(now + Duration::weeks(rules.fast_track_weeks));
    debug!(
        target = "ladder.grants",
        player = %entry.display_name(),
        remaining = next.fast_track_challenges_remaining,
        "fast_track"
    );
    next
}

/// Use up one fast-track challenge. The counter never goes below zero.
pub fn consume_fast_track(entry: &PlayerLadderEntry) -> PlayerLadderEntry {
    let mut next = entry.clone();
    next.fast_track_challenges_remaining = next.fast_track_challenges_remaining.saturating_sub(1);
    if next.fast_track_challenges_remaining == 0 {
        next.fast_track_expiration_date = None;
    }
    next
}

/// One-time right to call out the #1 player.
pub fn grant_smackback(
    entry: &PlayerLadderEntry,
    now: DateTime<Utc>,
    rules: &LadderRules,
) -> PlayerLadderEntry {
    let mut next = entry.clone();
    next.smackback_eligible_until = Some(now + Duration::days(rules.smackback_days));
    debug!(target = "ladder.grants", player = %entry.display_name(), until = ?next.smackback_eligible_until, "smackback");
    next
}

pub fn clear_smackback(entry: &PlayerLadderEntry) -> PlayerLadderEntry {
    let mut next = entry.clone();
    next.smackback_eligible_until = None;
    next
}
