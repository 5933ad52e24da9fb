//! Whole-roster helpers: sanity checks and the per-player challenge board.

use super::eligibility::{ChallengeEligibilityEngine, ChallengeVerdict};
use crate::error::{LeagueError, LeagueResult};
use crate::model::{LadderName, PlayerLadderEntry};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::warn;

/// Every position must be at least 1 and unique within its ladder.
pub fn validate_roster(entries: &[PlayerLadderEntry]) -> LeagueResult<()> {
    let mut seen: HashMap<(LadderName, u32), &str> = HashMap::new();
    for entry in entries {
        if entry.position == 0 {
            return Err(LeagueError::invalid(format!(
                "'{}' on {} has position 0",
                entry.display_name(),
                entry.ladder_name
            )));
        }
        if let Some(holder) = seen.insert((entry.ladder_name, entry.position), entry.display_name()) {
            warn!(
                target = "ladder.roster",
                ladder = %entry.ladder_name,
                position = entry.position,
                "duplicate position"
            );
            return Err(LeagueError::invalid(format!(
                "position {} on {} is held by both '{}' and '{}'",
                entry.position,
                entry.ladder_name,
                holder,
                entry.display_name()
            )));
        }
    }
    Ok(())
}

/// One row of a challenge board.
#[derive(Debug, Clone)]
pub struct BoardEntry<'a> {
    pub defender: &'a PlayerLadderEntry,
    pub verdict: ChallengeVerdict,
}

/// Evaluate `challenger` against every other entry on its ladder, top rank first.
///
/// Entries on other ladders and the challenger's own slot are skipped; positions
/// are assumed unique per ladder (see [`validate_roster`]).
pub fn challenge_board<'a>(
    engine: &ChallengeEligibilityEngine,
    challenger: &PlayerLadderEntry,
    roster: &'a [PlayerLadderEntry],
    now: DateTime<Utc>,
) -> LeagueResult<Vec<BoardEntry<'a>>> {
    let mut rivals: Vec<&PlayerLadderEntry> = roster
        .iter()
        .filter(|e| e.ladder_name == challenger.ladder_name)
        .filter(|e| e.position != challenger.position)
        .collect();
    rivals.sort_by_key(|e| e.position);

    rivals
        .into_iter()
        .map(|defender| {
            let verdict = engine.evaluate(challenger, defender, now)?;
            Ok(BoardEntry { defender, verdict })
        })
        .collect()
}
