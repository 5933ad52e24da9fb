//! Standings service: glues the rule modules to the player directory and clock.
//!
//! The directory (whatever persistence the deployment uses) and the clock are
//! traits so the rules never touch I/O. Prize summaries are cached per ladder
//! for `refresh_secs`; callers invalidate when they see the data change.

use super::cache::TtlCache;
use crate::config::LeagueConfig;
use crate::error::{LeagueError, LeagueResult};
use crate::ladder::{ChallengeEligibilityEngine, ChallengeVerdict, challenge_board, validate_roster};
use crate::model::{LadderName, PlayerLadderEntry};
use crate::prize::{PrizePoolCalculator, PrizePoolSummary};
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Read access to ladder records.
pub trait LadderDirectory {
    fn find_player(&self, player_id: &str) -> LeagueResult<Option<PlayerLadderEntry>>;
    fn roster(&self, ladder: LadderName) -> LeagueResult<Vec<PlayerLadderEntry>>;
    /// Matches completed on `ladder` in the current prize period.
    fn completed_matches(&self, ladder: LadderName) -> LeagueResult<u32>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Directory backed by an already-fetched snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    entries: Vec<PlayerLadderEntry>,
    matches: HashMap<LadderName, u32>,
}

impl InMemoryDirectory {
    pub fn new(entries: Vec<PlayerLadderEntry>) -> LeagueResult<Self> {
        validate_roster(&entries)?;
        Ok(Self {
            entries,
            matches: HashMap::new(),
        })
    }

    pub fn with_matches(mut self, ladder: LadderName, completed: u32) -> Self {
        self.matches.insert(ladder, completed);
        self
    }

    pub fn entries(&self) -> &[PlayerLadderEntry] {
        &self.entries
    }

    /// Swap in a changed record, keyed by `player_id`.
    pub fn upsert(&mut self, entry: PlayerLadderEntry) -> LeagueResult<()> {
        let Some(id) = entry.player_id.clone() else {
            return Err(LeagueError::invalid("cannot upsert an entry without player_id"));
        };
        let mut next = self.entries.clone();
        match next.iter_mut().find(|e| e.player_id.as_deref() == Some(id.as_str())) {
            Some(slot) => *slot = entry,
            None => next.push(entry),
        }
        validate_roster(&next)?;
        self.entries = next;
        Ok(())
    }
}

impl LadderDirectory for InMemoryDirectory {
    fn find_player(&self, player_id: &str) -> LeagueResult<Option<PlayerLadderEntry>> {
        Ok(self
            .entries
            .iter()
            .find(|e| e.player_id.as_deref() == Some(player_id))
            .cloned())
    }

    fn roster(&self, ladder: LadderName) -> LeagueResult<Vec<PlayerLadderEntry>> {
        let mut list: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.ladder_name == ladder)
            .cloned()
            .collect();
        list.sort_by_key(|e| e.position);
        Ok(list)
    }

    fn completed_matches(&self, ladder: LadderName) -> LeagueResult<u32> {
        Ok(self.matches.get(&ladder).copied().unwrap_or(0))
    }
}

pub struct StandingsService<D, C> {
    directory: D,
    clock: C,
    engine: ChallengeEligibilityEngine,
    calculator: PrizePoolCalculator,
    summaries: TtlCache<LadderName, PrizePoolSummary>,
}

impl<D: LadderDirectory, C: Clock> StandingsService<D, C> {
    pub fn new(directory: D, clock: C, config: &LeagueConfig) -> Self {
        Self {
            directory,
            clock,
            engine: ChallengeEligibilityEngine::new(config.rules.clone()),
            calculator: PrizePoolCalculator::new(config.prize.clone()),
            summaries: TtlCache::new(Duration::from_secs(config.refresh_secs)),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    fn player(&self, player_id: &str) -> anyhow::Result<PlayerLadderEntry> {
        self.directory
            .find_player(player_id)
            .with_context(|| format!("looking up player {player_id}"))?
            .ok_or_else(|| LeagueError::UnknownPlayer(player_id.to_string()).into())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn evaluate_by_id(
        &self,
        challenger_id: &str,
        defender_id: &str,
    ) -> anyhow::Result<ChallengeVerdict> {
        let challenger = self.player(challenger_id)?;
        let defender = self.player(defender_id)?;
        let verdict = self.engine.evaluate(&challenger, &defender, self.clock.now())?;
        Ok(verdict)
    }

    /// Every opponent on the player's ladder with the verdict for challenging them.
    #[instrument(level = "debug", skip(self))]
    pub fn board_for(
        &self,
        player_id: &str,
    ) -> anyhow::Result<Vec<(PlayerLadderEntry, ChallengeVerdict)>> {
        let challenger = self.player(player_id)?;
        let roster = self
            .directory
            .roster(challenger.ladder_name)
            .with_context(|| format!("loading roster for {}", challenger.ladder_name))?;
        let board = challenge_board(&self.engine, &challenger, &roster, self.clock.now())?;
        Ok(board
            .into_iter()
            .map(|row| (row.defender.clone(), row.verdict))
            .collect())
    }

    #[instrument(level = "debug", skip(self, ladder), fields(ladder = %ladder))]
    pub fn prize_summary(&mut self, ladder: LadderName) -> anyhow::Result<PrizePoolSummary> {
        if let Some(summary) = self.summaries.get(&ladder) {
            debug!(target = "cache.standings", hit = true);
            return Ok(summary.clone());
        }
        debug!(target = "cache.standings", hit = false, reason = "miss_or_expired");

        let roster = self
            .directory
            .roster(ladder)
            .with_context(|| format!("loading roster for {ladder}"))?;
        let active = roster.iter().filter(|e| e.is_active).count();
        let active = u32::try_from(active).context("active player count overflow")?;
        let matches = self
            .directory
            .completed_matches(ladder)
            .with_context(|| format!("loading match count for {ladder}"))?;

        let summary = self.calculator.summarize(active, matches)?;
        self.summaries.insert(ladder, summary.clone());
        Ok(summary)
    }

    /// Drop the cached summary after a roster or match change on `ladder`.
    pub fn invalidate(&mut self, ladder: LadderName) {
        self.summaries.invalidate(&ladder);
    }

    pub fn invalidate_all(&mut self) {
        self.summaries.clear();
    }

    pub fn cache_stats(&self) -> (u64, u64) {
        self.summaries.stats()
    }
}
