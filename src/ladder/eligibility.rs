//! Challenge eligibility between two ladder entries.
//!
//! Gates run in a fixed order and the first failure decides the verdict.
//! Once every gate passes, the challenge type is picked by priority:
//! smackback, fast-track, challenge, smackdown.

use crate::config::LadderRules;
use crate::error::{LeagueError, LeagueResult};
use crate::model::{ChallengeType, LadderName, PlayerLadderEntry};
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, warn};

/// Why a challenge attempt was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    SamePlayer,
    DifferentLadder {
        challenger: LadderName,
        defender: LadderName,
    },
    ProfileIncomplete,
    OpponentProfileIncomplete,
    ChallengerInactive,
    DefenderInactive,
    DefenderImmune {
        until: DateTime<Utc>,
    },
    TooFarAbove {
        gap: u32,
        max: u32,
    },
    TooFarBelow {
        gap: u32,
        max: u32,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SamePlayer => write!(f, "Same player: you cannot challenge yourself"),
            Self::DifferentLadder {
                challenger,
                defender,
            } => write!(
                f,
                "Opponent is on a different ladder ({} vs {})",
                challenger.title(),
                defender.title()
            ),
            Self::ProfileIncomplete => {
                write!(f, "Profile incomplete: link your account before challenging")
            }
            Self::OpponentProfileIncomplete => {
                write!(f, "Opponent profile incomplete: no linked account")
            }
            Self::ChallengerInactive => write!(f, "Challenger inactive"),
            Self::DefenderInactive => write!(f, "Defender inactive"),
            Self::DefenderImmune { until } => {
                write!(f, "Defender immune until {}", until.format("%Y-%m-%d %H:%M UTC"))
            }
            Self::TooFarAbove { gap, max } => write!(
                f,
                "Too far above: opponent is {gap} positions above you (max {max})"
            ),
            Self::TooFarBelow { gap, max } => write!(
                f,
                "Too far below: opponent is {gap} positions below you (max {max})"
            ),
        }
    }
}

/// Outcome of one challenge attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeVerdict {
    pub eligible: bool,
    pub challenge_type: Option<ChallengeType>,
    pub reason: String,
    pub rejection: Option<Rejection>,
}

impl ChallengeVerdict {
    fn allow(challenge_type: ChallengeType, delta: i64) -> Self {
        let reason = match delta {
            d if d < 0 => format!("Eligible for {challenge_type}: opponent {} above", -d),
            d if d > 0 => format!("Eligible for {challenge_type}: opponent {d} below"),
            _ => format!("Eligible for {challenge_type}"),
        };
        Self {
            eligible: true,
            challenge_type: Some(challenge_type),
            reason,
            rejection: None,
        }
    }

    fn reject(rejection: Rejection) -> Self {
        Self {
            eligible: false,
            challenge_type: None,
            reason: rejection.to_string(),
            rejection: Some(rejection),
        }
    }
}

/// Stateless rule engine; holds only the configured range limits.
#[derive(Debug, Clone, Default)]
pub struct ChallengeEligibilityEngine {
    rules: LadderRules,
}

impl ChallengeEligibilityEngine {
    pub fn new(rules: LadderRules) -> Self {
        Self { rules }
    }

    /// Decide whether `challenger` may challenge `defender` at `now`.
    ///
    /// Ineligibility is reported through the verdict. `Err` is reserved for
    /// records that violate the input contract (a position of 0).
    pub fn evaluate(
        &self,
        challenger: &PlayerLadderEntry,
        defender: &PlayerLadderEntry,
        now: DateTime<Utc>,
    ) -> LeagueResult<ChallengeVerdict> {
        for (role, entry) in [("challenger", challenger), ("defender", defender)] {
            if entry.position == 0 {
                warn!(target = "ladder.eligibility", role, name = %entry.display_name(), "position 0");
                return Err(LeagueError::invalid(format!(
                    "{role} '{}' has position 0; positions start at 1",
                    entry.display_name()
                )));
            }
        }

        let verdict = match self.gate(challenger, defender, now) {
            Err(rejection) => ChallengeVerdict::reject(rejection),
            Ok(()) => self.classify(challenger, defender, now),
        };

        debug!(
            target = "ladder.eligibility",
            challenger = %challenger.display_name(),
            defender = %defender.display_name(),
            eligible = verdict.eligible,
            kind = ?verdict.challenge_type,
            reason = %verdict.reason
        );
        Ok(verdict)
    }

    fn gate(
        &self,
        challenger: &PlayerLadderEntry,
        defender: &PlayerLadderEntry,
        now: DateTime<Utc>,
    ) -> Result<(), Rejection> {
        if challenger.same_person(defender) {
            return Err(Rejection::SamePlayer);
        }
        if challenger.ladder_name != defender.ladder_name {
            return Err(Rejection::DifferentLadder {
                challenger: challenger.ladder_name,
                defender: defender.ladder_name,
            });
        }
        if !challenger.has_linked_account() {
            return Err(Rejection::ProfileIncomplete);
        }
        if !defender.has_linked_account() {
            return Err(Rejection::OpponentProfileIncomplete);
        }
        if !challenger.is_active {
            return Err(Rejection::ChallengerInactive);
        }
        if !defender.is_active {
            return Err(Rejection::DefenderInactive);
        }
        if let Some(until) = defender.immunity_until
            && now < until
        {
            return Err(Rejection::DefenderImmune { until });
        }
        Ok(())
    }

    fn classify(
        &self,
        challenger: &PlayerLadderEntry,
        defender: &PlayerLadderEntry,
        now: DateTime<Utc>,
    ) -> ChallengeVerdict {
        // Negative: defender ranked above the challenger.
        let delta = i64::from(defender.position) - i64::from(challenger.position);
        let up = i64::from(self.rules.max_challenge_up);
        let down = i64::from(self.rules.max_smackdown_down);
        let fast_up = i64::from(self.rules.max_fast_track_up);
        let fast_track = challenger.has_fast_track(now);

        if defender.position == 1 && challenger.has_smackback(now) {
            return ChallengeVerdict::allow(ChallengeType::Smackback, delta);
        }
        if fast_track && (-fast_up..=0).contains(&delta) {
            return ChallengeVerdict::allow(ChallengeType::FastTrack, delta);
        }
        if (-up..=0).contains(&delta) {
            return ChallengeVerdict::allow(ChallengeType::Challenge, delta);
        }
        if (1..=down).contains(&delta) {
            return ChallengeVerdict::allow(ChallengeType::Smackdown, delta);
        }

        let gap = delta.unsigned_abs() as u32;
        if delta < 0 {
            let max = if fast_track {
                self.rules.max_fast_track_up
            } else {
                self.rules.max_challenge_up
            };
            ChallengeVerdict::reject(Rejection::TooFarAbove { gap, max })
        } else {
            ChallengeVerdict::reject(Rejection::TooFarBelow {
                gap,
                max: self.rules.max_smackdown_down,
            })
        }
    }
}
