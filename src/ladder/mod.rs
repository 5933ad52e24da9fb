//! Ladder rules: who may challenge whom, and the grants that bend those rules.

pub mod eligibility;
pub mod grants;
pub mod roster;

pub use eligibility::{ChallengeEligibilityEngine, ChallengeVerdict, Rejection};
pub use roster::{BoardEntry, challenge_board, validate_roster};
