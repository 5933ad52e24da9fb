// Library entry so integration tests and the report binary share the rule modules.
pub mod config;
pub mod constants;
pub mod dues;
pub mod error;
pub mod ladder;
pub mod model;
pub mod prize;
pub mod services;
pub mod util;

pub use error::{LeagueError, LeagueResult};
pub use ladder::{ChallengeEligibilityEngine, ChallengeVerdict};
pub use model::{ChallengeType, LadderName, PlayerLadderEntry};
pub use prize::{PrizePoolCalculator, PrizePoolSummary};
