// Central defaults for ladder rules and prize funding.
// Every value here is only a default: the live numbers travel in `LeagueConfig`.

/// Furthest a challenger may reach upward with an ordinary challenge.
pub const MAX_CHALLENGE_UP: u32 = 4;
/// Furthest a challenger may reach downward with a smackdown.
pub const MAX_SMACKDOWN_DOWN: u32 = 5;
/// Upward reach while a fast-track grant is active.
pub const MAX_FAST_TRACK_UP: u32 = 6;

pub const IMMUNITY_DAYS: i64 = 7;
pub const SMACKBACK_DAYS: i64 = 7;
pub const FAST_TRACK_CHALLENGES: u32 = 2;
pub const FAST_TRACK_WEEKS: i64 = 4;
/// Longest immunity or smackback window accepted from config.
pub const MAX_GRANT_DAYS: i64 = 3650;

// Prize pool funding (currency units).
pub const MEMBERSHIP_FEE_PER_PLAYER_PER_MONTH: f64 = 5.0;
pub const PERIOD_LENGTH_MONTHS: u32 = 3;
pub const PLACEMENT_SEED_PER_PLAYER: f64 = 7.0;
pub const CLIMBER_SEED_PER_PLAYER: f64 = 1.0;
pub const MATCH_FEE_TO_PLACEMENT: f64 = 2.5;
pub const MATCH_FEE_TO_CLIMBER: f64 = 0.5;

/// Share of the active field that finishes in the money, in percent.
pub const PAID_PLACES_PERCENT: u32 = 15;
pub const MIN_PAID_PLACES: u32 = 2;
/// Percent of the placement pool paid to rank 1, 2, 3, 4.
pub const PAYOUT_SCHEDULE: [u32; 4] = [40, 30, 20, 10];

// Weekly dues.
pub const WEEKLY_DUES_PER_PLAYER: f64 = 10.0;
pub const DUES_PRIZE_FUND_PERCENT: u32 = 50;
pub const DUES_LEAGUE_OPS_PERCENT: u32 = 30;
pub const SANCTION_FEE_PER_PLAYER: f64 = 25.0;

/// Standings refresh interval used by the summary cache.
pub const STANDINGS_REFRESH_SECS: u64 = 30;
