//! League configuration: ladder rules, prize funding and dues.
//!
//! Defaults mirror `constants.rs`. Deployments override them from the
//! environment (`LEAGUE_*`, optionally through a `.env` file) or from JSON.

use crate::constants::*;
use crate::error::{LeagueError, LeagueResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderRules {
    pub max_challenge_up: u32,
    pub max_smackdown_down: u32,
    pub max_fast_track_up: u32,
    pub immunity_days: i64,
    pub smackback_days: i64,
    pub fast_track_challenges: u32,
    pub fast_track_weeks: i64,
}

impl Default for LadderRules {
    fn default() -> Self {
        Self {
            max_challenge_up: MAX_CHALLENGE_UP,
            max_smackdown_down: MAX_SMACKDOWN_DOWN,
            max_fast_track_up: MAX_FAST_TRACK_UP,
            immunity_days: IMMUNITY_DAYS,
            smackback_days: SMACKBACK_DAYS,
            fast_track_challenges: FAST_TRACK_CHALLENGES,
            fast_track_weeks: FAST_TRACK_WEEKS,
        }
    }
}

impl LadderRules {
    /// Grant lengths must be non-negative and small enough to add to a timestamp.
    pub fn validate(&self) -> LeagueResult<()> {
        let spans = [
            ("immunity_days", self.immunity_days, MAX_GRANT_DAYS),
            ("smackback_days", self.smackback_days, MAX_GRANT_DAYS),
            ("fast_track_weeks", self.fast_track_weeks, MAX_GRANT_DAYS / 7),
        ];
        for (field, value, max) in spans {
            if !(0..=max).contains(&value) {
                return Err(LeagueError::Config(format!(
                    "{field}={value} is outside 0..={max}"
                )));
            }
        }
        Ok(())
    }
}

/// Funding rates for one prize period. Money is in currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrizePoolConfig {
    pub membership_fee_per_player_per_month: f64,
    pub period_length_months: u32,
    pub placement_seed_per_player: f64,
    pub climber_seed_per_player: f64,
    pub match_fee_to_placement: f64,
    pub match_fee_to_climber: f64,
    pub paid_places_percent: u32,
    pub min_paid_places: u32,
    /// Percent of the placement pool for rank 1, 2, ...
    pub payout_schedule: Vec<u32>,
}

impl Default for PrizePoolConfig {
    fn default() -> Self {
        Self {
            membership_fee_per_player_per_month: MEMBERSHIP_FEE_PER_PLAYER_PER_MONTH,
            period_length_months: PERIOD_LENGTH_MONTHS,
            placement_seed_per_player: PLACEMENT_SEED_PER_PLAYER,
            climber_seed_per_player: CLIMBER_SEED_PER_PLAYER,
            match_fee_to_placement: MATCH_FEE_TO_PLACEMENT,
            match_fee_to_climber: MATCH_FEE_TO_CLIMBER,
            paid_places_percent: PAID_PLACES_PERCENT,
            min_paid_places: MIN_PAID_PLACES,
            payout_schedule: PAYOUT_SCHEDULE.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuesConfig {
    pub weekly_dues_per_player: f64,
    pub prize_fund_percent: u32,
    pub league_ops_percent: u32,
    pub sanction_fee_per_player: f64,
}

impl Default for DuesConfig {
    fn default() -> Self {
        Self {
            weekly_dues_per_player: WEEKLY_DUES_PER_PLAYER,
            prize_fund_percent: DUES_PRIZE_FUND_PERCENT,
            league_ops_percent: DUES_LEAGUE_OPS_PERCENT,
            sanction_fee_per_player: SANCTION_FEE_PER_PLAYER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub rules: LadderRules,
    pub prize: PrizePoolConfig,
    pub dues: DuesConfig,
    pub refresh_secs: u64,
}

impl DuesConfig {
    /// Prize fund and league ops shares together take more than the whole.
    pub fn split_exceeds_whole(&self) -> bool {
        u64::from(self.prize_fund_percent) + u64::from(self.league_ops_percent) > 100
    }
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            rules: LadderRules::default(),
            prize: PrizePoolConfig::default(),
            dues: DuesConfig::default(),
            refresh_secs: STANDINGS_REFRESH_SECS,
        }
    }
}

impl LeagueConfig {
    /// Load `.env` if present, then apply `LEAGUE_*` overrides from the process environment.
    pub fn from_env() -> LeagueResult<Self> {
        if let Err(e) = dotenv::dotenv() {
            debug!(target = "config", error = %e, "no .env file loaded");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> LeagueResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        override_from(&get, "LEAGUE_MAX_CHALLENGE_UP", &mut cfg.rules.max_challenge_up)?;
        override_from(&get, "LEAGUE_MAX_SMACKDOWN_DOWN", &mut cfg.rules.max_smackdown_down)?;
        override_from(&get, "LEAGUE_MAX_FAST_TRACK_UP", &mut cfg.rules.max_fast_track_up)?;
        override_from(&get, "LEAGUE_IMMUNITY_DAYS", &mut cfg.rules.immunity_days)?;
        override_from(&get, "LEAGUE_SMACKBACK_DAYS", &mut cfg.rules.smackback_days)?;
        override_from(&get, "LEAGUE_FAST_TRACK_CHALLENGES", &mut cfg.rules.fast_track_challenges)?;
        override_from(&get, "LEAGUE_FAST_TRACK_WEEKS", &mut cfg.rules.fast_track_weeks)?;

        let prize = &mut cfg.prize;
        override_from(&get, "LEAGUE_MEMBERSHIP_FEE", &mut prize.membership_fee_per_player_per_month)?;
        override_from(&get, "LEAGUE_PERIOD_MONTHS", &mut prize.period_length_months)?;
        override_from(&get, "LEAGUE_PLACEMENT_SEED", &mut prize.placement_seed_per_player)?;
        override_from(&get, "LEAGUE_CLIMBER_SEED", &mut prize.climber_seed_per_player)?;
        override_from(&get, "LEAGUE_MATCH_FEE_PLACEMENT", &mut prize.match_fee_to_placement)?;
        override_from(&get, "LEAGUE_MATCH_FEE_CLIMBER", &mut prize.match_fee_to_climber)?;
        override_from(&get, "LEAGUE_PAID_PLACES_PERCENT", &mut prize.paid_places_percent)?;
        override_from(&get, "LEAGUE_MIN_PAID_PLACES", &mut prize.min_paid_places)?;
        if let Some(raw) = get("LEAGUE_PAYOUT_SCHEDULE") {
            prize.payout_schedule = parse_schedule(&raw)?;
        }

        override_from(&get, "LEAGUE_WEEKLY_DUES", &mut cfg.dues.weekly_dues_per_player)?;
        override_from(&get, "LEAGUE_DUES_PRIZE_PERCENT", &mut cfg.dues.prize_fund_percent)?;
        override_from(&get, "LEAGUE_DUES_OPS_PERCENT", &mut cfg.dues.league_ops_percent)?;
        override_from(&get, "LEAGUE_SANCTION_FEE", &mut cfg.dues.sanction_fee_per_player)?;
        override_from(&get, "LEAGUE_REFRESH_SECS", &mut cfg.refresh_secs)?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a full or partial JSON document; missing fields keep their defaults.
    pub fn from_json_str(raw: &str) -> LeagueResult<Self> {
        let cfg: Self =
            serde_json::from_str(raw).map_err(|e| LeagueError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> LeagueResult<()> {
        self.rules.validate()?;
        let scheduled: u64 = self.prize.payout_schedule.iter().map(|&p| u64::from(p)).sum();
        if scheduled > 100 {
            return Err(LeagueError::Config(format!(
                "payout schedule sums to {scheduled}%, more than the placement pool"
            )));
        }
        if self.prize.period_length_months == 0 {
            return Err(LeagueError::Config("period_length_months must be at least 1".into()));
        }
        if self.dues.split_exceeds_whole() {
            return Err(LeagueError::Config(format!(
                "dues split {}% + {}% exceeds 100%",
                self.dues.prize_fund_percent, self.dues.league_ops_percent
            )));
        }
        Ok(())
    }
}

fn override_from<T, G>(get: &G, key: &str, slot: &mut T) -> LeagueResult<()>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(key) else {
        return Ok(());
    };
    match raw.trim().parse::<T>() {
        Ok(v) => {
            *slot = v;
            Ok(())
        }
        Err(_) => {
            warn!(target = "config", key, value = %raw, "unparseable override");
            Err(LeagueError::Config(format!("{key}={raw} is not a valid value")))
        }
    }
}

fn parse_schedule(raw: &str) -> LeagueResult<Vec<u32>> {
    raw.split(',')
        .map(|part| {
            part.trim().parse::<u32>().map_err(|_| {
                LeagueError::Config(format!("LEAGUE_PAYOUT_SCHEDULE entry '{}' is not a percent", part.trim()))
            })
        })
        .collect()
}
