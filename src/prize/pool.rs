//! Placement pool, climber fund and payout table for one funding period.

use crate::config::PrizePoolConfig;
use crate::error::{LeagueError, LeagueResult};
use crate::util::round_to_cents;
use serde::Serialize;
use tracing::{debug, warn};

/// Inputs for one funding period of one ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct PrizePoolPeriod {
    pub active_player_count: u32,
    pub completed_match_count: u32,
    pub membership_fee_per_player_per_month: f64,
    pub period_length_months: u32,
    pub placement_seed_per_player: f64,
    pub climber_seed_per_player: f64,
    pub match_fee_to_placement: f64,
    pub match_fee_to_climber: f64,
}

impl PrizePoolPeriod {
    /// Combine live counts with the configured funding rates.
    pub fn from_config(
        config: &PrizePoolConfig,
        active_player_count: u32,
        completed_match_count: u32,
    ) -> Self {
        Self {
            active_player_count,
            completed_match_count,
            membership_fee_per_player_per_month: config.membership_fee_per_player_per_month,
            period_length_months: config.period_length_months,
            placement_seed_per_player: config.placement_seed_per_player,
            climber_seed_per_player: config.climber_seed_per_player,
            match_fee_to_placement: config.match_fee_to_placement,
            match_fee_to_climber: config.match_fee_to_climber,
        }
    }

    fn validate(&self) -> LeagueResult<()> {
        let rates = [
            ("membership_fee_per_player_per_month", self.membership_fee_per_player_per_month),
            ("placement_seed_per_player", self.placement_seed_per_player),
            ("climber_seed_per_player", self.climber_seed_per_player),
            ("match_fee_to_placement", self.match_fee_to_placement),
            ("match_fee_to_climber", self.match_fee_to_climber),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(LeagueError::invalid(format!(
                    "{field} must be a non-negative amount, got {value}"
                )));
            }
        }
        if self.period_length_months == 0 {
            return Err(LeagueError::invalid("period_length_months must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoutRow {
    pub rank: u32,
    pub percentage_of_placement_pool: u32,
    pub amount: f64,
}

/// Every amount is rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrizePoolSummary {
    pub placement_seed: f64,
    pub climber_seed: f64,
    pub membership_revenue: f64,
    pub match_placement_contribution: f64,
    pub climber_match_bonus: f64,
    pub placement_pool: f64,
    pub climber_fund: f64,
    pub total_prize_pool: f64,
    /// Uncapped count of paid places, `max(min, ceil(n * percent / 100))`.
    pub places_to_pay: u32,
    /// Paid places that have no percentage in the payout schedule.
    pub unscheduled_places: u32,
    pub payout_table: Vec<PayoutRow>,
    /// Whole climber fund, paid to the most improved player outside the paid places.
    pub climber_award: f64,
    /// Placement pool left after the scheduled rows are paid.
    pub unallocated_placement: f64,
    /// `total_prize_pool - (sum(payouts) + climber_award + unallocated_placement)`,
    /// all rounded; left uncorrected.
    pub rounding_drift: f64,
}

impl PrizePoolSummary {
    pub fn payout_for_rank(&self, rank: u32) -> Option<f64> {
        self.payout_table.iter().find(|r| r.rank == rank).map(|r| r.amount)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PrizePoolCalculator {
    config: PrizePoolConfig,
}

impl PrizePoolCalculator {
    pub fn new(config: PrizePoolConfig) -> Self {
        Self { config }
    }

    /// Shorthand for [`compute_period`](Self::compute_period) with the configured rates.
    pub fn summarize(
        &self,
        active_player_count: u32,
        completed_match_count: u32,
    ) -> LeagueResult<PrizePoolSummary> {
        let period =
            PrizePoolPeriod::from_config(&self.config, active_player_count, completed_match_count);
        self.compute_period(&period)
    }

    /// Number of paid places for a field of `active_player_count`.
    pub fn places_to_pay(&self, active_player_count: u32) -> u32 {
        let percent = u64::from(self.config.paid_places_percent);
        let share = (u64::from(active_player_count) * percent).div_ceil(100);
        let share = u32::try_from(share).unwrap_or(u32::MAX);
        share.max(self.config.min_paid_places)
    }

    pub fn compute_period(&self, period: &PrizePoolPeriod) -> LeagueResult<PrizePoolSummary> {
        if let Err(e) = period.validate() {
            warn!(target = "prize.pool", error = %e, "rejected period");
            return Err(e);
        }

        let players = f64::from(period.active_player_count);
        let matches = f64::from(period.completed_match_count);

        let placement_seed = players * period.placement_seed_per_player;
        let climber_seed = players * period.climber_seed_per_player;
        let membership_revenue = players
            * period.membership_fee_per_player_per_month
            * f64::from(period.period_length_months);
        let match_placement_contribution = matches * period.match_fee_to_placement;
        let climber_match_bonus = matches * period.match_fee_to_climber;

        let placement_pool = placement_seed + membership_revenue + match_placement_contribution;
        let climber_fund = climber_seed + climber_match_bonus;
        let total_prize_pool = placement_pool + climber_fund;

        let places_to_pay = self.places_to_pay(period.active_player_count);
        let payout_table: Vec<PayoutRow> = self
            .config
            .payout_schedule
            .iter()
            .zip(1..=places_to_pay)
            .map(|(&percent, rank)| PayoutRow {
                rank,
                percentage_of_placement_pool: percent,
                amount: round_to_cents(placement_pool * f64::from(percent) / 100.0),
            })
            .collect();
        let unscheduled_places = places_to_pay.saturating_sub(payout_table.len() as u32);

        let scheduled_percent: u64 = payout_table
            .iter()
            .map(|r| u64::from(r.percentage_of_placement_pool))
            .sum();
        let unscheduled_percent = 100 - scheduled_percent.min(100);
        let unallocated_placement =
            round_to_cents(placement_pool * unscheduled_percent as f64 / 100.0);

        let climber_award = round_to_cents(climber_fund);
        let total_rounded = round_to_cents(total_prize_pool);
        let paid: f64 = payout_table.iter().map(|r| r.amount).sum();
        let rounding_drift =
            round_to_cents(total_rounded - (paid + climber_award + unallocated_placement));

        if unscheduled_places > 0 {
            debug!(
                target = "prize.pool",
                places_to_pay,
                unscheduled_places,
                "paid places exceed payout schedule"
            );
        }

        let summary = PrizePoolSummary {
            placement_seed: round_to_cents(placement_seed),
            climber_seed: round_to_cents(climber_seed),
            membership_revenue: round_to_cents(membership_revenue),
            match_placement_contribution: round_to_cents(match_placement_contribution),
            climber_match_bonus: round_to_cents(climber_match_bonus),
            placement_pool: round_to_cents(placement_pool),
            climber_fund: climber_award,
            total_prize_pool: total_rounded,
            places_to_pay,
            unscheduled_places,
            payout_table,
            climber_award,
            unallocated_placement,
            rounding_drift,
        };
        debug!(
            target = "prize.pool",
            players = period.active_player_count,
            matches = period.completed_match_count,
            total = summary.total_prize_pool,
            "period computed"
        );
        Ok(summary)
    }
}
