//! Dues tracking for league administration.
//!
//! Each rostered player owes `weekly_dues_per_player` for every week played
//! plus a one-off sanction fee. Collected money first covers the sanction
//! fees; what is left is split between the prize fund and league operations.

use crate::config::DuesConfig;
use crate::error::{LeagueError, LeagueResult};
use crate::util::round_to_cents;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuesPayment {
    pub player: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDuesStatus {
    pub player: String,
    pub expected: f64,
    pub paid: f64,
    /// Positive when the player still owes money, negative when in credit.
    pub balance: f64,
}

impl PlayerDuesStatus {
    pub fn is_paid_up(&self) -> bool {
        self.balance <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuesBreakdown {
    pub expected_total: f64,
    pub collected_total: f64,
    pub outstanding_total: f64,
    pub sanction_fees_due: f64,
    pub sanction_fees_covered: f64,
    pub prize_fund: f64,
    pub league_ops: f64,
    pub remainder: f64,
    pub players: Vec<PlayerDuesStatus>,
}

pub fn compute_dues(
    config: &DuesConfig,
    roster: &[String],
    weeks: u32,
    payments: &[DuesPayment],
) -> LeagueResult<DuesBreakdown> {
    if config.split_exceeds_whole() {
        return Err(LeagueError::invalid(format!(
            "dues split {}% + {}% exceeds 100%",
            config.prize_fund_percent, config.league_ops_percent
        )));
    }
    for (field, value) in [
        ("weekly_dues_per_player", config.weekly_dues_per_player),
        ("sanction_fee_per_player", config.sanction_fee_per_player),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(LeagueError::invalid(format!("{field} must be non-negative, got {value}")));
        }
    }

    let mut paid: HashMap<&str, f64> = roster.iter().map(|p| (p.as_str(), 0.0)).collect();
    for payment in payments {
        if !payment.amount.is_finite() || payment.amount < 0.0 {
            return Err(LeagueError::invalid(format!(
                "payment of {} from '{}' is not a valid amount",
                payment.amount, payment.player
            )));
        }
        match paid.get_mut(payment.player.as_str()) {
            Some(total) => *total += payment.amount,
            None => {
                warn!(target = "dues", player = %payment.player, "payment from unrostered player");
                return Err(LeagueError::UnknownPlayer(payment.player.clone()));
            }
        }
    }

    let per_player_expected =
        config.weekly_dues_per_player * f64::from(weeks) + config.sanction_fee_per_player;
    let players: Vec<PlayerDuesStatus> = roster
        .iter()
        .map(|name| {
            let paid = paid.get(name.as_str()).copied().unwrap_or_default();
            PlayerDuesStatus {
                player: name.clone(),
                expected: round_to_cents(per_player_expected),
                paid: round_to_cents(paid),
                balance: round_to_cents(per_player_expected - paid),
            }
        })
        .collect();

    let headcount = roster.len() as f64;
    let expected_total = per_player_expected * headcount;
    let collected_total: f64 = payments.iter().map(|p| p.amount).sum();
    let outstanding_total: f64 = players.iter().map(|p| p.balance.max(0.0)).sum();

    let sanction_fees_due = config.sanction_fee_per_player * headcount;
    let sanction_fees_covered = collected_total.min(sanction_fees_due);
    let distributable = collected_total - sanction_fees_covered;
    let prize_fund = distributable * f64::from(config.prize_fund_percent) / 100.0;
    let league_ops = distributable * f64::from(config.league_ops_percent) / 100.0;
    let remainder = distributable - prize_fund - league_ops;

    debug!(
        target = "dues",
        players = roster.len(),
        weeks,
        collected = collected_total,
        outstanding = outstanding_total,
        "dues computed"
    );

    Ok(DuesBreakdown {
        expected_total: round_to_cents(expected_total),
        collected_total: round_to_cents(collected_total),
        outstanding_total: round_to_cents(outstanding_total),
        sanction_fees_due: round_to_cents(sanction_fees_due),
        sanction_fees_covered: round_to_cents(sanction_fees_covered),
        prize_fund: round_to_cents(prize_fund),
        league_ops: round_to_cents(league_ops),
        remainder: round_to_cents(remainder),
        players,
    })
}
