use pool_league::config::PrizePoolConfig;
use pool_league::prize::{PrizePoolCalculator, PrizePoolPeriod};
use pool_league::LeagueError;

fn assert_money(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn quarter(active: u32, matches: u32) -> PrizePoolPeriod {
    PrizePoolPeriod {
        active_player_count: active,
        completed_match_count: matches,
        membership_fee_per_player_per_month: 5.0,
        period_length_months: 3,
        placement_seed_per_player: 7.0,
        climber_seed_per_player: 1.0,
        match_fee_to_placement: 2.5,
        match_fee_to_climber: 0.5,
    }
}

#[test]
fn twenty_five_players_forty_matches() {
    let calc = PrizePoolCalculator::default();
    let s = calc.compute_period(&quarter(25, 40)).unwrap();

    assert_money(s.placement_seed, 175.0);
    assert_money(s.climber_seed, 25.0);
    assert_money(s.membership_revenue, 375.0);
    assert_money(s.match_placement_contribution, 100.0);
    assert_money(s.climber_match_bonus, 20.0);
    assert_money(s.placement_pool, 650.0);
    assert_money(s.climber_fund, 45.0);
    assert_money(s.total_prize_pool, 695.0);
    assert_eq!(s.places_to_pay, 4);
    assert_eq!(s.unscheduled_places, 0);

    let amounts: Vec<f64> = s.payout_table.iter().map(|r| r.amount).collect();
    assert_eq!(s.payout_table.len(), 4);
    assert_money(amounts[0], 260.0);
    assert_money(amounts[1], 195.0);
    assert_money(amounts[2], 130.0);
    assert_money(amounts[3], 65.0);
    assert_eq!(s.payout_table[0].percentage_of_placement_pool, 40);
    assert_money(s.climber_award, 45.0);
    assert_money(s.rounding_drift, 0.0);
}

#[test]
fn summarize_uses_configured_rates() {
    let calc = PrizePoolCalculator::new(PrizePoolConfig::default());
    let direct = calc.compute_period(&quarter(25, 40)).unwrap();
    assert_eq!(calc.summarize(25, 40).unwrap(), direct);
}

#[test]
fn more_matches_never_shrink_the_pool() {
    let calc = PrizePoolCalculator::default();
    let mut last = 0.0;
    for matches in 0..200 {
        let total = calc.compute_period(&quarter(18, matches)).unwrap().total_prize_pool;
        assert!(total >= last, "{matches} matches: {total} < {last}");
        last = total;
    }
}

#[test]
fn paid_places_have_a_floor_of_two() {
    let calc = PrizePoolCalculator::default();
    assert_eq!(calc.places_to_pay(0), 2);
    assert_eq!(calc.places_to_pay(5), 2);
    assert_eq!(calc.places_to_pay(13), 2);
    assert_eq!(calc.places_to_pay(14), 3);
    // 20 * 15% is exactly 3, no float overshoot.
    assert_eq!(calc.places_to_pay(20), 3);
    assert_eq!(calc.places_to_pay(27), 5);
}

#[test]
fn small_field_pays_two_places_and_reports_the_rest() {
    let s = PrizePoolCalculator::default().summarize(10, 0).unwrap();
    assert_money(s.placement_pool, 220.0);
    assert_eq!(s.places_to_pay, 2);
    assert_eq!(s.payout_table.len(), 2);
    assert_money(s.payout_for_rank(1).unwrap(), 88.0);
    assert_money(s.payout_for_rank(2).unwrap(), 66.0);
    assert_eq!(s.payout_for_rank(3), None);
    assert_money(s.unallocated_placement, 66.0);
    assert_money(s.climber_award, 10.0);
    assert_money(s.rounding_drift, 0.0);
}

#[test]
fn drift_accounts_for_unallocated_placement() {
    let s = PrizePoolCalculator::default().summarize(10, 0).unwrap();
    let paid: f64 = s.payout_table.iter().map(|r| r.amount).sum();
    assert_money(paid, 154.0);
    assert_money(
        s.rounding_drift,
        s.total_prize_pool - (paid + s.climber_award + s.unallocated_placement),
    );
    assert_money(s.rounding_drift, 0.0);
}

#[test]
fn absurd_schedule_does_not_overflow() {
    let calc = PrizePoolCalculator::new(PrizePoolConfig {
        payout_schedule: vec![u32::MAX, 1],
        ..PrizePoolConfig::default()
    });
    let s = calc.summarize(10, 0).unwrap();
    assert_eq!(s.payout_table.len(), 2);
    assert_money(s.unallocated_placement, 0.0);
}

#[test]
fn big_field_flags_places_without_a_percentage() {
    let s = PrizePoolCalculator::default().summarize(40, 10).unwrap();
    assert_eq!(s.places_to_pay, 6);
    assert_eq!(s.payout_table.len(), 4);
    assert_eq!(s.unscheduled_places, 2);
    assert_eq!(s.payout_table.last().map(|r| r.rank), Some(4));
}

#[test]
fn empty_ladder_still_builds_a_table() {
    let s = PrizePoolCalculator::default().summarize(0, 0).unwrap();
    assert_money(s.total_prize_pool, 0.0);
    assert_eq!(s.payout_table.len(), 2);
    assert!(s.payout_table.iter().all(|r| r.amount == 0.0));
}

#[test]
fn rounding_drift_is_reported_not_corrected() {
    let period = PrizePoolPeriod {
        active_player_count: 1,
        completed_match_count: 1,
        membership_fee_per_player_per_month: 0.0,
        period_length_months: 1,
        placement_seed_per_player: 0.0,
        climber_seed_per_player: 0.0,
        match_fee_to_placement: 0.01,
        match_fee_to_climber: 0.0,
    };
    let s = PrizePoolCalculator::default().compute_period(&period).unwrap();
    assert_money(s.total_prize_pool, 0.01);
    assert_money(s.payout_for_rank(1).unwrap(), 0.0);
    assert_money(s.rounding_drift, 0.01);
}

#[test]
fn custom_schedule_changes_the_split() {
    let calc = PrizePoolCalculator::new(PrizePoolConfig {
        payout_schedule: vec![50, 30, 20],
        ..PrizePoolConfig::default()
    });
    let s = calc.summarize(25, 40).unwrap();
    assert_eq!(s.payout_table.len(), 3);
    assert_eq!(s.unscheduled_places, 1);
    assert_money(s.payout_for_rank(1).unwrap(), 325.0);
}

#[test]
fn negative_or_missing_rates_are_rejected() {
    let calc = PrizePoolCalculator::default();

    let mut bad = quarter(10, 5);
    bad.match_fee_to_climber = -0.5;
    assert!(matches!(calc.compute_period(&bad), Err(LeagueError::InvalidInput(_))));

    let mut bad = quarter(10, 5);
    bad.membership_fee_per_player_per_month = f64::NAN;
    assert!(matches!(calc.compute_period(&bad), Err(LeagueError::InvalidInput(_))));

    let mut bad = quarter(10, 5);
    bad.period_length_months = 0;
    assert!(matches!(calc.compute_period(&bad), Err(LeagueError::InvalidInput(_))));
}
