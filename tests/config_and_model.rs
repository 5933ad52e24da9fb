use std::collections::HashMap;

use pool_league::config::LeagueConfig;
use pool_league::constants::{MAX_CHALLENGE_UP, PAYOUT_SCHEDULE, STANDINGS_REFRESH_SECS};
use pool_league::{ChallengeType, LadderName, LeagueError, PlayerLadderEntry};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_match_constants() {
    let cfg = LeagueConfig::default();
    assert_eq!(cfg.rules.max_challenge_up, MAX_CHALLENGE_UP);
    assert_eq!(cfg.prize.payout_schedule, PAYOUT_SCHEDULE.to_vec());
    assert_eq!(cfg.refresh_secs, STANDINGS_REFRESH_SECS);
    assert!(cfg.validate().is_ok());
}

#[test]
fn lookup_overrides_individual_fields() {
    let cfg = LeagueConfig::from_lookup(lookup(&[
        ("LEAGUE_MAX_CHALLENGE_UP", "3"),
        ("LEAGUE_MATCH_FEE_PLACEMENT", " 3.25 "),
        ("LEAGUE_PAYOUT_SCHEDULE", "50, 30, 20"),
        ("LEAGUE_REFRESH_SECS", ""),
    ]))
    .unwrap();
    assert_eq!(cfg.rules.max_challenge_up, 3);
    assert_eq!(cfg.prize.match_fee_to_placement, 3.25);
    assert_eq!(cfg.prize.payout_schedule, vec![50, 30, 20]);
    assert_eq!(cfg.refresh_secs, STANDINGS_REFRESH_SECS);
    assert_eq!(cfg.rules.max_smackdown_down, 5);
}

#[test]
fn unparseable_override_is_a_config_error() {
    let err = LeagueConfig::from_lookup(lookup(&[("LEAGUE_PERIOD_MONTHS", "quarterly")])).unwrap_err();
    assert!(matches!(err, LeagueError::Config(msg) if msg.contains("LEAGUE_PERIOD_MONTHS")));

    let err = LeagueConfig::from_lookup(lookup(&[("LEAGUE_PAYOUT_SCHEDULE", "40,x")])).unwrap_err();
    assert!(matches!(err, LeagueError::Config(_)));
}

#[test]
fn overfull_schedule_is_rejected() {
    let err = LeagueConfig::from_lookup(lookup(&[("LEAGUE_PAYOUT_SCHEDULE", "60,50")])).unwrap_err();
    assert!(matches!(err, LeagueError::Config(_)));
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = LeagueConfig::from_json_str(
        r#"{ "prize": { "paid_places_percent": 20 }, "refresh_secs": 5 }"#,
    )
    .unwrap();
    assert_eq!(cfg.prize.paid_places_percent, 20);
    assert_eq!(cfg.prize.placement_seed_per_player, 7.0);
    assert_eq!(cfg.refresh_secs, 5);

    assert!(LeagueConfig::from_json_str(r#"{ "dues": { "prize_fund_percent": 90 } }"#).is_err());
    assert!(LeagueConfig::from_json_str("not json").is_err());
}

#[test]
fn ladder_ids_parse_and_map_from_rating() {
    assert_eq!("499-UNDER".parse::<LadderName>().unwrap(), LadderName::Under500);
    assert_eq!(" 550-plus ".parse::<LadderName>().unwrap(), LadderName::From550);
    assert_eq!(
        "600-plus".parse::<LadderName>().unwrap_err(),
        LeagueError::UnknownLadder("600-plus".into())
    );
    assert_eq!(LadderName::for_rating(499), LadderName::Under500);
    assert_eq!(LadderName::for_rating(500), LadderName::From500To549);
    assert_eq!(LadderName::for_rating(549), LadderName::From500To549);
    assert_eq!(LadderName::for_rating(550), LadderName::From550);
    assert_eq!(LadderName::From500To549.to_string(), "500-549");
    assert_eq!(ChallengeType::FastTrack.to_string(), "fast-track");
}

#[test]
fn roster_records_deserialize_with_defaults() {
    let raw = r#"[
        { "playerId": "p1", "userId": "u1", "email": "one@league.test",
          "name": "One", "ladderName": "500-549", "position": 1,
          "immunityUntil": "2026-10-08T18:00:00Z" },
        { "name": "Vacant", "ladderName": "500-549", "position": 2, "isActive": false }
    ]"#;
    let entries: Vec<PlayerLadderEntry> = serde_json::from_str(raw).unwrap();
    assert!(entries[0].has_linked_account());
    assert!(entries[0].is_active);
    assert!(entries[0].immunity_until.is_some());
    assert_eq!(entries[0].fast_track_challenges_remaining, 0);
    assert!(!entries[1].has_linked_account());
    assert!(!entries[1].is_active);
    assert_eq!(entries[1].ladder_name, LadderName::From500To549);
}

#[test]
fn huge_percentages_are_errors_not_overflow() {
    let err = LeagueConfig::from_lookup(lookup(&[("LEAGUE_PAYOUT_SCHEDULE", "4294967295,1")]))
        .unwrap_err();
    assert!(matches!(err, LeagueError::Config(msg) if msg.contains("payout schedule")));

    let err = LeagueConfig::from_lookup(lookup(&[
        ("LEAGUE_DUES_PRIZE_PERCENT", "4294967295"),
        ("LEAGUE_DUES_OPS_PERCENT", "1"),
    ]))
    .unwrap_err();
    assert!(matches!(err, LeagueError::Config(msg) if msg.contains("dues split")));
}

#[test]
fn grant_lengths_must_be_non_negative_and_bounded() {
    for key in ["LEAGUE_IMMUNITY_DAYS", "LEAGUE_SMACKBACK_DAYS", "LEAGUE_FAST_TRACK_WEEKS"] {
        let err = LeagueConfig::from_lookup(lookup(&[(key, "-1")])).unwrap_err();
        assert!(matches!(err, LeagueError::Config(_)), "{key}");
    }
    let err = LeagueConfig::from_lookup(lookup(&[("LEAGUE_IMMUNITY_DAYS", "9223372036854775807")]))
        .unwrap_err();
    assert!(matches!(err, LeagueError::Config(msg) if msg.contains("immunity_days")));

    let cfg = LeagueConfig::from_lookup(lookup(&[("LEAGUE_SMACKBACK_DAYS", "0")])).unwrap();
    assert_eq!(cfg.rules.smackback_days, 0);
}
