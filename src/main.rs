use std::env;
use std::fs;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use pool_league::config::LeagueConfig;
use pool_league::model::{LadderName, PlayerLadderEntry};
use pool_league::prize::PeriodWindow;
use pool_league::services::{InMemoryDirectory, StandingsService, SystemClock};
use pool_league::util::format_currency;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pool_league=info,warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

fn matches_env_key(ladder: LadderName) -> String {
    format!("LEAGUE_MATCHES_{}", ladder.id().to_uppercase().replace('-', "_"))
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG may come from .env, so load it before the subscriber reads the filter.
    dotenv::dotenv().ok();
    init_tracing();
    let config = LeagueConfig::from_env().context("loading league configuration")?;

    let roster_path = env::var("LEAGUE_ROSTER_PATH").unwrap_or_else(|_| "roster.json".to_string());
    let raw = fs::read_to_string(&roster_path)
        .with_context(|| format!("reading roster from {roster_path}"))?;
    let entries: Vec<PlayerLadderEntry> =
        serde_json::from_str(&raw).with_context(|| format!("parsing roster {roster_path}"))?;
    info!(target = "report", players = entries.len(), path = %roster_path, "roster loaded");

    let mut directory = InMemoryDirectory::new(entries)?;
    for ladder in LadderName::ALL {
        let key = matches_env_key(ladder);
        if let Ok(v) = env::var(&key) {
            let completed: u32 = v
                .trim()
                .parse()
                .with_context(|| format!("{key} must be a match count"))?;
            directory = directory.with_matches(ladder, completed);
        }
    }

    let period = match env::var("LEAGUE_SEASON_ANCHOR") {
        Ok(v) => {
            let anchor = NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                .with_context(|| format!("LEAGUE_SEASON_ANCHOR={v} is not YYYY-MM-DD"))?;
            Some(PeriodWindow::containing(
                anchor,
                config.prize.period_length_months,
                Utc::now().date_naive(),
            )?)
        }
        Err(_) => None,
    };

    let mut service = StandingsService::new(directory, SystemClock, &config);
    if let Some(window) = period {
        println!(
            "Prize period {} to {} ({} days remaining)",
            window.start,
            window.end,
            window.days_remaining(Utc::now().date_naive())
        );
    }

    for ladder in LadderName::ALL {
        let summary = match service.prize_summary(ladder) {
            Ok(s) => s,
            Err(e) => {
                warn!(target = "report", ladder = %ladder, error = ?e, "summary failed");
                continue;
            }
        };
        println!("\n== {} ==", ladder.title());
        println!("  Placement pool: {}", format_currency(summary.placement_pool));
        println!("  Climber fund:   {}", format_currency(summary.climber_fund));
        println!("  Total:          {}", format_currency(summary.total_prize_pool));
        for row in &summary.payout_table {
            println!(
                "  #{:<2} {:>3}%  {}",
                row.rank,
                row.percentage_of_placement_pool,
                format_currency(row.amount)
            );
        }
        if summary.unscheduled_places > 0 {
            println!(
                "  ({} paid places have no scheduled percentage)",
                summary.unscheduled_places
            );
        }
    }
    Ok(())
}
