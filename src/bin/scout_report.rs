use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use squad_compare::club::{ClubSummary, club_rankings};
use squad_compare::config::AppConfig;
use squad_compare::dataset::{SanitizeReport, read_players_csv};
use squad_compare::rating::classify;
use squad_compare::scouting::{
    MAX_AGE_RANGE, MIN_OVERALL_RANGE, PositionFilter, ScoutQuery, ScoutResult, scout,
    scout_matches,
};
use squad_compare::value::{format_currency, format_millions};

#[derive(Serialize)]
struct Report<'a> {
    sanitize: &'a SanitizeReport,
    clubs: &'a [ClubSummary],
    query: &'a ScoutQuery,
    matches: usize,
    shortlist: &'a [ScoutResult<'a>],
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let config = AppConfig::from_env().with_cli_path(flag_value(&args, "csv"));
    let query = build_query(&args, &config)?;
    let json = args.iter().any(|a| a == "--json");

    let (table, report) = read_players_csv(&config.players_csv)
        .with_context(|| format!("load dataset {}", config.players_csv.display()))?;
    let clubs = club_rankings(&table);
    let matches = scout_matches(&table, &query);
    let shortlist = scout(&table, &query);

    if json {
        let out = Report {
            sanitize: &report,
            clubs: &clubs,
            query: &query,
            matches,
            shortlist: &shortlist,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("serialize report")?
        );
        return Ok(());
    }

    println!("{}", report.summary());
    println!();
    println!("Club rankings");
    for (idx, club) in clubs.iter().enumerate() {
        println!(
            "{:>3}. {:<28} overall {:>5.1}  value {:>10}  players {}",
            idx + 1,
            club.club,
            club.mean_overall,
            format_millions(club.total_value),
            club.players
        );
    }
    println!();
    println!(
        "Shortlist: overall >= {:.0}, age <= {:.0}, position {} ({} found)",
        query.min_overall,
        query.max_age,
        query.position.label(),
        matches
    );
    for r in &shortlist {
        let growth = r
            .potential_growth
            .map(|g| format!("{g:+.0}"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {:>3.0} {:<7} {:<26} {:<22} {:<4} age {:>2.0}  {:>9}  growth {}",
            r.player.overall,
            classify(r.player.overall).label(),
            r.player.name,
            r.player.club,
            r.position,
            r.player.age,
            format_currency(Some(&r.player.value_raw)),
            growth
        );
    }
    Ok(())
}

fn build_query(args: &[String], config: &AppConfig) -> Result<ScoutQuery> {
    let min_overall = match flag_value(args, "min-overall") {
        Some(raw) => raw
            .parse::<u8>()
            .map_err(|_| anyhow!("--min-overall expects a number, got {raw:?}"))?
            .clamp(MIN_OVERALL_RANGE.0, MIN_OVERALL_RANGE.1),
        None => config.scout_min_overall,
    };
    let max_age = match flag_value(args, "max-age") {
        Some(raw) => raw
            .parse::<u8>()
            .map_err(|_| anyhow!("--max-age expects a number, got {raw:?}"))?
            .clamp(MAX_AGE_RANGE.0, MAX_AGE_RANGE.1),
        None => config.scout_max_age,
    };
    let position = flag_value(args, "position")
        .filter(|p| !p.eq_ignore_ascii_case("all"))
        .map(|p| PositionFilter::Code(p.to_ascii_uppercase()))
        .unwrap_or_default();
    let exclude_clubs = flag_value(args, "exclude")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Ok(ScoutQuery {
        min_overall: f64::from(min_overall),
        max_age: f64::from(max_age),
        position,
        exclude_clubs,
    })
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    let flag = format!("--{name}");
    let prefix = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
