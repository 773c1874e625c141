use std::path::PathBuf;

use anyhow::{Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;

use squad_compare::config::DEFAULT_PLAYERS_CSV;
use squad_compare::dataset::load_and_sanitize;
use squad_compare::demo_data::{generate_rows, write_csv};

const DEFAULT_PER_CLUB: usize = 26;
const DEFAULT_SEED: u64 = 2018;

fn main() -> Result<()> {
    let out = arg_value("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAYERS_CSV));
    let per_club = match arg_value("per-club") {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| anyhow!("--per-club expects a number, got {raw:?}"))?,
        None => DEFAULT_PER_CLUB,
    };
    if per_club == 0 {
        return Err(anyhow!("--per-club must be at least 1"));
    }
    let seed = match arg_value("seed") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| anyhow!("--seed expects a number, got {raw:?}"))?,
        None => DEFAULT_SEED,
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let rows = generate_rows(&mut rng, per_club);
    write_csv(&out, &rows)?;

    let kept = load_and_sanitize(rows.iter().cloned()).len();
    println!("Demo dataset written");
    println!("File: {}", out.display());
    println!("Rows: {} (seed {seed})", rows.len());
    println!("Rows surviving sanitation: {kept}");
    Ok(())
}

fn arg_value(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
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
