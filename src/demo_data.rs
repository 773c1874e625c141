use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::dataset::RawPlayerRow;

const DEMO_CLUBS: &[&str] = &[
    "Atletico Norte",
    "Real Costa",
    "Sporting Vale",
    "Dynamo Ridge",
    "Olympique Rive",
    "FC Harbour",
];
const FIRST_NAMES: &[&str] = &[
    "Joao", "Luca", "Mateo", "Kai", "Noah", "Rafa", "Ivan", "Theo", "Omar", "Sami", "Leo", "Hugo",
];
const LAST_NAMES: &[&str] = &[
    "Silva", "Moreau", "Kovac", "Bauer", "Santos", "Romero", "Novak", "Lind", "Costa", "Haddad",
    "Brandt", "Ferreira", "Okafor", "Duarte",
];
const NATIONALITIES: &[&str] = &["Brazil", "Spain", "Germany", "Nigeria", "Croatia", "Japan"];
const POSITIONS: &[&str] = &[
    "GK", "CB", "LB", "RB", "CDM", "CM", "CAM", "LM", "RM", "LW", "RW", "ST", "CF",
];

/// Synthetic squads shaped like a scraped ratings export, including the
/// usual dirt: blank cells, text in numeric columns, mixed value units.
pub fn generate_rows(rng: &mut impl Rng, players_per_club: usize) -> Vec<RawPlayerRow> {
    let mut rows = Vec::with_capacity(DEMO_CLUBS.len() * players_per_club);
    let mut next_id = 100_000u32;
    for (club_idx, club) in DEMO_CLUBS.iter().enumerate() {
        let club_base = 82 - (club_idx as i32) * 2;
        for _ in 0..players_per_club {
            next_id += 1;
            rows.push(random_row(rng, next_id, club, club_base));
        }
    }
    rows
}

fn random_row(rng: &mut impl Rng, id: u32, club: &str, club_base: i32) -> RawPlayerRow {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    let position = POSITIONS.choose(rng).copied().unwrap_or("CM");
    let overall = (club_base + rng.gen_range(-12..=8)).clamp(45, 94);
    let age = rng.gen_range(17..=36);
    let potential = (overall + rng.gen_range(0..=10) - if age > 29 { 6 } else { 0 }).max(overall);
    let value_m = (overall as f64 - 55.0).max(0.5) * rng.gen_range(0.2..1.6);

    let value = if value_m >= 1.0 {
        format!("€{value_m:.1}M")
    } else {
        format!("€{:.0}K", value_m * 1000.0)
    };
    let nationality = NATIONALITIES.choose(rng).copied().unwrap_or("Spain");
    let with_skills = rng.gen_bool(0.8);

    let mut row = RawPlayerRow {
        id: Some(id.to_string()),
        name: Some(format!("{first} {last}")),
        club: Some(club.to_string()),
        age: Some(age.to_string()),
        overall: Some(overall.to_string()),
        potential: Some(potential.to_string()),
        value: Some(value),
        position: Some(format!("<span class=\"pos pos{}\">{position}</span>", id % 30)),
        club_logo: Some(format!(
            "https://cdn.example.invalid/logos/{}.png",
            club.to_lowercase().replace(' ', "-")
        )),
        photo: Some(format!("https://cdn.example.invalid/players/{id}.png")),
        nationality: Some(nationality.to_string()),
        preferred_foot: Some(if rng.gen_bool(0.75) { "Right" } else { "Left" }.to_string()),
        international_reputation: Some(rng.gen_range(1..=5).to_string()),
        wage: Some(format!("€{}K", rng.gen_range(5..=300))),
        ..RawPlayerRow::default()
    };
    if with_skills {
        row.pace = skill(rng, overall);
        row.shooting = skill(rng, overall);
        row.passing = skill(rng, overall);
        row.dribbling = skill(rng, overall);
        row.defending = skill(rng, overall);
        row.physical = skill(rng, overall);
    }

    // Roughly one row in eight gets damaged the way scraped exports usually are.
    match rng.gen_range(0..40) {
        0 => row.club = None,
        1 => row.age = Some("N/A".to_string()),
        2 => row.overall = Some("0".to_string()),
        3 => row.value = None,
        4 => row.position = None,
        _ => {}
    }
    row
}

fn skill(rng: &mut impl Rng, overall: i32) -> Option<String> {
    Some((overall + rng.gen_range(-15..=10)).clamp(20, 99).to_string())
}

pub fn write_csv(path: &Path, rows: &[RawPlayerRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create csv {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("write csv row")?;
    }
    writer.flush().context("flush csv")?;
    Ok(())
}
