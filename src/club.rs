use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::dataset::{PlayerRecord, PlayerTable};
use crate::position::extract_position;
use crate::roster::rank_by_overall;
use crate::value::parse_value;

pub const PLACEHOLDER_LOGO_URL: &str = "https://via.placeholder.com/120x120/2a5298/white?text=FC";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubSummary {
    pub club: String,
    pub players: usize,
    /// `NaN` when the club has no rows.
    pub mean_overall: f64,
    /// Sum of parsed market values, in millions.
    pub total_value: f64,
    pub logo_url: String,
}

pub fn aggregate(table: &PlayerTable, club: &str) -> ClubSummary {
    summarize(club, table.club_players(club))
}

fn summarize<'a>(club: &str, players: impl Iterator<Item = &'a PlayerRecord>) -> ClubSummary {
    let mut count = 0usize;
    let mut overall_sum = 0.0;
    let mut total_value = 0.0;
    let mut logo_url: Option<&str> = None;
    for p in players {
        count += 1;
        overall_sum += p.overall;
        total_value += parse_value(Some(&p.value_raw));
        if logo_url.is_none() && p.logo_url.starts_with("http") {
            logo_url = Some(p.logo_url.as_str());
        }
    }
    ClubSummary {
        club: club.to_string(),
        players: count,
        mean_overall: mean_or_nan(overall_sum, count),
        total_value,
        logo_url: logo_url.unwrap_or(PLACEHOLDER_LOGO_URL).to_string(),
    }
}

/// Every club in the table, strongest mean overall first.
pub fn club_rankings(table: &PlayerTable) -> Vec<ClubSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&PlayerRecord>> = HashMap::new();
    for p in table.records() {
        let entry = groups.entry(p.club.as_str()).or_default();
        if entry.is_empty() {
            order.push(p.club.as_str());
        }
        entry.push(p);
    }

    let mut out: Vec<ClubSummary> = order
        .into_iter()
        .map(|club| {
            let players = groups.get(club).map(Vec::as_slice).unwrap_or_default();
            summarize(club, players.iter().copied())
        })
        .collect();
    out.sort_by(|a, b| b.mean_overall.total_cmp(&a.mean_overall));
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SideStats {
    pub mean_overall: f64,
    pub mean_age: f64,
    /// Over players with a known potential only.
    pub mean_potential: f64,
    pub players: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubComparison {
    pub left: String,
    pub right: String,
    pub left_stats: SideStats,
    pub right_stats: SideStats,
}

impl ClubComparison {
    pub fn overall_delta(&self) -> f64 {
        self.left_stats.mean_overall - self.right_stats.mean_overall
    }

    pub fn age_delta(&self) -> f64 {
        self.left_stats.mean_age - self.right_stats.mean_age
    }

    pub fn potential_delta(&self) -> f64 {
        self.left_stats.mean_potential - self.right_stats.mean_potential
    }

    pub fn players_delta(&self) -> i64 {
        self.left_stats.players as i64 - self.right_stats.players as i64
    }
}

pub fn compare_clubs(table: &PlayerTable, left: &str, right: &str) -> ClubComparison {
    ClubComparison {
        left: left.to_string(),
        right: right.to_string(),
        left_stats: side_stats(table, left),
        right_stats: side_stats(table, right),
    }
}

fn side_stats(table: &PlayerTable, club: &str) -> SideStats {
    let mut n = 0usize;
    let mut overall = 0.0;
    let mut age = 0.0;
    let mut potential = 0.0;
    let mut potential_n = 0usize;
    for p in table.club_players(club) {
        n += 1;
        overall += p.overall;
        age += p.age;
        if let Some(v) = p.potential {
            potential += v;
            potential_n += 1;
        }
    }
    SideStats {
        mean_overall: mean_or_nan(overall, n),
        mean_age: mean_or_nan(age, n),
        mean_potential: mean_or_nan(potential, potential_n),
        players: n,
    }
}

pub fn top_players<'a>(table: &'a PlayerTable, club: &str, n: usize) -> Vec<&'a PlayerRecord> {
    let mut players = rank_by_overall(table.club_players(club).collect());
    players.truncate(n);
    players
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionStrength {
    pub position: String,
    pub left: f64,
    pub right: f64,
}

/// Mean overall per extracted position for two clubs. A side without players
/// at a position reports `0.0` there.
pub fn position_strength(table: &PlayerTable, left: &str, right: &str) -> Vec<PositionStrength> {
    let left_means = position_means(table, left);
    let right_means = position_means(table, right);
    let mut positions: Vec<&String> = left_means.keys().chain(right_means.keys()).collect();
    positions.sort();
    positions.dedup();
    positions
        .into_iter()
        .map(|pos| PositionStrength {
            position: pos.clone(),
            left: left_means.get(pos).copied().unwrap_or(0.0),
            right: right_means.get(pos).copied().unwrap_or(0.0),
        })
        .collect()
}

fn position_means(table: &PlayerTable, club: &str) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for p in table.club_players(club) {
        let slot = sums
            .entry(extract_position(Some(&p.position_raw)))
            .or_insert((0.0, 0));
        slot.0 += p.overall;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(pos, (sum, n))| (pos, mean_or_nan(sum, n)))
        .collect()
}

/// Fixed-width histogram over `[min, max]`; values outside the range are
/// clamped into the edge bins.
pub fn distribution(values: &[f64], bins: usize, min: f64, max: f64) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    if bins == 0 || !(max > min) {
        return counts;
    }
    let width = (max - min) / bins as f64;
    for v in values.iter().filter(|v| v.is_finite()) {
        let idx = ((v - min) / width).floor();
        let idx = idx.clamp(0.0, (bins - 1) as f64) as usize;
        counts[idx] += 1;
    }
    counts
}

fn mean_or_nan(sum: f64, n: usize) -> f64 {
    if n == 0 { f64::NAN } else { sum / n as f64 }
}
