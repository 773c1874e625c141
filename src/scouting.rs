use serde::Serialize;

use crate::dataset::{PlayerRecord, PlayerTable};
use crate::position::extract_position;
use crate::roster::rank_by_overall;

pub const SCOUT_LIMIT: usize = 10;
pub const MIN_OVERALL_RANGE: (u8, u8) = (60, 99);
pub const MAX_AGE_RANGE: (u8, u8) = (16, 40);
pub const DEFAULT_MIN_OVERALL: u8 = 75;
pub const DEFAULT_MAX_AGE: u8 = 28;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum PositionFilter {
    #[default]
    All,
    Code(String),
}

impl PositionFilter {
    pub fn matches(&self, position_raw: &str) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Code(code) => extract_position(Some(position_raw)) == *code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PositionFilter::All => "All",
            PositionFilter::Code(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutQuery {
    pub min_overall: f64,
    pub max_age: f64,
    pub position: PositionFilter,
    pub exclude_clubs: Vec<String>,
}

impl Default for ScoutQuery {
    fn default() -> Self {
        Self {
            min_overall: f64::from(DEFAULT_MIN_OVERALL),
            max_age: f64::from(DEFAULT_MAX_AGE),
            position: PositionFilter::All,
            exclude_clubs: Vec::new(),
        }
    }
}

impl ScoutQuery {
    pub fn accepts(&self, p: &PlayerRecord) -> bool {
        p.overall >= self.min_overall
            && p.age <= self.max_age
            && !self.exclude_clubs.iter().any(|c| *c == p.club)
            && self.position.matches(&p.position_raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outlook {
    Upside,
    Established,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutResult<'a> {
    pub player: &'a PlayerRecord,
    pub position: String,
    /// `potential - overall`; `None` when potential is unknown.
    pub potential_growth: Option<f64>,
    pub outlook: Outlook,
}

impl<'a> ScoutResult<'a> {
    fn new(player: &'a PlayerRecord) -> Self {
        let potential_growth = player.potential.map(|pot| pot - player.overall);
        let outlook = match potential_growth {
            Some(g) if g > 0.0 => Outlook::Upside,
            _ => Outlook::Established,
        };
        Self {
            player,
            position: extract_position(Some(&player.position_raw)),
            potential_growth,
            outlook,
        }
    }
}

/// Best candidates across the whole table, at most [`SCOUT_LIMIT`].
pub fn scout<'a>(table: &'a PlayerTable, query: &ScoutQuery) -> Vec<ScoutResult<'a>> {
    let candidates = table.records().iter().filter(|p| query.accepts(p)).collect();
    rank_by_overall(candidates)
        .into_iter()
        .take(SCOUT_LIMIT)
        .map(ScoutResult::new)
        .collect()
}

/// How many players pass the filter before truncation.
pub fn scout_matches(table: &PlayerTable, query: &ScoutQuery) -> usize {
    table.records().iter().filter(|p| query.accepts(p)).count()
}
