use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_VALUE_RAW: &str = "€0M";
pub const DEFAULT_POSITION_RAW: &str = "<span class=\"pos\">N/A</span>";

/// One CSV row exactly as read: every cell optional, nothing coerced yet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawPlayerRow {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Club")]
    pub club: Option<String>,
    #[serde(rename = "Age")]
    pub age: Option<String>,
    #[serde(rename = "Overall")]
    pub overall: Option<String>,
    #[serde(rename = "Potential")]
    pub potential: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
    #[serde(rename = "Position")]
    pub position: Option<String>,
    #[serde(rename = "Club Logo", alias = "Club_Logo")]
    pub club_logo: Option<String>,
    #[serde(rename = "Photo")]
    pub photo: Option<String>,
    #[serde(rename = "Nationality")]
    pub nationality: Option<String>,
    #[serde(rename = "Preferred_Foot", alias = "Preferred Foot")]
    pub preferred_foot: Option<String>,
    #[serde(rename = "International_Reputation", alias = "International Reputation")]
    pub international_reputation: Option<String>,
    #[serde(rename = "Wage")]
    pub wage: Option<String>,
    #[serde(rename = "Pace")]
    pub pace: Option<String>,
    #[serde(rename = "Shooting")]
    pub shooting: Option<String>,
    #[serde(rename = "Passing")]
    pub passing: Option<String>,
    #[serde(rename = "Dribbling")]
    pub dribbling: Option<String>,
    #[serde(rename = "Defending")]
    pub defending: Option<String>,
    #[serde(rename = "Physical")]
    pub physical: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SkillProfile {
    pub pace: Option<f64>,
    pub shooting: Option<f64>,
    pub passing: Option<f64>,
    pub dribbling: Option<f64>,
    pub defending: Option<f64>,
    pub physical: Option<f64>,
}

impl SkillProfile {
    /// Present skills in radar order.
    pub fn available(&self) -> Vec<(&'static str, f64)> {
        [
            ("Pace", self.pace),
            ("Shooting", self.shooting),
            ("Passing", self.passing),
            ("Dribbling", self.dribbling),
            ("Defending", self.defending),
            ("Physical", self.physical),
        ]
        .into_iter()
        .filter_map(|(label, v)| v.map(|v| (label, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.available().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub id: Option<u32>,
    pub name: String,
    pub club: String,
    pub age: f64,
    pub overall: f64,
    pub potential: Option<f64>,
    pub value_raw: String,
    pub position_raw: String,
    pub logo_url: String,
    pub photo_url: String,
    pub nationality: Option<String>,
    pub preferred_foot: Option<String>,
    pub international_reputation: Option<f64>,
    pub wage: Option<String>,
    pub skills: SkillProfile,
}

impl PlayerRecord {
    /// Back to the raw row shape, so a sanitized table can be fed through again.
    pub fn to_raw(&self) -> RawPlayerRow {
        let num = |v: Option<f64>| v.map(|v| v.to_string());
        let text = |s: &str| (!s.is_empty()).then(|| s.to_string());
        RawPlayerRow {
            id: self.id.map(|id| id.to_string()),
            name: Some(self.name.clone()),
            club: Some(self.club.clone()),
            age: Some(self.age.to_string()),
            overall: Some(self.overall.to_string()),
            potential: num(self.potential),
            value: Some(self.value_raw.clone()),
            position: Some(self.position_raw.clone()),
            club_logo: text(&self.logo_url),
            photo: text(&self.photo_url),
            nationality: self.nationality.clone(),
            preferred_foot: self.preferred_foot.clone(),
            international_reputation: num(self.international_reputation),
            wage: self.wage.clone(),
            pace: num(self.skills.pace),
            shooting: num(self.skills.shooting),
            passing: num(self.skills.passing),
            dribbling: num(self.skills.dribbling),
            defending: num(self.skills.defending),
            physical: num(self.skills.physical),
        }
    }
}

pub fn has_skill_profile(record: &PlayerRecord) -> bool {
    !record.skills.is_empty()
}

/// The canonical table. Only the sanitizer builds one, so every record in it
/// has a name, a club, a finite age and an overall above zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTable {
    records: Vec<PlayerRecord>,
}

impl PlayerTable {
    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clubs(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|p| p.club.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn club_players<'a>(&'a self, club: &str) -> impl Iterator<Item = &'a PlayerRecord> {
        self.records.iter().filter(move |p| p.club == club)
    }

    pub fn find_player(&self, club: &str, name: &str) -> Option<&PlayerRecord> {
        self.club_players(club).find(|p| p.name == name)
    }

    pub fn to_raw_rows(&self) -> Vec<RawPlayerRow> {
        self.records.iter().map(PlayerRecord::to_raw).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub malformed: usize,
    pub missing_name: usize,
    pub missing_club: usize,
    pub invalid_overall: usize,
    pub invalid_age: usize,
    pub value_defaulted: usize,
    pub position_defaulted: usize,
}

impl SanitizeReport {
    pub fn dropped(&self) -> usize {
        self.malformed
            + self.missing_name
            + self.missing_club
            + self.invalid_overall
            + self.invalid_age
    }

    pub fn summary(&self) -> String {
        let mut reasons = Vec::new();
        for (label, count) in [
            ("malformed", self.malformed),
            ("no name", self.missing_name),
            ("no club", self.missing_club),
            ("bad overall", self.invalid_overall),
            ("bad age", self.invalid_age),
        ] {
            if count > 0 {
                reasons.push(format!("{label} {count}"));
            }
        }
        if reasons.is_empty() {
            format!("Loaded {} players", self.rows_kept)
        } else {
            format!(
                "Loaded {} players (dropped {}: {})",
                self.rows_kept,
                self.dropped(),
                reasons.join(", ")
            )
        }
    }
}

/// Sanitize raw rows into the canonical table, discarding the diagnostics.
pub fn load_and_sanitize(rows: impl IntoIterator<Item = RawPlayerRow>) -> PlayerTable {
    sanitize_with_report(rows).0
}

pub fn sanitize_with_report(
    rows: impl IntoIterator<Item = RawPlayerRow>,
) -> (PlayerTable, SanitizeReport) {
    let mut report = SanitizeReport::default();
    let mut records = Vec::new();
    for row in rows {
        report.rows_read += 1;
        if let Some(record) = sanitize_row(row, &mut report) {
            records.push(record);
        }
    }
    report.rows_kept = records.len();
    (PlayerTable { records }, report)
}

fn sanitize_row(row: RawPlayerRow, report: &mut SanitizeReport) -> Option<PlayerRecord> {
    let Some(name) = required_text(row.name) else {
        report.missing_name += 1;
        return None;
    };
    let Some(club) = required_text(row.club) else {
        report.missing_club += 1;
        return None;
    };
    let Some(overall) = coerce_number(row.overall.as_deref()).filter(|v| *v > 0.0) else {
        report.invalid_overall += 1;
        return None;
    };
    let Some(age) = coerce_number(row.age.as_deref()) else {
        report.invalid_age += 1;
        return None;
    };

    let value_raw = required_text(row.value).unwrap_or_else(|| {
        report.value_defaulted += 1;
        DEFAULT_VALUE_RAW.to_string()
    });
    let position_raw = required_text(row.position).unwrap_or_else(|| {
        report.position_defaulted += 1;
        DEFAULT_POSITION_RAW.to_string()
    });

    Some(PlayerRecord {
        id: row.id.as_deref().and_then(|s| s.trim().parse::<u32>().ok()),
        name,
        club,
        age,
        overall,
        potential: coerce_number(row.potential.as_deref()),
        value_raw,
        position_raw,
        logo_url: optional_text(row.club_logo).unwrap_or_default(),
        photo_url: optional_text(row.photo).unwrap_or_default(),
        nationality: optional_text(row.nationality),
        preferred_foot: optional_text(row.preferred_foot),
        international_reputation: coerce_number(row.international_reputation.as_deref()),
        wage: optional_text(row.wage),
        skills: SkillProfile {
            pace: coerce_number(row.pace.as_deref()),
            shooting: coerce_number(row.shooting.as_deref()),
            passing: coerce_number(row.passing.as_deref()),
            dribbling: coerce_number(row.dribbling.as_deref()),
            defending: coerce_number(row.defending.as_deref()),
            physical: coerce_number(row.physical.as_deref()),
        },
    })
}

/// Non-blank text, kept as written.
fn required_text(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn coerce_number(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read and sanitize a comma-separated players file with a header row.
pub fn read_players_csv(path: &Path) -> Result<(PlayerTable, SanitizeReport)> {
    let file =
        File::open(path).with_context(|| format!("open players csv {}", path.display()))?;
    parse_players_csv(file).with_context(|| format!("read players csv {}", path.display()))
}

pub fn parse_players_csv<R: Read>(reader: R) -> Result<(PlayerTable, SanitizeReport)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut malformed = 0usize;
    for result in reader.deserialize::<RawPlayerRow>() {
        match result {
            Ok(row) => rows.push(row),
            Err(err) if err.is_io_error() => return Err(err).context("csv read failed"),
            Err(_) => malformed += 1,
        }
    }

    let (table, mut report) = sanitize_with_report(rows);
    report.rows_read += malformed;
    report.malformed = malformed;
    Ok((table, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_rejects_non_finite() {
        assert_eq!(coerce_number(Some(" 31 ")), Some(31.0));
        assert_eq!(coerce_number(Some("inf")), None);
        assert_eq!(coerce_number(Some("NaN")), None);
        assert_eq!(coerce_number(Some("thirty")), None);
        assert_eq!(coerce_number(None), None);
    }

    #[test]
    fn report_summary_lists_only_nonzero_reasons() {
        let report = SanitizeReport {
            rows_read: 5,
            rows_kept: 3,
            missing_club: 1,
            invalid_age: 1,
            ..SanitizeReport::default()
        };
        assert_eq!(report.dropped(), 2);
        assert_eq!(
            report.summary(),
            "Loaded 3 players (dropped 2: no club 1, bad age 1)"
        );
    }
}
