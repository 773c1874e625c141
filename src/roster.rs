use serde::Serialize;

use crate::dataset::{PlayerRecord, PlayerTable};

pub const STARTING_ELEVEN: usize = 11;
pub const FORMATION_NAME: &str = "4-3-3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormationSlot {
    pub x: f64,
    pub y: f64,
    pub role: Role,
}

const fn slot(x: f64, y: f64, role: Role) -> FormationSlot {
    FormationSlot { x, y, role }
}

/// 4-3-3 on a 100 x 90 pitch, own goal at y = 0. Index order is the rank
/// order players are paired with.
pub const FORMATION_433: [FormationSlot; STARTING_ELEVEN] = [
    slot(50.0, 5.0, Role::Goalkeeper),
    slot(20.0, 25.0, Role::Defender),
    slot(40.0, 25.0, Role::Defender),
    slot(60.0, 25.0, Role::Defender),
    slot(80.0, 25.0, Role::Defender),
    slot(30.0, 50.0, Role::Midfielder),
    slot(50.0, 50.0, Role::Midfielder),
    slot(70.0, 50.0, Role::Midfielder),
    slot(25.0, 75.0, Role::Attacker),
    slot(50.0, 85.0, Role::Attacker),
    slot(75.0, 75.0, Role::Attacker),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotAssignment<'a> {
    pub slot: FormationSlot,
    pub player: &'a PlayerRecord,
}

/// Stable sort by overall, highest first. Equal overalls keep input order.
pub fn rank_by_overall(mut players: Vec<&PlayerRecord>) -> Vec<&PlayerRecord> {
    players.sort_by(|a, b| b.overall.total_cmp(&a.overall));
    players
}

/// The club's eleven best players by overall (fewer if the squad is short).
pub fn select_starting_eleven<'a>(table: &'a PlayerTable, club: &str) -> Vec<&'a PlayerRecord> {
    let mut ranked = rank_by_overall(table.club_players(club).collect());
    ranked.truncate(STARTING_ELEVEN);
    ranked
}

/// Pair ranked players with the 4-3-3 slots by index: the best player takes
/// the goalkeeper slot, the next four defence, then three midfield and three
/// attack. Player positions are not consulted, so a top-rated defender can
/// land in an attacking slot.
pub fn assign_formation<'a>(players: &[&'a PlayerRecord]) -> Vec<SlotAssignment<'a>> {
    FORMATION_433
        .iter()
        .zip(players)
        .map(|(slot, player)| SlotAssignment {
            slot: *slot,
            player: *player,
        })
        .collect()
}

pub fn lineup_mean_overall(players: &[&PlayerRecord]) -> Option<f64> {
    if players.is_empty() {
        return None;
    }
    Some(players.iter().map(|p| p.overall).sum::<f64>() / players.len() as f64)
}

/// Pitch marker text: last word of the name, at most six characters.
pub fn short_label(name: &str) -> String {
    name.split_whitespace()
        .last()
        .unwrap_or(name)
        .chars()
        .take(6)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_label_takes_surname_prefix() {
        assert_eq!(short_label("Cristiano Ronaldo"), "Ronald");
        assert_eq!(short_label("Neymar"), "Neymar");
        assert_eq!(short_label("K. De Bruyne"), "Bruyne");
        assert_eq!(short_label(""), "");
    }

    #[test]
    fn formation_roles_follow_rank_bands() {
        let roles: Vec<Role> = FORMATION_433.iter().map(|s| s.role).collect();
        assert_eq!(roles[0], Role::Goalkeeper);
        assert!(roles[1..5].iter().all(|r| *r == Role::Defender));
        assert!(roles[5..8].iter().all(|r| *r == Role::Midfielder));
        assert!(roles[8..].iter().all(|r| *r == Role::Attacker));
    }
}
