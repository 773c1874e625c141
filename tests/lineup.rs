use squad_compare::dataset::{PlayerTable, RawPlayerRow, load_and_sanitize};
use squad_compare::roster::{
    FORMATION_433, Role, STARTING_ELEVEN, assign_formation, lineup_mean_overall,
    select_starting_eleven,
};

fn squad(club: &str, overalls: &[u32]) -> Vec<RawPlayerRow> {
    overalls
        .iter()
        .enumerate()
        .map(|(idx, overall)| RawPlayerRow {
            name: Some(format!("Player {idx}")),
            club: Some(club.to_string()),
            age: Some("25".to_string()),
            overall: Some(overall.to_string()),
            ..RawPlayerRow::default()
        })
        .collect()
}

fn table_of(rows: Vec<RawPlayerRow>) -> PlayerTable {
    load_and_sanitize(rows)
}

#[test]
fn ties_keep_input_order() {
    let table = table_of(squad("Lisbon FC", &[80, 90, 80, 85]));
    let eleven = select_starting_eleven(&table, "Lisbon FC");
    let names: Vec<&str> = eleven.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Player 1", "Player 3", "Player 0", "Player 2"]);
}

#[test]
fn caps_at_eleven_best() {
    let overalls: Vec<u32> = (60..80).collect();
    let table = table_of(squad("Lisbon FC", &overalls));
    let eleven = select_starting_eleven(&table, "Lisbon FC");
    assert_eq!(eleven.len(), STARTING_ELEVEN);
    assert_eq!(eleven[0].overall, 79.0);
    assert_eq!(eleven[10].overall, 69.0);
    assert!(eleven.windows(2).all(|w| w[0].overall >= w[1].overall));
}

#[test]
fn only_the_requested_club_is_considered() {
    let mut rows = squad("Lisbon FC", &[70, 71]);
    rows.extend(squad("Porto SC", &[95, 96, 97]));
    let table = table_of(rows);
    let eleven = select_starting_eleven(&table, "Lisbon FC");
    assert_eq!(eleven.len(), 2);
    assert!(eleven.iter().all(|p| p.club == "Lisbon FC"));
    assert!(select_starting_eleven(&table, "Braga").is_empty());
}

#[test]
fn formation_pairs_by_rank_and_truncates() {
    let table = table_of(squad("Lisbon FC", &[70, 88, 75, 90, 66]));
    let eleven = select_starting_eleven(&table, "Lisbon FC");
    let slots = assign_formation(&eleven);
    assert_eq!(slots.len(), 5);
    assert_eq!(slots[0].slot.role, Role::Goalkeeper);
    assert_eq!(slots[0].player.overall, 90.0);
    assert_eq!((slots[0].slot.x, slots[0].slot.y), (50.0, 5.0));
    assert!(slots[1..].iter().all(|s| s.slot.role == Role::Defender));
    assert_eq!(slots[4].player.overall, 66.0);
}

#[test]
fn full_eleven_fills_every_slot() {
    let overalls: Vec<u32> = (70..85).collect();
    let table = table_of(squad("Lisbon FC", &overalls));
    let eleven = select_starting_eleven(&table, "Lisbon FC");
    let slots = assign_formation(&eleven);
    assert_eq!(slots.len(), FORMATION_433.len());
    let last = slots.last().expect("eleven slots");
    assert_eq!((last.slot.x, last.slot.y), (75.0, 75.0));
    assert_eq!(last.slot.role, Role::Attacker);
}

#[test]
fn lineup_mean_handles_empty() {
    assert_eq!(lineup_mean_overall(&[]), None);
    let table = table_of(squad("Lisbon FC", &[80, 90]));
    let eleven = select_starting_eleven(&table, "Lisbon FC");
    assert_eq!(lineup_mean_overall(&eleven), Some(85.0));
}
