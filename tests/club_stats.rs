use std::path::PathBuf;

use squad_compare::club::{
    PLACEHOLDER_LOGO_URL, aggregate, club_rankings, compare_clubs, distribution,
    position_strength, top_players,
};
use squad_compare::dataset::{PlayerTable, RawPlayerRow, load_and_sanitize, read_players_csv};
use squad_compare::value::parse_value;

fn fixture_table() -> PlayerTable {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("players.csv");
    read_players_csv(&path).expect("fixture should load").0
}

#[test]
fn aggregate_sums_parsed_values() {
    let table = fixture_table();
    let harbour = aggregate(&table, "FC Harbour");
    assert_eq!(harbour.players, 3);
    assert!((harbour.mean_overall - 87.0).abs() < 1e-9);
    assert!((harbour.total_value - 188.0).abs() < 1e-6);
    assert_eq!(harbour.logo_url, "https://img.invalid/c/harbour.png");

    let expected: f64 = table
        .club_players("Real Costa")
        .map(|p| parse_value(Some(&p.value_raw)))
        .sum();
    let costa = aggregate(&table, "Real Costa");
    assert!((costa.total_value - expected).abs() < 1e-6);
    assert!((costa.total_value - 75.0).abs() < 1e-6);
}

#[test]
fn unknown_club_has_nan_mean_and_placeholder_logo() {
    let table = fixture_table();
    let summary = aggregate(&table, "Nowhere United");
    assert_eq!(summary.players, 0);
    assert!(summary.mean_overall.is_nan());
    assert_eq!(summary.total_value, 0.0);
    assert_eq!(summary.logo_url, PLACEHOLDER_LOGO_URL);
}

#[test]
fn logo_skips_non_http_entries() {
    let table = load_and_sanitize(vec![
        RawPlayerRow {
            name: Some("A".to_string()),
            club: Some("Lisbon FC".to_string()),
            age: Some("20".to_string()),
            overall: Some("70".to_string()),
            club_logo: Some("/local/logo.png".to_string()),
            ..RawPlayerRow::default()
        },
        RawPlayerRow {
            name: Some("B".to_string()),
            club: Some("Lisbon FC".to_string()),
            age: Some("21".to_string()),
            overall: Some("71".to_string()),
            club_logo: Some("https://img.invalid/lisbon.png".to_string()),
            ..RawPlayerRow::default()
        },
    ]);
    assert_eq!(
        aggregate(&table, "Lisbon FC").logo_url,
        "https://img.invalid/lisbon.png"
    );
}

#[test]
fn rankings_order_clubs_by_mean_overall() {
    let table = fixture_table();
    let clubs: Vec<String> = club_rankings(&table).into_iter().map(|c| c.club).collect();
    assert_eq!(clubs, vec!["FC Harbour", "Real Costa", "Sporting Vale"]);
}

#[test]
fn comparison_reports_side_means_and_deltas() {
    let table = fixture_table();
    let cmp = compare_clubs(&table, "FC Harbour", "Real Costa");
    assert!((cmp.overall_delta() - (87.0 - 236.0 / 3.0)).abs() < 1e-9);
    assert!((cmp.age_delta() - 1.0).abs() < 1e-9);
    assert!((cmp.left_stats.mean_potential - 271.0 / 3.0).abs() < 1e-9);
    assert!((cmp.right_stats.mean_potential - 86.0).abs() < 1e-9);
    assert_eq!(cmp.players_delta(), 0);
}

#[test]
fn position_strength_fills_missing_sides_with_zero() {
    let table = fixture_table();
    let rows = position_strength(&table, "FC Harbour", "Real Costa");
    let positions: Vec<&str> = rows.iter().map(|r| r.position.as_str()).collect();
    assert_eq!(positions, vec!["CB", "CM", "GK", "N/A", "RW", "ST"]);
    let cb = &rows[0];
    assert_eq!((cb.left, cb.right), (79.0, 0.0));
    let gk = &rows[2];
    assert_eq!((gk.left, gk.right), (0.0, 86.0));
}

#[test]
fn top_players_are_ranked_and_capped() {
    let table = fixture_table();
    let top = top_players(&table, "Real Costa", 2);
    let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Hugo Santos", "Marco Novak"]);
}

#[test]
fn distribution_clamps_into_edge_bins() {
    let counts = distribution(&[60.0, 65.0, 69.9, 70.0, 99.0, 120.0, f64::NAN], 4, 60.0, 100.0);
    assert_eq!(counts, vec![3, 1, 0, 2]);
    assert_eq!(distribution(&[1.0], 0, 0.0, 1.0), Vec::<usize>::new());
    assert_eq!(distribution(&[1.0], 3, 5.0, 5.0), vec![0, 0, 0]);
}
