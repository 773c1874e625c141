use squad_compare::dataset::{
    DEFAULT_POSITION_RAW, DEFAULT_VALUE_RAW, RawPlayerRow, load_and_sanitize, sanitize_with_report,
};

fn row(name: &str, club: &str, age: &str, overall: &str) -> RawPlayerRow {
    RawPlayerRow {
        name: Some(name.to_string()),
        club: Some(club.to_string()),
        age: Some(age.to_string()),
        overall: Some(overall.to_string()),
        ..RawPlayerRow::default()
    }
}

fn messy_rows() -> Vec<RawPlayerRow> {
    vec![
        RawPlayerRow {
            value: Some("€12M".to_string()),
            position: Some("<span class=\"pos\">ST</span>".to_string()),
            potential: Some("84".to_string()),
            ..row("Rui Costa", "Lisbon FC", "24", "80")
        },
        row("Sem Club", "", "24", "80"),
        row("Blank Club", "   ", "24", "80"),
        RawPlayerRow {
            club: None,
            ..row("No Club", "x", "24", "80")
        },
        row("", "Lisbon FC", "24", "80"),
        row("Zero Overall", "Lisbon FC", "24", "0"),
        row("Negative Overall", "Lisbon FC", "24", "-3"),
        row("Text Overall", "Lisbon FC", "24", "great"),
        row("Text Age", "Lisbon FC", "N/A", "70"),
        row("Infinite Age", "Lisbon FC", "inf", "70"),
        row("Decimal Age", "Porto SC", "27.5", "71.5"),
    ]
}

#[test]
fn every_kept_record_satisfies_table_invariants() {
    let table = load_and_sanitize(messy_rows());
    assert_eq!(table.len(), 2);
    for p in table.records() {
        assert!(!p.name.trim().is_empty());
        assert!(!p.club.trim().is_empty());
        assert!(p.overall.is_finite() && p.overall > 0.0);
        assert!(p.age.is_finite());
        assert!(!p.value_raw.is_empty());
        assert!(!p.position_raw.is_empty());
    }
}

#[test]
fn report_attributes_each_drop_to_one_reason() {
    let (table, report) = sanitize_with_report(messy_rows());
    assert_eq!(report.rows_read, 11);
    assert_eq!(report.rows_kept, table.len());
    assert_eq!(report.missing_club, 3);
    assert_eq!(report.missing_name, 1);
    assert_eq!(report.invalid_overall, 3);
    assert_eq!(report.invalid_age, 2);
    assert_eq!(report.dropped() + report.rows_kept, report.rows_read);
}

#[test]
fn defaults_fill_value_and_position() {
    let table = load_and_sanitize(messy_rows());
    let decimal = table
        .find_player("Porto SC", "Decimal Age")
        .expect("decimal row kept");
    assert_eq!(decimal.age, 27.5);
    assert_eq!(decimal.overall, 71.5);
    assert_eq!(decimal.value_raw, DEFAULT_VALUE_RAW);
    assert_eq!(decimal.position_raw, DEFAULT_POSITION_RAW);

    let rui = table.find_player("Lisbon FC", "Rui Costa").expect("rui kept");
    assert_eq!(rui.value_raw, "€12M");
    assert_eq!(rui.potential, Some(84.0));
}

#[test]
fn sanitizing_twice_changes_nothing() {
    let once = load_and_sanitize(messy_rows());
    let twice = load_and_sanitize(once.to_raw_rows());
    assert_eq!(once, twice);
}

#[test]
fn input_order_is_preserved() {
    let table = load_and_sanitize(vec![
        row("C", "Club", "20", "60"),
        row("A", "Club", "20", "90"),
        row("B", "Club", "20", "75"),
    ]);
    let names: Vec<&str> = table.records().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[test]
fn empty_input_gives_empty_table() {
    let (table, report) = sanitize_with_report(Vec::new());
    assert!(table.is_empty());
    assert_eq!(report.rows_read, 0);
    assert_eq!(report.summary(), "Loaded 0 players");
}
