use std::io::Cursor;
use std::path::PathBuf;

use squad_compare::config::AppConfig;
use squad_compare::dataset::{PlayerTable, RawPlayerRow, load_and_sanitize, read_players_csv};
use squad_compare::images::{ImageFetch, decode_image, fetch_image};
use squad_compare::scouting::PositionFilter;
use squad_compare::state::{AppState, ManagementTab, Screen, ScoutField, Side};

fn fixture_table() -> PlayerTable {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("players.csv");
    read_players_csv(&path).expect("fixture should load").0
}

fn offline_config() -> AppConfig {
    AppConfig {
        fetch_images: false,
        ..AppConfig::default()
    }
}

fn offline_state() -> AppState {
    AppState::new(fixture_table(), &offline_config())
}

#[test]
fn new_state_highlights_two_different_clubs() {
    let state = offline_state();
    assert_eq!(state.screen, Screen::Selection);
    let left = state.highlighted_club(Side::Left).expect("left club");
    let right = state.highlighted_club(Side::Right).expect("right club");
    assert_eq!(left.club, "FC Harbour");
    assert_eq!(right.club, "Real Costa");
}

#[test]
fn management_locks_clubs_and_scout_excludes_them() {
    let mut state = offline_state();
    assert!(state.start_management());
    assert_eq!(state.screen, Screen::Management);
    assert_eq!(state.club_name(Side::Left), Some("FC Harbour"));

    let query = state.scout_query();
    assert_eq!(query.exclude_clubs, vec!["FC Harbour", "Real Costa"]);
    assert_eq!(query.min_overall, 75.0);
    assert_eq!(query.max_age, 28.0);
    assert_eq!(query.position, PositionFilter::All);
}

#[test]
fn tactical_tab_walks_the_starting_eleven() {
    let mut state = offline_state();
    state.start_management();
    assert_eq!(state.tab, ManagementTab::Tactical);
    let first = state.selected_player(Side::Left).expect("left player");
    assert_eq!(first.name, "Lionel Martins");

    state.select_next();
    state.select_next();
    state.select_next();
    let last = state.selected_player(Side::Left).expect("still in range");
    assert_eq!(last.name, "Theo Lind");
}

#[test]
fn scout_sliders_stay_in_range() {
    let mut state = offline_state();
    state.start_management();
    while state.tab != ManagementTab::Scout {
        state.cycle_tab(true);
    }
    for _ in 0..50 {
        state.select_next();
    }
    assert_eq!(state.scout_min_overall, 99);

    state.cycle_scout_field();
    assert_eq!(state.scout_field, ScoutField::MaxAge);
    for _ in 0..50 {
        state.select_prev();
    }
    assert_eq!(state.scout_max_age, 16);

    state.cycle_scout_field();
    state.select_next();
    assert_eq!(
        state.scout_position_filter(),
        PositionFilter::Code("CAM".to_string())
    );
    state.select_prev();
    assert_eq!(state.scout_position_filter(), PositionFilter::All);
}

#[test]
fn replacing_table_without_selected_club_returns_to_selection() {
    let mut state = offline_state();
    state.start_management();
    state.replace_table(load_and_sanitize(vec![RawPlayerRow {
        name: Some("Solo".to_string()),
        club: Some("FC Harbour".to_string()),
        age: Some("30".to_string()),
        overall: Some("70".to_string()),
        ..RawPlayerRow::default()
    }]));
    assert_eq!(state.screen, Screen::Selection);
    assert_eq!(state.club_left, None);
    assert_eq!(state.clubs.len(), 1);
    assert_eq!(state.right_selected, 0);
    assert_eq!(state.table.len(), 1);
}

#[test]
fn replacing_table_keeps_management_when_clubs_survive() {
    let mut state = offline_state();
    state.start_management();
    state.replace_table(fixture_table());
    assert_eq!(state.screen, Screen::Management);
    assert_eq!(state.club_name(Side::Right), Some("Real Costa"));
}

#[test]
fn logs_are_capped() {
    let mut state = offline_state();
    for idx in 0..250 {
        state.push_log(format!("[INFO] message {idx}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert!(state.logs.back().is_some_and(|l| l.ends_with("message 249")));
}

#[test]
fn disabled_fetching_records_placeholder_without_dispatch() {
    let mut state = offline_state();
    let url = "https://img.invalid/c/harbour.png";
    assert!(!state.request_image(url));
    assert!(state.images.get(url).is_some_and(ImageFetch::is_placeholder));
    assert!(state.pending_images.is_empty());
    assert!(!state.request_image(url));
    assert_eq!(state.images.len(), 1);
    assert!(!state.request_image(""));
    assert_eq!(state.image_status(""), "not available");
}

#[test]
fn image_requests_are_claimed_once_and_stored() {
    let mut state = AppState::new(fixture_table(), &AppConfig::default());
    let url = "https://img.invalid/c/harbour.png";
    assert!(state.request_image(url));
    assert!(!state.request_image(url));
    assert_eq!(state.image_status(url), "loading...");

    let before = state.logs.len();
    state.store_image(
        url.to_string(),
        ImageFetch::Placeholder {
            reason: "http 404 Not Found".to_string(),
        },
    );
    assert!(state.pending_images.is_empty());
    assert_eq!(state.image_status(url), "no image");
    assert_eq!(state.logs.len(), before + 1);
    assert!(!state.request_image(url));
}

#[test]
fn results_arriving_after_reload_are_dropped() {
    let mut state = AppState::new(fixture_table(), &AppConfig::default());
    let url = "https://img.invalid/c/costa.png";
    assert!(state.request_image(url));
    state.replace_table(fixture_table());
    state.store_image(
        url.to_string(),
        ImageFetch::Loaded {
            width: 1,
            height: 1,
            format: None,
        },
    );
    assert!(state.images.is_empty());
    assert_eq!(state.image_status(url), "not loaded");
}

#[test]
fn non_http_urls_never_hit_the_network() {
    assert!(fetch_image("", 5).is_placeholder());
    assert!(fetch_image("   ", 5).is_placeholder());
    assert!(fetch_image("ftp://img.invalid/logo.png", 5).is_placeholder());
    assert_eq!(fetch_image("", 5).describe(), "no image");
}

#[test]
fn decodes_png_bytes() {
    let img = image::RgbImage::new(3, 2);
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("encode png");
    let decoded = decode_image(bytes.get_ref()).expect("decode png");
    assert_eq!(
        decoded,
        ImageFetch::Loaded {
            width: 3,
            height: 2,
            format: Some(image::ImageFormat::Png),
        }
    );
    assert!(decode_image(b"not an image").is_err());
}
