use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::club::{ClubSummary, club_rankings};
use crate::config::AppConfig;
use crate::dataset::{PlayerRecord, PlayerTable, SanitizeReport};
use crate::images::ImageFetch;
use crate::position::position_options;
use crate::scouting::{MAX_AGE_RANGE, MIN_OVERALL_RANGE, PositionFilter, ScoutQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Selection,
    Management,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementTab {
    Tactical,
    Comparison,
    Players,
    Analytics,
    Scout,
}

impl ManagementTab {
    pub const ALL: [ManagementTab; 5] = [
        ManagementTab::Tactical,
        ManagementTab::Comparison,
        ManagementTab::Players,
        ManagementTab::Analytics,
        ManagementTab::Scout,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ManagementTab::Tactical => "Tactical",
            ManagementTab::Comparison => "Comparison",
            ManagementTab::Players => "Players",
            ManagementTab::Analytics => "Analytics",
            ManagementTab::Scout => "Scout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn toggle(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoutField {
    MinOverall,
    MaxAge,
    Position,
}

/// Everything the terminal front end remembers between key presses. The
/// analysis functions never see this; they get the table and plain values.
#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub tab: ManagementTab,
    pub table: Arc<PlayerTable>,
    pub clubs: Vec<ClubSummary>,
    pub positions: Vec<String>,
    pub focus: Side,
    pub left_selected: usize,
    pub right_selected: usize,
    pub club_left: Option<String>,
    pub club_right: Option<String>,
    pub player_left: usize,
    pub player_right: usize,
    pub detail_open: bool,
    pub scout_min_overall: u8,
    pub scout_max_age: u8,
    pub scout_position: usize,
    pub scout_field: ScoutField,
    pub fetch_images: bool,
    pub images: HashMap<String, ImageFetch>,
    pub pending_images: HashSet<String>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(table: PlayerTable, config: &AppConfig) -> Self {
        let mut state = Self {
            screen: Screen::Selection,
            tab: ManagementTab::Tactical,
            table: Arc::new(PlayerTable::default()),
            clubs: Vec::new(),
            positions: Vec::new(),
            focus: Side::Left,
            left_selected: 0,
            right_selected: 0,
            club_left: None,
            club_right: None,
            player_left: 0,
            player_right: 0,
            detail_open: false,
            scout_min_overall: config.scout_min_overall,
            scout_max_age: config.scout_max_age,
            scout_position: 0,
            scout_field: ScoutField::MinOverall,
            fetch_images: config.fetch_images,
            images: HashMap::with_capacity(32),
            pending_images: HashSet::new(),
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        };
        state.replace_table(table);
        state.right_selected = usize::from(state.clubs.len() > 1);
        state
    }

    /// Swap in a freshly built table. Derived lists are rebuilt before the
    /// new table becomes visible, and selections are clamped to it.
    pub fn replace_table(&mut self, table: PlayerTable) {
        let clubs = club_rankings(&table);
        let positions = position_options(&table);
        self.table = Arc::new(table);
        self.clubs = clubs;
        self.positions = positions;
        self.images.clear();
        self.pending_images.clear();
        self.detail_open = false;

        let max = self.clubs.len().saturating_sub(1);
        self.left_selected = self.left_selected.min(max);
        self.right_selected = self.right_selected.min(max);
        self.scout_position = self.scout_position.min(self.positions.len());
        let known = |club: &Option<String>| {
            club.as_ref()
                .is_some_and(|c| self.clubs.iter().any(|s| &s.club == c))
        };
        if !known(&self.club_left) || !known(&self.club_right) {
            self.club_left = None;
            self.club_right = None;
            self.screen = Screen::Selection;
        }
        self.clamp_players();
    }

    pub fn log_sanitize_report(&mut self, report: &SanitizeReport) {
        let level = if report.dropped() > 0 { "WARN" } else { "INFO" };
        self.push_log(format!("[{level}] {}", report.summary()));
        if report.value_defaulted + report.position_defaulted > 0 {
            self.push_log(format!(
                "[INFO] Defaults filled: value {}, position {}",
                report.value_defaulted, report.position_defaulted
            ));
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn highlighted_club(&self, side: Side) -> Option<&ClubSummary> {
        let idx = match side {
            Side::Left => self.left_selected,
            Side::Right => self.right_selected,
        };
        self.clubs.get(idx)
    }

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::Selection => {
                let len = self.clubs.len();
                let sel = self.selection_cursor();
                if len > 0 && *sel + 1 < len {
                    *sel += 1;
                }
            }
            Screen::Management => match self.tab {
                ManagementTab::Scout => self.adjust_scout_field(1),
                _ => {
                    let len = self.squad(self.focus).len();
                    let sel = self.player_cursor();
                    if len > 0 && *sel + 1 < len {
                        *sel += 1;
                    }
                }
            },
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::Selection => {
                let sel = self.selection_cursor();
                *sel = sel.saturating_sub(1);
            }
            Screen::Management => match self.tab {
                ManagementTab::Scout => self.adjust_scout_field(-1),
                _ => {
                    let sel = self.player_cursor();
                    *sel = sel.saturating_sub(1);
                }
            },
        }
    }

    fn selection_cursor(&mut self) -> &mut usize {
        match self.focus {
            Side::Left => &mut self.left_selected,
            Side::Right => &mut self.right_selected,
        }
    }

    fn player_cursor(&mut self) -> &mut usize {
        match self.focus {
            Side::Left => &mut self.player_left,
            Side::Right => &mut self.player_right,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
        self.detail_open = false;
    }

    /// Lock in the highlighted clubs and open the management view.
    pub fn start_management(&mut self) -> bool {
        let (Some(left), Some(right)) = (
            self.highlighted_club(Side::Left).map(|c| c.club.clone()),
            self.highlighted_club(Side::Right).map(|c| c.club.clone()),
        ) else {
            self.push_log("[WARN] Select both clubs first");
            return false;
        };
        self.push_log(format!("[INFO] Comparing {left} vs {right}"));
        self.club_left = Some(left);
        self.club_right = Some(right);
        self.screen = Screen::Management;
        self.tab = ManagementTab::Tactical;
        self.focus = Side::Left;
        self.player_left = 0;
        self.player_right = 0;
        self.detail_open = false;
        true
    }

    pub fn back_to_selection(&mut self) {
        self.screen = Screen::Selection;
        self.detail_open = false;
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        let tabs = ManagementTab::ALL;
        let idx = tabs.iter().position(|t| *t == self.tab).unwrap_or(0);
        let next = if forward {
            (idx + 1) % tabs.len()
        } else {
            (idx + tabs.len() - 1) % tabs.len()
        };
        self.tab = tabs[next];
        self.detail_open = false;
        self.clamp_players();
    }

    pub fn club_name(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.club_left.as_deref(),
            Side::Right => self.club_right.as_deref(),
        }
    }

    /// Players the cursor walks over for one side: the starting XI on the
    /// tactical tab, the whole squad elsewhere.
    pub fn squad(&self, side: Side) -> Vec<&PlayerRecord> {
        let Some(club) = self.club_name(side) else {
            return Vec::new();
        };
        match self.tab {
            ManagementTab::Tactical => crate::roster::select_starting_eleven(&self.table, club),
            _ => self.table.club_players(club).collect(),
        }
    }

    pub fn selected_player(&self, side: Side) -> Option<&PlayerRecord> {
        let idx = match side {
            Side::Left => self.player_left,
            Side::Right => self.player_right,
        };
        self.squad(side).get(idx).copied()
    }

    fn clamp_players(&mut self) {
        let left_len = self.squad(Side::Left).len();
        let right_len = self.squad(Side::Right).len();
        self.player_left = self.player_left.min(left_len.saturating_sub(1));
        self.player_right = self.player_right.min(right_len.saturating_sub(1));
    }

    pub fn cycle_scout_field(&mut self) {
        self.scout_field = match self.scout_field {
            ScoutField::MinOverall => ScoutField::MaxAge,
            ScoutField::MaxAge => ScoutField::Position,
            ScoutField::Position => ScoutField::MinOverall,
        };
    }

    fn adjust_scout_field(&mut self, delta: i32) {
        match self.scout_field {
            ScoutField::MinOverall => {
                self.scout_min_overall = step(self.scout_min_overall, delta, MIN_OVERALL_RANGE)
            }
            ScoutField::MaxAge => {
                self.scout_max_age = step(self.scout_max_age, delta, MAX_AGE_RANGE)
            }
            ScoutField::Position => {
                // Index 0 is "All"; the rest index into `positions`.
                let options = self.positions.len() + 1;
                let cur = self.scout_position as i32;
                self.scout_position = (cur + delta).rem_euclid(options as i32) as usize;
            }
        }
    }

    pub fn scout_position_filter(&self) -> PositionFilter {
        match self.scout_position.checked_sub(1) {
            Some(idx) => self
                .positions
                .get(idx)
                .map(|code| PositionFilter::Code(code.clone()))
                .unwrap_or_default(),
            None => PositionFilter::All,
        }
    }

    /// Current sliders as a query; the two compared clubs are excluded.
    pub fn scout_query(&self) -> ScoutQuery {
        ScoutQuery {
            min_overall: f64::from(self.scout_min_overall),
            max_age: f64::from(self.scout_max_age),
            position: self.scout_position_filter(),
            exclude_clubs: [&self.club_left, &self.club_right]
                .into_iter()
                .flatten()
                .cloned()
                .collect(),
        }
    }

    /// Claim a logo or photo URL for the background fetcher. Returns `false`
    /// when it is already cached or in flight. With fetching disabled the
    /// placeholder is recorded straight away and nothing is dispatched.
    pub fn request_image(&mut self, url: &str) -> bool {
        if url.trim().is_empty() || self.images.contains_key(url) {
            return false;
        }
        if !self.fetch_images {
            self.images.insert(
                url.to_string(),
                ImageFetch::Placeholder {
                    reason: "image fetching disabled".to_string(),
                },
            );
            return false;
        }
        self.pending_images.insert(url.to_string())
    }

    /// Record a finished fetch. Results for URLs no longer pending (the
    /// table was reloaded meanwhile) are dropped.
    pub fn store_image(&mut self, url: String, fetched: ImageFetch) {
        if !self.pending_images.remove(&url) {
            return;
        }
        if let ImageFetch::Placeholder { reason } = &fetched {
            self.push_log(format!("[WARN] Image unavailable ({reason}): {url}"));
        }
        self.images.insert(url, fetched);
    }

    pub fn image_status(&self, url: &str) -> String {
        if url.trim().is_empty() {
            return "not available".to_string();
        }
        match self.images.get(url) {
            Some(fetched) => fetched.describe(),
            None if self.pending_images.contains(url) => "loading...".to_string(),
            None => "not loaded".to_string(),
        }
    }
}

fn step(value: u8, delta: i32, (lo, hi): (u8, u8)) -> u8 {
    (i32::from(value) + delta).clamp(i32::from(lo), i32::from(hi)) as u8
}
