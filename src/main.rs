use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Tabs};

use squad_compare::club::{
    aggregate, compare_clubs, distribution, position_strength, top_players,
};
use squad_compare::config::AppConfig;
use squad_compare::dataset::{PlayerRecord, has_skill_profile, read_players_csv};
use squad_compare::images::{ImageDelta, ImageFetch, spawn_image_worker};
use squad_compare::position::extract_position;
use squad_compare::rating::{Tier, classify};
use squad_compare::roster::{
    FORMATION_NAME, assign_formation, lineup_mean_overall, select_starting_eleven, short_label,
};
use squad_compare::scouting::{Outlook, scout, scout_matches};
use squad_compare::state::{AppState, ManagementTab, Screen, ScoutField, Side};
use squad_compare::value::{format_currency, format_millions};

struct App {
    state: AppState,
    config: AppConfig,
    image_tx: Sender<String>,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, config: AppConfig, image_tx: Sender<String>) -> Self {
        Self {
            state,
            config,
            image_tx,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.state.help_overlay = false;
            }
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.state.toggle_focus()
            }
            _ => match self.state.screen {
                Screen::Selection => self.on_selection_key(key),
                Screen::Management => self.on_management_key(key),
            },
        }
        self.prefetch_images();
    }

    fn on_selection_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.state.toggle_focus(),
            KeyCode::Enter => {
                self.state.start_management();
            }
            _ => {}
        }
    }

    fn on_management_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('b') | KeyCode::Esc => {
                if self.state.detail_open {
                    self.state.detail_open = false;
                } else {
                    self.state.back_to_selection();
                }
            }
            KeyCode::Tab => self.state.cycle_tab(true),
            KeyCode::BackTab => self.state.cycle_tab(false),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = (c as usize) - ('1' as usize);
                while ManagementTab::ALL[idx] != self.state.tab {
                    self.state.cycle_tab(true);
                }
            }
            KeyCode::Char('f') if self.state.tab == ManagementTab::Scout => {
                self.state.cycle_scout_field()
            }
            KeyCode::Enter | KeyCode::Char('d') => {
                if matches!(self.state.tab, ManagementTab::Tactical | ManagementTab::Players) {
                    self.state.detail_open = !self.state.detail_open;
                }
            }
            _ => {}
        }
    }

    /// Logos for the highlighted clubs and the photo of an opened player.
    fn prefetch_images(&mut self) {
        let mut urls = Vec::new();
        match self.state.screen {
            Screen::Selection => {
                for side in [Side::Left, Side::Right] {
                    if let Some(club) = self.state.highlighted_club(side) {
                        urls.push(club.logo_url.clone());
                    }
                }
            }
            Screen::Management => {
                if self.state.detail_open {
                    if let Some(p) = self.state.selected_player(self.state.focus) {
                        urls.push(p.photo_url.clone());
                    }
                }
            }
        }
        for url in urls {
            if !self.state.request_image(&url) {
                continue;
            }
            if let Err(err) = self.image_tx.send(url) {
                let reason = "image worker stopped".to_string();
                self.state.store_image(err.0, ImageFetch::Placeholder { reason });
            }
        }
    }

    fn reload(&mut self) {
        match read_players_csv(&self.config.players_csv) {
            Ok((table, report)) => {
                self.state.replace_table(table);
                self.state.log_sanitize_report(&report);
            }
            Err(err) => self
                .state
                .push_log(format!("[WARN] Reload failed, keeping current data: {err:#}")),
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env().with_cli_path(std::env::args().nth(1));
    let (table, report) = read_players_csv(&config.players_csv)
        .with_context(|| format!("load dataset {}", config.players_csv.display()))?;
    let mut state = AppState::new(table, &config);
    state.log_sanitize_report(&report);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (image_tx, image_rx) = spawn_image_worker(config.image_timeout_secs);
    let mut app = App::new(state, config, image_tx);
    app.prefetch_images();
    let res = run_app(&mut terminal, &mut app, image_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    image_rx: Receiver<ImageDelta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok((url, fetched)) = image_rx.try_recv() {
            app.state.store_image(url, fetched);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(size);

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Selection => render_selection(frame, chunks[1], &app.state),
        Screen::Management => render_management(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer =
        Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, size);
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.screen {
        Screen::Selection => format!(
            "SQUAD COMPARE | Club selection | {} players, {} clubs",
            state.table.len(),
            state.clubs.len()
        ),
        Screen::Management => format!(
            "SQUAD COMPARE | {} vs {} | {}",
            state.club_left.as_deref().unwrap_or("-"),
            state.club_right.as_deref().unwrap_or("-"),
            state.tab.label()
        ),
    };
    format!("\n {title}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Selection => {
            "j/k Move | ←/→/Tab Side | Enter Compare | r Reload | ? Help | q Quit".to_string()
        }
        Screen::Management => match state.tab {
            ManagementTab::Scout => {
                "Tab/1-5 Tabs | f Field | j/k Adjust | b/Esc Back | r Reload | ? Help | q Quit"
                    .to_string()
            }
            _ => concat!(
                "Tab/1-5 Tabs | ←/→ Side | j/k Move | Enter Detail | ",
                "b/Esc Back | ? Help | q Quit"
            )
            .to_string(),
        },
    }
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Elite => Color::Rgb(255, 215, 0),
        Tier::Strong => Color::Rgb(192, 192, 192),
        Tier::Solid => Color::Rgb(205, 127, 50),
        Tier::Average => Color::Rgb(128, 128, 128),
    }
}

fn rating_span(overall: f64) -> Span<'static> {
    let tier = classify(overall);
    Span::styled(
        format!(" {overall:>3.0} "),
        Style::default()
            .fg(Color::Black)
            .bg(tier_color(tier))
            .add_modifier(Modifier::BOLD),
    )
}

fn side_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style)
}

fn render_selection(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(10),
            Constraint::Percentage(45),
        ])
        .split(area);

    render_club_picker(frame, cols[0], state, Side::Left);
    let vs = Paragraph::new("\n\n\n⚡ VS ⚡")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(vs, cols[1]);
    render_club_picker(frame, cols[2], state, Side::Right);
}

fn render_club_picker(frame: &mut Frame, area: Rect, state: &AppState, side: Side) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(6)])
        .split(area);

    let title = match side {
        Side::Left => "Club A",
        Side::Right => "Club B",
    };
    let block = side_block(title.to_string(), state.focus == side);
    let inner = block.inner(rows[0]);
    frame.render_widget(block, rows[0]);

    if state.clubs.is_empty() {
        frame.render_widget(
            Paragraph::new("No clubs in dataset").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
    } else {
        let selected = match side {
            Side::Left => state.left_selected,
            Side::Right => state.right_selected,
        };
        let (start, end) = visible_range(selected, state.clubs.len(), inner.height as usize);
        let lines: Vec<Line> = (start..end)
            .map(|idx| {
                let club = &state.clubs[idx];
                let text = format!("{} (Overall: {:.1})", club.club, club.mean_overall);
                if idx == selected {
                    Line::styled(
                        format!("> {text}"),
                        Style::default().fg(Color::White).bg(Color::DarkGray),
                    )
                } else {
                    Line::raw(format!("  {text}"))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    let summary_text = match state.highlighted_club(side) {
        Some(club) => {
            let summary = aggregate(&state.table, &club.club);
            let logo = state.image_status(&summary.logo_url);
            format!(
                "Mean overall: {:.1}\nTotal value:  {}\nPlayers:      {}\nLogo:         {}",
                summary.mean_overall,
                format_millions(summary.total_value),
                summary.players,
                logo
            )
        }
        None => "No club selected".to_string(),
    };
    let summary = Paragraph::new(summary_text)
        .block(Block::default().title("Summary").borders(Borders::ALL));
    frame.render_widget(summary, rows[1]);
}

fn render_management(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let titles: Vec<String> = ManagementTab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{} {}", i + 1, t.label()))
        .collect();
    let selected = ManagementTab::ALL
        .iter()
        .position(|t| *t == state.tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, rows[0]);

    match state.tab {
        ManagementTab::Tactical => render_tactical(frame, rows[1], state),
        ManagementTab::Comparison => render_comparison(frame, rows[1], state),
        ManagementTab::Players => render_players(frame, rows[1], state),
        ManagementTab::Analytics => render_analytics(frame, rows[1], state),
        ManagementTab::Scout => render_scout(frame, rows[1], state),
    }

    if state.detail_open {
        if let Some(player) = state.selected_player(state.focus) {
            render_player_detail(frame, centered_rect(70, 80, area), state, player);
        }
    }
}

fn render_tactical(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    for (side, col) in [(Side::Left, cols[0]), (Side::Right, cols[1])] {
        let Some(club) = state.club_name(side) else {
            continue;
        };
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(col);
        let eleven = select_starting_eleven(&state.table, club);
        render_pitch(frame, parts[0], club, &eleven);

        let mean = lineup_mean_overall(&eleven)
            .map(|m| format!("{m:.1}"))
            .unwrap_or_else(|| "-".to_string());
        let title = format!("{club} Starting XI | {FORMATION_NAME} | Mean {mean}");
        let cursor = match side {
            Side::Left => state.player_left,
            Side::Right => state.player_right,
        };
        let block = side_block(title, state.focus == side);
        render_player_list(frame, parts[1], &eleven, cursor, block);
    }
}

fn render_pitch(frame: &mut Frame, area: Rect, club: &str, eleven: &[&PlayerRecord]) {
    let assignments = assign_formation(eleven);
    let canvas = Canvas::default()
        .block(Block::default().title(format!("{club} - {FORMATION_NAME}")).borders(Borders::ALL))
        .background_color(Color::Rgb(34, 139, 34))
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, 90.0])
        .paint(move |ctx| {
            let white = Color::White;
            ctx.draw(&Rectangle {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 90.0,
                color: white,
            });
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: 45.0,
                x2: 100.0,
                y2: 45.0,
                color: white,
            });
            ctx.draw(&Circle {
                x: 50.0,
                y: 45.0,
                radius: 5.0,
                color: white,
            });
            ctx.draw(&Rectangle {
                x: 25.0,
                y: 0.0,
                width: 50.0,
                height: 18.0,
                color: white,
            });
            ctx.draw(&Rectangle {
                x: 25.0,
                y: 72.0,
                width: 50.0,
                height: 18.0,
                color: white,
            });
            ctx.layer();
            for a in &assignments {
                let color = tier_color(classify(a.player.overall));
                ctx.print(
                    a.slot.x - 3.0,
                    a.slot.y,
                    Span::styled(
                        format!("●{}", short_label(&a.player.name)),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn render_player_list(
    frame: &mut Frame,
    area: Rect,
    players: &[&PlayerRecord],
    cursor: usize,
    block: Block<'static>,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if players.is_empty() {
        frame.render_widget(
            Paragraph::new("No players").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }
    let (start, end) = visible_range(cursor, players.len(), inner.height as usize);
    let lines: Vec<Line> = (start..end)
        .map(|idx| {
            let p = players[idx];
            let marker = if idx == cursor { "> " } else { "  " };
            let row_style = if idx == cursor {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(marker.to_string(), row_style),
                rating_span(p.overall),
                Span::styled(
                    format!(
                        " {} | {} | {:.0} yrs | {}",
                        p.name,
                        extract_position(Some(&p.position_raw)),
                        p.age,
                        format_currency(Some(&p.value_raw))
                    ),
                    row_style,
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_comparison(frame: &mut Frame, area: Rect, state: &AppState) {
    let (Some(left), Some(right)) = (state.club_name(Side::Left), state.club_name(Side::Right))
    else {
        return;
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(1)])
        .split(area);

    let cmp = compare_clubs(&state.table, left, right);
    let metrics = format!(
        concat!(
            "{:<18}{:>10}{:>10}{:>10}\n",
            "{:<18}{:>10.1}{:>10.1}{:>+10.1}\n",
            "{:<18}{:>10.1}{:>10.1}{:>+10.1}\n",
            "{:<18}{:>10.1}{:>10.1}{:>+10.1}\n",
            "{:<18}{:>10}{:>10}{:>+10}"
        ),
        "",
        truncate(left, 10),
        truncate(right, 10),
        "Delta",
        "Mean overall",
        cmp.left_stats.mean_overall,
        cmp.right_stats.mean_overall,
        cmp.overall_delta(),
        "Mean age",
        cmp.left_stats.mean_age,
        cmp.right_stats.mean_age,
        cmp.age_delta(),
        "Mean potential",
        cmp.left_stats.mean_potential,
        cmp.right_stats.mean_potential,
        cmp.potential_delta(),
        "Players",
        cmp.left_stats.players,
        cmp.right_stats.players,
        cmp.players_delta(),
    );
    frame.render_widget(
        Paragraph::new(metrics).block(Block::default().title("Comparison").borders(Borders::ALL)),
        rows[0],
    );

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let overall = |club: &str| -> Vec<f64> {
        state.table.club_players(club).map(|p| p.overall).collect()
    };
    let age = |club: &str| -> Vec<f64> { state.table.club_players(club).map(|p| p.age).collect() };
    render_distribution(
        frame,
        charts[0],
        "Overall distribution",
        &overall(left),
        &overall(right),
        20,
    );
    render_distribution(
        frame,
        charts[1],
        "Age distribution",
        &age(left),
        &age(right),
        15,
    );
}

fn render_distribution(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    left: &[f64],
    right: &[f64],
    bins: usize,
) {
    let all = left.iter().chain(right.iter()).copied();
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    if !min.is_finite() || !max.is_finite() {
        frame.render_widget(Paragraph::new("No data").block(block), area);
        return;
    }
    let max = if max > min { max } else { min + 1.0 };
    let left_counts = distribution(left, bins, min, max);
    let right_counts = distribution(right, bins, min, max);
    let width = (max - min) / bins as f64;

    let groups: Vec<BarGroup> = (0..bins)
        .map(|i| {
            let label = format!("{:.0}", min + width * i as f64);
            BarGroup::default().label(Line::from(label)).bars(&[
                Bar::default()
                    .value(left_counts[i] as u64)
                    .text_value(String::new())
                    .style(Style::default().fg(Color::Blue)),
                Bar::default()
                    .value(right_counts[i] as u64)
                    .text_value(String::new())
                    .style(Style::default().fg(Color::Red)),
            ])
        })
        .collect();
    let mut chart = BarChart::default().block(block).bar_width(1).bar_gap(0).group_gap(1);
    for group in groups {
        chart = chart.data(group);
    }
    frame.render_widget(chart, area);
}

fn render_players(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(7)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    for (side, col) in [(Side::Left, cols[0]), (Side::Right, cols[1])] {
        let Some(club) = state.club_name(side) else {
            continue;
        };
        let squad = state.squad(side);
        let cursor = match side {
            Side::Left => state.player_left,
            Side::Right => state.player_right,
        };
        let block = side_block(club.to_string(), state.focus == side);
        render_player_list(frame, col, &squad, cursor, block);
    }

    let text = match (
        state.selected_player(Side::Left),
        state.selected_player(Side::Right),
    ) {
        (Some(a), Some(b)) => {
            let pot = |p: &PlayerRecord| {
                p.potential
                    .map(|v| format!("{v:.0}"))
                    .unwrap_or_else(|| "-".to_string())
            };
            format!(
                concat!(
                    "{:<12}{:>22}{:>22}\n{:<12}{:>22.0}{:>22.0}\n",
                    "{:<12}{:>22}{:>22}\n{:<12}{:>22.0}{:>22.0}"
                ),
                "",
                truncate(&a.name, 20),
                truncate(&b.name, 20),
                "Overall",
                a.overall,
                b.overall,
                "Potential",
                pot(a),
                pot(b),
                "Age",
                a.age,
                b.age,
            )
        }
        _ => "Select a player on each side".to_string(),
    };
    frame.render_widget(
        Paragraph::new(text).block(Block::default().title("Head to head").borders(Borders::ALL)),
        rows[1],
    );
}

fn render_analytics(frame: &mut Frame, area: Rect, state: &AppState) {
    let (Some(left), Some(right)) = (state.club_name(Side::Left), state.club_name(Side::Right))
    else {
        return;
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(1)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    for (club, col) in [(left, cols[0]), (right, cols[1])] {
        let top = top_players(&state.table, club, 5);
        render_player_list(
            frame,
            col,
            &top,
            usize::MAX,
            Block::default()
                .title(format!("Top 5 - {club}"))
                .borders(Borders::ALL),
        );
    }

    let strength = position_strength(&state.table, left, right);
    let mut lines = vec![Line::styled(
        format!("{:<6}{:>12}{:>12}", "Pos", truncate(left, 11), truncate(right, 11)),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for row in &strength {
        lines.push(Line::raw(format!(
            "{:<6}{:>12.1}{:>12.1}",
            row.position, row.left, row.right
        )));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().title("Strength by position").borders(Borders::ALL)),
        rows[1],
    );
}

fn render_scout(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let query = state.scout_query();
    let field_style = |field: ScoutField| {
        if state.scout_field == field {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default()
        }
    };
    let filters = Line::from(vec![
        Span::raw("Min overall "),
        Span::styled(format!(" {} ", state.scout_min_overall), field_style(ScoutField::MinOverall)),
        Span::raw("   Max age "),
        Span::styled(format!(" {} ", state.scout_max_age), field_style(ScoutField::MaxAge)),
        Span::raw("   Position "),
        Span::styled(format!(" {} ", query.position.label()), field_style(ScoutField::Position)),
    ]);
    frame.render_widget(
        Paragraph::new(filters).block(Block::default().title("Filters").borders(Borders::ALL)),
        rows[0],
    );

    let found = scout_matches(&state.table, &query);
    let results = scout(&state.table, &query);
    let block = Block::default()
        .title(format!("Players found ({found})"))
        .borders(Borders::ALL);
    if results.is_empty() {
        frame.render_widget(
            Paragraph::new("No players match these filters").block(block),
            rows[1],
        );
        return;
    }
    let lines: Vec<Line> = results
        .iter()
        .map(|r| {
            let outlook = match (r.outlook, r.potential_growth) {
                (Outlook::Upside, Some(g)) => {
                    Span::styled(format!("Potential +{g:.0}"), Style::default().fg(Color::Green))
                }
                _ => Span::styled("Established", Style::default().fg(Color::Cyan)),
            };
            Line::from(vec![
                rating_span(r.player.overall),
                Span::raw(format!(
                    " {:<24} {:<18} {:<4} {:>3.0} yrs  {:>9}  ",
                    truncate(&r.player.name, 24),
                    truncate(&r.player.club, 18),
                    r.position,
                    r.player.age,
                    format_currency(Some(&r.player.value_raw)),
                )),
                outlook,
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), rows[1]);
}

fn render_player_detail(frame: &mut Frame, area: Rect, state: &AppState, p: &PlayerRecord) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!("Player - {}", p.name))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);

    let photo = state.image_status(&p.photo_url);
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
    let mut info = vec![
        format!("Club:        {}", p.club),
        format!("Position:    {}", extract_position(Some(&p.position_raw))),
        format!("Age:         {:.0}", p.age),
        format!("Nationality: {}", opt(&p.nationality)),
        format!("Value:       {}", format_currency(Some(&p.value_raw))),
        format!("Wage:        {}", opt(&p.wage)),
        format!("Overall:     {:.0} ({})", p.overall, classify(p.overall).label()),
        format!(
            "Potential:   {}",
            p.potential
                .map(|v| format!("{v:.0}"))
                .unwrap_or_else(|| "N/A".to_string())
        ),
        format!("Photo:       {photo}"),
    ];
    if let Some(foot) = &p.preferred_foot {
        info.push(format!("Foot:        {foot}"));
    }
    if let Some(rep) = p.international_reputation {
        info.push(format!("Reputation:  {rep:.0}/5"));
    }
    frame.render_widget(Paragraph::new(info.join("\n")), cols[0]);

    if !has_skill_profile(p) {
        frame.render_widget(
            Paragraph::new("Skill attributes not available in this dataset")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title("Skills").borders(Borders::ALL)),
            cols[1],
        );
        return;
    }
    let bars: Vec<Bar> = p
        .skills
        .available()
        .into_iter()
        .map(|(label, v)| {
            Bar::default()
                .label(Line::from(label))
                .value(v.round().max(0.0) as u64)
                .style(Style::default().fg(tier_color(classify(v))))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title("Skills").borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(100);
    frame.render_widget(chart, cols[1]);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.min(total - 1).saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Squad Compare - Help",
        "",
        "Club selection:",
        "  j/k or ↑/↓   Move",
        "  ←/→ or Tab   Switch club A / club B",
        "  Enter        Compare the two clubs",
        "",
        "Management:",
        "  Tab / 1-5    Switch tab",
        "  ←/→          Switch side",
        "  Enter / d    Player detail",
        "  f            Next scouting filter",
        "  j/k          Move or adjust filter",
        "  b / Esc      Back",
        "",
        "  r            Reload dataset",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
