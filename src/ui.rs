//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, NoticeLevel, Row, ViewMode};
use crate::config::{ControlsSettings, UiSettings};
use crate::library::Track;
use crate::paths;
use crate::transport::{AudioDevice, PlaybackState};

/// Width of one grid cell, including the gap.
const GRID_CELL_WIDTH: u16 = 24;
const NOTICE_WIDTH: u16 = 44;

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] open/play".to_string(),
        "[backspace] up".to_string(),
        "[o] open folder".to_string(),
        "[space/p] play/pause".to_string(),
        "[s] stop".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] seek -/+{scrub_seconds}s"),
        "[-/+] volume".to_string(),
        "[r] repeat".to_string(),
        "[v] list/grid".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format seconds as `m:ss`, flooring partial seconds.
///
/// Negative and non-finite input renders as `0:00`.
pub fn format_clock(secs: f64) -> String {
    let whole = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Cursor position as a percentage of the list, 0 for an empty list.
fn list_percent(selected: usize, len: usize) -> u16 {
    if len <= 1 {
        return if len == 1 { 100 } else { 0 };
    }
    ((selected.min(len - 1) * 100) / (len - 1)) as u16
}

/// Number of grid columns that fit in `width`.
pub fn grid_columns(width: u16) -> usize {
    (width / GRID_CELL_WIDTH).max(1) as usize
}

/// First visible line of a window of `height` over `total` lines that keeps
/// `selected` centered when possible.
fn window_start(selected: usize, total: usize, height: usize) -> usize {
    if total <= height || height == 0 {
        return 0;
    }
    let half = height / 2;
    selected.saturating_sub(half).min(total - height)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn track_marker<D: AudioDevice>(app: &App<D>, track: &Track) -> &'static str {
    if !app.is_current(track) {
        return "  ";
    }
    match app.transport.state().status {
        PlaybackState::Playing => "▶ ",
        PlaybackState::Paused => "⏸ ",
        PlaybackState::Stopped => "■ ",
    }
}

/// Text and style for one browser row.
fn row_cell<D: AudioDevice>(app: &App<D>, row: Row) -> (String, Style) {
    match row {
        Row::Parent => ("../".to_string(), Style::default().fg(Color::Blue)),
        Row::Directory(i) => {
            let name = app
                .nav
                .directories()
                .get(i)
                .map_or("", |d| d.name.as_str());
            (format!("{name}/"), Style::default().fg(Color::Blue))
        }
        Row::Track(i) => {
            let Some(track) = app.nav.playlist().get(i) else {
                return (String::new(), Style::default());
            };
            let text = format!("{}{:>3}. {}", track_marker(app, track), i + 1, track.title());
            let style = if app.is_current(track) {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            (text, style)
        }
    }
}

fn header_line<D: AudioDevice>(app: &App<D>, rows: usize, ui: &UiSettings) -> String {
    let folder = paths::display_name(app.nav.current());
    let mut parts = vec![format!("Folder: {folder}")];
    if let Some(pending) = app.nav.pending_path() {
        parts.push(format!("Loading {}…", paths::display_name(pending)));
    }
    parts.push(format!("View: {}", app.view.label()));
    parts.push(format!("{}%", list_percent(app.selected, rows)));
    if ui.header_text.trim().is_empty() {
        parts.join(" • ")
    } else {
        format!("{} • {}", ui.header_text.trim(), parts.join(" • "))
    }
}

fn draw_list<D: AudioDevice>(frame: &mut Frame, app: &App<D>, rows: &[Row], area: Rect) {
    let height = area.height.saturating_sub(2) as usize;
    let start = window_start(app.selected, rows.len(), height);
    let end = (start + height).min(rows.len());

    let items: Vec<ListItem> = rows[start..end]
        .iter()
        .map(|&row| {
            let (text, style) = row_cell(app, row);
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" browser "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.selected.saturating_sub(start)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_grid<D: AudioDevice>(frame: &mut Frame, app: &App<D>, rows: &[Row], area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" browser ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = grid_columns(inner.width);
    let cell = GRID_CELL_WIDTH as usize;
    let lines_total = rows.len().div_ceil(columns);
    let height = inner.height as usize;
    let start = window_start(app.selected / columns, lines_total, height);

    let lines: Vec<Line> = rows
        .chunks(columns)
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(line_no, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(col, &row)| {
                    let (text, mut style) = row_cell(app, row);
                    if line_no * columns + col == app.selected {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    let clipped: String = text.chars().take(cell - 1).collect();
                    Span::styled(format!("{clipped:<width$}", width = cell), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_now_playing<D: AudioDevice>(frame: &mut Frame, app: &App<D>, area: Rect) {
    let state = app.transport.state();
    let Some(track) = state.current_track.as_ref() else {
        return;
    };

    let title = format!(
        " {} • repeat: {} • vol {}% ",
        track.title(),
        state.repeat_mode.label(),
        (state.volume * 100.0).round() as u32
    );
    let label = format!(
        "{} / {}",
        format_clock(state.position_secs),
        format_clock(state.duration_secs)
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(state.progress().clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

fn draw_picker(frame: &mut Frame, buffer: &str, area: Rect) {
    let popup = centered_rect_sized(area.width.saturating_sub(8), 3, area);
    frame.render_widget(Clear, popup);
    let prompt = Paragraph::new(format!("{buffer}_")).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" open folder (enter confirms, esc cancels) "),
    );
    frame.render_widget(prompt, popup);
}

fn draw_notices<D: AudioDevice>(frame: &mut Frame, app: &App<D>, area: Rect) {
    let mut bottom = area.y + area.height;
    let width = NOTICE_WIDTH.min(area.width);
    let x = area.x + area.width - width;

    for notice in app.notices().collect::<Vec<_>>().into_iter().rev() {
        let height = 4;
        if bottom < area.y + height {
            break;
        }
        bottom -= height;
        let rect = Rect {
            x,
            y: bottom,
            width,
            height,
        };
        let color = match notice.level {
            NoticeLevel::Error => Color::Red,
            NoticeLevel::Info => Color::Cyan,
        };
        let body = Paragraph::new(notice.detail.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} ", notice.title)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<D: AudioDevice>(
    frame: &mut Frame,
    app: &App<D>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let now_playing = if app.transport.state().current_track.is_some() {
        3
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(now_playing),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let rows = app.rows();

    let header = Paragraph::new(header_line(app, rows.len(), ui_settings))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" riffle ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    match app.view {
        ViewMode::List => draw_list(frame, app, &rows, chunks[1]),
        ViewMode::Grid => draw_grid(frame, app, &rows, chunks[1]),
    }

    draw_now_playing(frame, app, chunks[2]);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .dim()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    if let Some(buffer) = app.picker.as_deref() {
        draw_picker(frame, buffer, chunks[1]);
    }
    draw_notices(frame, app, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{AudioExtensions, Entry};
    use crate::nav::Navigator;
    use crate::transport::mock::RecordingDevice;
    use crate::transport::{RepeatMode, Transport};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn format_clock_floors_to_minutes_and_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(59.9), "0:59");
        assert_eq!(format_clock(61.0), "1:01");
        assert_eq!(format_clock(3725.4), "62:05");
    }

    #[test]
    fn format_clock_handles_bad_input() {
        assert_eq!(format_clock(-3.0), "0:00");
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
    }

    #[test]
    fn list_percent_spans_zero_to_hundred() {
        assert_eq!(list_percent(0, 0), 0);
        assert_eq!(list_percent(0, 1), 100);
        assert_eq!(list_percent(0, 5), 0);
        assert_eq!(list_percent(2, 5), 50);
        assert_eq!(list_percent(4, 5), 100);
    }

    #[test]
    fn window_start_keeps_selection_visible() {
        assert_eq!(window_start(3, 5, 10), 0);
        assert_eq!(window_start(2, 100, 10), 0);
        assert_eq!(window_start(50, 100, 10), 45);
        assert_eq!(window_start(99, 100, 10), 90);
    }

    #[test]
    fn grid_columns_never_zero() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(GRID_CELL_WIDTH * 3 + 5), 3);
    }

    #[test]
    fn draw_renders_browser_and_now_playing() {
        let nav = Navigator::new("/music", AudioExtensions::default());
        let transport = Transport::new(RecordingDevice::default(), 0.5, RepeatMode::NoRepeat);
        let mut app = App::new(nav, transport);
        let req = app.start();
        app.apply_listing(
            req.token,
            Ok(vec![Entry {
                name: "01 Intro.mp3".into(),
                path: "/music/01 Intro.mp3".into(),
                is_directory: false,
                is_file: true,
                is_symlink: false,
            }]),
        );
        app.play_track(0);

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        for view in [ViewMode::List, ViewMode::Grid] {
            app.view = view;
            terminal
                .draw(|f| draw(f, &app, &UiSettings::default(), &ControlsSettings::default()))
                .unwrap();

            let screen: String = terminal
                .backend()
                .buffer()
                .content
                .iter()
                .map(|c| c.symbol())
                .collect();
            assert!(screen.contains("Folder: music"));
            assert!(screen.contains("1. 01 Intro"));
            assert!(screen.contains("repeat: off"));
            assert!(screen.contains("0:00 / 0:00"));
        }
    }
}
