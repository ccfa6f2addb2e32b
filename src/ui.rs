//! UI rendering helpers for the terminal user interface.
//!
//! Everything here is a pure function of `App` and a `PlayerView`; the event
//! loop decides when to redraw.

pub mod animation;

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, NoticeLevel, PlayerView};
use crate::config::UiSettings;
use crate::player::PlaybackState;

const BACKGROUND: (u8, u8, u8) = (0, 0, 0);
const ACCENT: (u8, u8, u8) = (0, 255, 136);
const LABEL_HIGHLIGHT: Color = Color::Rgb(255, 255, 136);
const DISABLED: Color = Color::DarkGray;

/// Key, description, and whether the key drives playback.
const CONTROLS: [(&str, &str, bool); 11] = [
    ("a", "add songs", false),
    ("space/p", "play/pause", true),
    ("s", "stop", true),
    ("n/l", "next", true),
    ("+/-", "volume", false),
    ("j/k", "up/down", false),
    ("enter", "play now", true),
    ("d", "remove", false),
    ("C", "clear", false),
    ("b", "browse queue", false),
    ("q", "quit", false),
];

/// Controls help line. Transport keys are greyed out without audio.
fn controls_line(audio_available: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(CONTROLS.len() * 2);
    for (i, (key, what, transport)) in CONTROLS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        let style = if *transport && !audio_available {
            Style::default().fg(DISABLED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("[{key}] {what}"), style));
    }
    Line::from(spans)
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Queue entry as shown in the list and the browser: `01. name.mp3`.
fn queue_entry(index: usize, name: &str) -> String {
    format!("{:02}. {}", index + 1, name)
}

fn song_count(n: usize) -> String {
    if n == 1 {
        "(1 song)".to_string()
    } else {
        format!("({n} songs)")
    }
}

/// Text-mode volume bar, ten cells wide.
fn volume_bar(volume: u8) -> String {
    let filled = (usize::from(volume.min(100)) + 5) / 10;
    format!(
        "Volume [{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(10 - filled),
        volume
    )
}

fn status_text(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    }
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
        width: width.min(r.width),
        height: height.min(r.height),
    }
}

/// Window of `height` rows around `selected` within `total` items.
/// Returns `(start, end, selected_in_window)`.
fn visible_window(total: usize, selected: usize, height: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into `frame`.
pub fn draw(frame: &mut Frame, app: &App, view: &PlayerView, ui: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui.title_text.as_str())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(rgb(app.title_pulse.rgb()))
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    draw_now_playing(frame, app, view, chunks[1]);
    draw_queue(frame, app, view, chunks[2]);
    draw_notice_line(frame, app, chunks[3]);

    let footer = Paragraph::new(controls_line(app.audio_available))
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    if app.browser.is_some() {
        draw_browser(frame, app, view, chunks[2]);
    }
    if app.confirm_clear {
        draw_confirm_clear(frame, view, chunks[2]);
    }
}

fn draw_now_playing(frame: &mut Frame, app: &App, view: &PlayerView, area: Rect) {
    let glyph = match view.state {
        PlaybackState::Playing => app.spinner.frame(),
        PlaybackState::Paused => "⏸",
        PlaybackState::Stopped => "⏹",
    };

    let label = match (&app.now_playing, &view.current) {
        (Some(info), _) => info.display.clone(),
        (None, Some(track)) => track.name(),
        (None, None) => "No song playing".to_string(),
    };
    let label_style = if app.label_pulse.is_highlighted() {
        Style::default().fg(LABEL_HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut status = format!("Status: {}", status_text(view.state));
    if let Some(d) = app.now_playing.as_ref().and_then(|i| i.duration) {
        status.push_str(&format!(" • {}", format_mmss(d)));
    }
    let status_style = if view.audio_available {
        Style::default()
    } else {
        Style::default().fg(DISABLED)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(glyph, Style::default().fg(rgb(ACCENT))),
            Span::raw(" "),
            Span::styled(label, label_style),
        ]),
        Line::styled(status, status_style),
        Line::raw(volume_bar(app.volume)),
    ];

    let panel = Paragraph::new(lines).block(padded(" now playing "));
    frame.render_widget(panel, area);
}

fn draw_queue(frame: &mut Frame, app: &App, view: &PlayerView, area: Rect) {
    let total = view.queue.len();
    let title = format!(" queue {} ", song_count(total));

    if total == 0 {
        let empty = Paragraph::new("Queue is empty. Press [a] to add songs.")
            .style(Style::default().fg(DISABLED))
            .block(padded(&title));
        frame.render_widget(empty, area);
        return;
    }

    // Only build items for the visible window.
    let height = area.height.saturating_sub(2) as usize;
    let selected = app.selected.min(total - 1);
    let (start, end, pos) = visible_window(total, selected, height);

    let items: Vec<ListItem> = view.queue[start..end]
        .iter()
        .enumerate()
        .map(|(i, t)| ListItem::new(queue_entry(start + i, &t.name())))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(pos));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_notice_line(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if app.loading {
        spans.push(Span::styled(
            format!("{} Opening file picker… ", app.loading_indicator.glyph()),
            Style::default().fg(rgb(ACCENT)),
        ));
    }
    if let Some(n) = &app.notice {
        let color = match n.level {
            NoticeLevel::Info => Color::Cyan,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        spans.push(Span::styled(n.text.clone(), Style::default().fg(color)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_browser(frame: &mut Frame, app: &App, view: &PlayerView, area: Rect) {
    let Some(browser) = app.browser.as_ref() else {
        return;
    };
    let popup = centered_rect_sized(64, 14, area);
    frame.render_widget(Clear, popup);

    let fg = rgb(browser.fade.blend((255, 255, 255), BACKGROUND));
    let border = rgb(browser.fade.blend(ACCENT, BACKGROUND));

    let total = view.queue.len();
    let height = popup.height.saturating_sub(2) as usize;
    let selected = browser.selected.min(total.saturating_sub(1));
    let (start, end, pos) = visible_window(total, selected, height);

    let items: Vec<ListItem> = view.queue[start..end]
        .iter()
        .enumerate()
        .map(|(i, t)| ListItem::new(queue_entry(start + i, &t.name())))
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" queue browser (enter plays now, esc closes) "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(pos));
    }
    frame.render_stateful_widget(list, popup, &mut state);
}

fn draw_confirm_clear(frame: &mut Frame, view: &PlayerView, area: Rect) {
    let popup = centered_rect_sized(44, 3, area);
    frame.render_widget(Clear, popup);
    let text = format!("Clear all {}? [y/n]", song_count(view.queue.len()));
    let prompt = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" confirm "));
    frame.render_widget(prompt, popup);
}
