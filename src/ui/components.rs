//! Shared UI components (statistics cards, status bar, help and info dialogs).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, InputMode, KeyAction};

/// Three cards: total, active, new this month.
pub fn render_statistics(f: &mut Frame, area: Rect, app: &AppState) {
    let stats = app.store.statistics();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);
    let cards = [
        ("Total drivers", stats.total_drivers),
        ("Active drivers", stats.active_drivers),
        ("New this month", stats.new_this_month),
    ];
    for ((label, value), rect) in cards.into_iter().zip(cols.iter()) {
        let p = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
        f.render_widget(p, *rect);
    }
}

/// Render the bottom status bar with mode, counts and the last message.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "DIALOG",
    };
    let mut msg = format!(
        "mode: {mode}  shown:{}  total:{}",
        app.store.filtered_records().len(),
        app.store.records().len()
    );
    if app.store.is_saving() {
        msg.push_str("  saving…");
    }
    if app.store.is_deleting() {
        msg.push_str("  deleting…");
    }
    if let Some(status) = &app.status {
        msg.push_str("  | ");
        msg.push_str(status);
    }
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Label shown for each configurable action, in display order.
const ACTION_LABELS: [(KeyAction, &str); 13] = [
    (KeyAction::NewDriver, "New driver"),
    (KeyAction::EditSelection, "Edit selected"),
    (KeyAction::DeleteSelection, "Delete selected"),
    (KeyAction::StartSearch, "Search"),
    (KeyAction::ClearSearch, "Clear search"),
    (KeyAction::MoveUp, "Move up"),
    (KeyAction::MoveDown, "Move down"),
    (KeyAction::PrevPage, "Previous page"),
    (KeyAction::NextPage, "Next page"),
    (KeyAction::CyclePageSize, "Page size"),
    (KeyAction::OpenHelp, "Help"),
    (KeyAction::ToggleKeybindsPane, "Toggle this pane"),
    (KeyAction::Quit, "Quit"),
];

/// Lines listing every action with its bound keys, aligned on the label.
fn keybind_lines(app: &AppState) -> Vec<Line<'static>> {
    let width = ACTION_LABELS.iter().map(|(_, l)| l.len()).max().unwrap_or(0);
    ACTION_LABELS
        .iter()
        .filter_map(|(action, label)| {
            let keys = app.keymap.keys_for(*action);
            if keys.is_empty() {
                return None;
            }
            Some(Line::from(vec![
                Span::raw(format!("  {:>width$} │ ", label, width = width)),
                Span::styled(keys.join(", "), Style::default().add_modifier(Modifier::ITALIC)),
            ]))
        })
        .collect()
}

/// Right-hand panel listing the active keybindings.
pub fn render_keybinds_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Keybindings")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let p = Paragraph::new(keybind_lines(app))
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let max_w = area.width.saturating_sub(6).max(30);
    let width = 50u16.min(max_w);
    let approx_lines = (message.len() as u16 / width.saturating_sub(4).max(10)).max(1);
    let height = (approx_lines + 4).min(area.height.saturating_sub(4)).max(5);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Usage notes plus the live keybindings; scrolls with Up/Down.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 76u16.min(area.width.saturating_sub(4)).max(40);
    let height = 24u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Help", bold)),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled("/", italic),
            Span::raw(" then type; matches name or identification, ignoring case. Enter keeps it, Esc clears it."),
        ]),
        Line::from(vec![
            Span::raw("Dialogs: "),
            Span::styled("Tab", italic),
            Span::raw(" switches field, "),
            Span::styled("Enter", italic),
            Span::raw(" submits, "),
            Span::styled("Esc", italic),
            Span::raw(" cancels. Delete asks for confirmation ("),
            Span::styled("y", italic),
            Span::raw("/"),
            Span::styled("n", italic),
            Span::raw(")."),
        ]),
        Line::raw("Identification must be unique, alphanumeric and at least 4 characters."),
        Line::raw(""),
        Line::from(Span::styled("Keys:", bold)),
    ];
    lines.extend(keybind_lines(app));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Config: theme.conf, keybinds.conf, driver-manager.conf  ·  data: {}",
            app.store.source_label()
        ),
        Style::default().fg(app.theme.muted),
    )));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help (Esc to close)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
