//! Driver table, pagination footer and the two driver dialogs.
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};

use crate::app::AppState;
use crate::form::{FieldErrors, FormField};
use crate::ui::components::centered_rect;

pub fn render_loading(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Drivers")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);
    let msg = Paragraph::new("Loading drivers…")
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.accent));
    f.render_widget(msg, centered_rect(inner.width, 1, inner));
}

pub fn render_drivers_table(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Drivers")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let page = app.store.paginated_records();
    if page.is_empty() {
        let msg = if app.store.search_term().trim().is_empty() {
            "No drivers yet. Press n to add the first one."
        } else {
            "No drivers match your search."
        };
        let inner = block.inner(area);
        f.render_widget(block, area);
        let p = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted));
        f.render_widget(p, centered_rect(inner.width, 1, inner));
        return;
    }

    let rows = page.iter().map(|d| {
        Row::new(vec![
            Cell::from(d.id.to_string()),
            Cell::from(d.name.clone()),
            Cell::from(d.identification.clone()),
        ])
        .style(Style::default().fg(app.theme.text))
    });
    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(55),
        Constraint::Percentage(45),
    ];
    let header = Row::new(vec!["ID", "NAME", "IDENTIFICATION"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ")
        .column_spacing(1);

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(table, area, &mut state);
}

pub fn render_pagination(f: &mut Frame, area: Rect, app: &AppState) {
    let p = app.store.pagination();
    let (first, last) = p.shown_bounds();
    let text = format!(
        " Page {} of {}  ·  showing {}–{} of {}  ·  {} per page   (←/→ page, p: page size)",
        p.current_page,
        p.total_pages.max(1),
        first,
        last,
        p.total_items,
        p.items_per_page
    );
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(app.theme.muted)),
        area,
    );
}

fn input_line<'a>(app: &AppState, value: &'a str, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text)
    };
    let marker = if focused { "› " } else { "  " };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(format!("[{value}{cursor}]"), style),
    ])
}

pub fn render_driver_modal(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    focus: FormField,
    errors: &FieldErrors,
    general: Option<&str>,
) {
    let editing = app.store.editing().is_some();
    let (title, subtitle) = if editing {
        ("Edit driver", "Update the driver's details below.")
    } else {
        ("New driver", "Enter the new driver's details below.")
    };
    let form = app.store.form();
    let err_style = Style::default().fg(app.theme.error);

    let mut lines = vec![
        Line::from(Span::styled(subtitle, Style::default().fg(app.theme.muted))),
        Line::raw(""),
    ];
    for field in [FormField::Name, FormField::Identification] {
        lines.push(Line::from(Span::styled(
            format!("{} *", field.label()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(input_line(app, form.get(field), field == focus));
        match errors.get(field) {
            Some(msg) => lines.push(Line::from(Span::styled(format!("  {msg}"), err_style))),
            None => lines.push(Line::raw("")),
        }
    }
    if let Some(msg) = general {
        lines.push(Line::from(Span::styled(msg.to_string(), err_style)));
    }
    lines.push(Line::raw(""));
    if app.store.is_saving() {
        lines.push(Line::from(Span::styled(
            "Saving…",
            Style::default().fg(app.theme.accent),
        )));
    } else {
        let action = if editing { "Update driver" } else { "Create driver" };
        lines.push(Line::from(vec![
            Span::styled(format!("[Enter] {action}"), Style::default().fg(app.theme.accent)),
            Span::raw("   [Tab] next field   [Esc] cancel"),
        ]));
    }

    let height = lines.len() as u16 + 2;
    let rect = centered_rect(64, height, area);
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn render_delete_modal(f: &mut Frame, area: Rect, app: &AppState, selected: usize) {
    let Some(driver) = app.store.delete_target() else {
        return;
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::raw("Are you sure you want to permanently delete this driver?"),
        Line::raw(""),
        Line::from(vec![Span::styled("Name: ", bold), Span::raw(driver.name.clone())]),
        Line::from(vec![
            Span::styled("ID:   ", bold),
            Span::raw(driver.identification.clone()),
        ]),
        Line::raw(""),
    ];
    if app.store.is_deleting() {
        lines.push(Line::from(Span::styled(
            "Deleting…",
            Style::default().fg(app.theme.error),
        )));
    } else {
        let button = |label: &'static str, idx: usize| {
            if idx == selected {
                Span::styled(
                    label,
                    Style::default()
                        .fg(app.theme.highlight_fg)
                        .bg(app.theme.highlight_bg)
                        .add_modifier(Modifier::REVERSED),
                )
            } else {
                Span::raw(label)
            }
        };
        lines.push(Line::from(vec![
            button("[ Delete ]", 0),
            Span::raw("   "),
            button("[ Cancel ]", 1),
        ]));
    }

    let rect = centered_rect(62, lines.len() as u16 + 2, area);
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled("Delete driver", Style::default().fg(app.theme.error)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.error)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
