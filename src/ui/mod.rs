pub mod components;
pub mod drivers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, root[0], app);
    components::render_statistics(f, root[1], app);

    let table_area = if app.show_keybinds {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(root[2]);
        components::render_keybinds_panel(f, body[1], app);
        body[0]
    } else {
        root[2]
    };

    if app.store.is_loading() {
        drivers::render_loading(f, table_area, app);
    } else {
        drivers::render_drivers_table(f, table_area, app);
        drivers::render_pagination(f, root[3], app);
    }

    components::render_status_bar(f, root[4], app);

    if let Some(modal) = &app.modal {
        render_modal(f, f.area(), app, modal);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let term = app.store.search_term();
    let search = match app.input_mode {
        InputMode::Search => Span::styled(
            format!("Search: {term}_"),
            Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD),
        ),
        _ if !term.is_empty() => Span::styled(
            format!("Search: {term}"),
            Style::default().fg(app.theme.highlight_fg),
        ),
        _ => Span::styled("/ to search", Style::default().fg(app.theme.muted)),
    };
    let line = Line::from(vec![
        Span::styled(
            "Driver management",
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  ({})   ", app.operator)),
        search,
        Span::styled(
            "   n: new  e: edit  d: delete  ?: help  q: quit",
            Style::default().fg(app.theme.muted),
        ),
    ]);
    let p = Paragraph::new(line)
        .block(
            Block::default()
                .title("driver-manager")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState, modal: &ModalState) {
    match modal {
        ModalState::DriverForm {
            focus,
            errors,
            general,
        } => drivers::render_driver_modal(f, area, app, *focus, errors, general.as_deref()),
        ModalState::DeleteConfirm { selected } => {
            drivers::render_delete_modal(f, area, app, *selected)
        }
        ModalState::Info { message } => components::render_info_modal(f, area, app, message),
        ModalState::Help { scroll } => components::render_help_modal(f, area, app, *scroll),
    }
}
