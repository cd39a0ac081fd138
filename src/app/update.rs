use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::app::{AppState, InputMode, KeyAction, ModalState};
use crate::form::FormField;
use crate::store::{Completion, next_page_size};
use crate::ui;

/// Whether the loop should keep going after a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) == Flow::Quit {
                    break;
                }
            }
        }

        let done = app.store.poll(Instant::now());
        apply_completions(app, done);
    }

    debug!(uptime = ?app.started_at.elapsed(), "leaving event loop");
    Ok(())
}

/// Route one key press according to the current input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => {
            handle_search_key(app, key.code);
            Flow::Continue
        }
        InputMode::Modal => {
            handle_modal_key(app, key.code);
            Flow::Continue
        }
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    if app.store.is_loading() && !matches!(action, KeyAction::Quit | KeyAction::OpenHelp) {
        return Flow::Continue;
    }
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::Ignore => {}
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::ClearSearch => {
            if !app.store.search_term().is_empty() {
                app.store.set_search_term("");
                app.selected_index = 0;
            }
        }
        KeyAction::NewDriver => {
            app.store.open_create_modal();
            app.open_modal(ModalState::driver_form());
        }
        KeyAction::EditSelection => {
            match app.selected_driver() {
                Some(driver) => {
                    app.store.open_edit_modal(&driver);
                    app.open_modal(ModalState::driver_form());
                }
                None => no_selection(app),
            }
        }
        KeyAction::DeleteSelection => {
            match app.selected_driver() {
                Some(driver) => {
                    app.store.open_delete_modal(&driver);
                    app.open_modal(ModalState::DeleteConfirm { selected: 1 });
                }
                None => no_selection(app),
            }
        }
        KeyAction::MoveUp => move_up(app),
        KeyAction::MoveDown => move_down(app),
        KeyAction::PrevPage => {
            app.store.prev_page();
            app.selected_index = 0;
        }
        KeyAction::NextPage => {
            app.store.next_page();
            app.selected_index = 0;
        }
        KeyAction::CyclePageSize => {
            let next = next_page_size(app.store.cursor().items_per_page);
            app.store.set_items_per_page(next);
            app.selected_index = 0;
            app.status = Some(format!("{next} drivers per page"));
        }
        KeyAction::OpenHelp => app.open_modal(ModalState::Help { scroll: 0 }),
        KeyAction::ToggleKeybindsPane => app.show_keybinds = !app.show_keybinds,
    }
    Flow::Continue
}

fn no_selection(app: &mut AppState) {
    app.open_modal(ModalState::Info {
        message: "No driver selected. Press n to add one or Esc to clear the search.".to_string(),
    });
}

/// Up from the first row continues on the previous page's last row.
fn move_up(app: &mut AppState) {
    if app.selected_index > 0 {
        app.selected_index -= 1;
    } else if app.store.pagination().has_prev() {
        app.store.prev_page();
        app.selected_index = app.store.paginated_records().len().saturating_sub(1);
    }
}

fn move_down(app: &mut AppState) {
    let rows = app.store.paginated_records().len();
    if app.selected_index + 1 < rows {
        app.selected_index += 1;
    } else if app.store.pagination().has_next() {
        app.store.next_page();
        app.selected_index = 0;
    }
}

/// Every edit re-filters immediately and jumps back to page 1.
fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.store.set_search_term("");
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            let mut term = app.store.search_term().to_string();
            term.pop();
            app.store.set_search_term(term);
        }
        KeyCode::Char(c) => {
            let mut term = app.store.search_term().to_string();
            term.push(c);
            app.store.set_search_term(term);
        }
        _ => return,
    }
    app.selected_index = 0;
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    let Some(modal) = app.modal.take() else {
        app.input_mode = InputMode::Normal;
        return;
    };
    app.modal = match modal {
        ModalState::DriverForm {
            focus,
            errors,
            general,
        } => form_key(app, code, focus, errors, general),
        ModalState::DeleteConfirm { selected } => delete_key(app, code, selected),
        ModalState::Info { message } => match code {
            KeyCode::Esc | KeyCode::Enter => None,
            _ => Some(ModalState::Info { message }),
        },
        ModalState::Help { scroll } => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => None,
            KeyCode::Up | KeyCode::Char('k') => Some(ModalState::Help {
                scroll: scroll.saturating_sub(1),
            }),
            KeyCode::Down | KeyCode::Char('j') => Some(ModalState::Help {
                scroll: scroll.saturating_add(1),
            }),
            _ => Some(ModalState::Help { scroll }),
        },
    };
    if app.modal.is_none() {
        app.input_mode = InputMode::Normal;
    }
}

fn form_key(
    app: &mut AppState,
    code: KeyCode,
    mut focus: FormField,
    mut errors: crate::form::FieldErrors,
    mut general: Option<String>,
) -> Option<ModalState> {
    // Inputs are frozen until the pending save lands.
    if app.store.is_saving() {
        return Some(ModalState::DriverForm {
            focus,
            errors,
            general,
        });
    }
    match code {
        KeyCode::Esc => {
            app.store.close_modal();
            return None;
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => focus = focus.next(),
        KeyCode::Backspace | KeyCode::Char(_) => {
            let mut value = app.store.form().get(focus).to_string();
            match code {
                KeyCode::Char(c) => value.push(c),
                _ => {
                    value.pop();
                }
            }
            app.store.update_form_data(focus, value);
            errors.clear(focus);
            general = None;
        }
        KeyCode::Enter => {
            let field_errors = app.store.form().validate();
            if field_errors.is_empty() {
                match app.store.save_driver() {
                    Ok(()) => general = None,
                    Err(e) => general = Some(e.to_string()),
                }
            } else {
                if field_errors.name.is_none() {
                    focus = FormField::Identification;
                } else {
                    focus = FormField::Name;
                }
                errors = field_errors;
            }
        }
        _ => {}
    }
    Some(ModalState::DriverForm {
        focus,
        errors,
        general,
    })
}

fn delete_key(app: &mut AppState, code: KeyCode, mut selected: usize) -> Option<ModalState> {
    if app.store.is_deleting() {
        return Some(ModalState::DeleteConfirm { selected });
    }
    match code {
        KeyCode::Esc | KeyCode::Char('n') => {
            app.store.close_delete_modal();
            return None;
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
            selected = if selected == 0 { 1 } else { 0 };
        }
        KeyCode::Char('y') => {
            app.store.confirm_delete_driver();
        }
        KeyCode::Enter => {
            if selected == 0 {
                app.store.confirm_delete_driver();
            } else {
                app.store.close_delete_modal();
                return None;
            }
        }
        _ => {}
    }
    Some(ModalState::DeleteConfirm { selected })
}

/// Reflect finished store operations in the view state.
pub fn apply_completions(app: &mut AppState, done: Vec<Completion>) {
    for completion in done {
        match completion {
            Completion::Loaded { count } => {
                app.status = Some(format!("Loaded {count} drivers from {}", app.store.source_label()));
            }
            // Load failures are only logged by the store.
            Completion::LoadFailed { .. } => {}
            Completion::Created(d) => {
                app.status = Some(format!("Created driver #{} {}", d.id, d.name));
            }
            Completion::Updated(d) => {
                app.status = Some(format!("Updated driver #{} {}", d.id, d.name));
            }
            Completion::Deleted(d) => {
                app.status = Some(format!("Deleted driver #{} {}", d.id, d.name));
            }
        }
    }
    sync_dialogs(app);
}

/// Drop dialogs the store has closed and keep the selection on a real row.
fn sync_dialogs(app: &mut AppState) {
    let stale = match &app.modal {
        Some(ModalState::DriverForm { .. }) => !app.store.is_dialog_open(),
        Some(ModalState::DeleteConfirm { .. }) => !app.store.is_delete_modal_open(),
        _ => false,
    };
    if stale {
        app.close_modal();
    }
    app.clamp_selection();
}
