//! Application state types and entry glue.
//!
//! Holds the [`DriverStore`] together with the view-only state the terminal
//! needs (selection, input mode, dialog focus), plus helpers to locate config
//! files. The event loop lives in [`update`] and is re-exported as `run`.
//!
pub mod keymap;
pub mod settings;
pub mod theme;
pub mod update;

use std::path::PathBuf;
use std::time::Instant;

use crate::form::{FieldErrors, FormField};
use crate::source::DriverRecord;
use crate::store::DriverStore;

pub use keymap::{KeyAction, Keymap};
pub use settings::Settings;
pub use theme::Theme;

/// Directory name used under the platform config/cache dirs.
pub const APP_DIR: &str = "driver-manager";

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Dialog currently drawn on top of the table.
///
/// The form and delete dialogs mirror the store's own open flags; the
/// variants only carry what the store does not track (focus, inline errors,
/// which button is highlighted).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    DriverForm {
        focus: FormField,
        errors: FieldErrors,
        general: Option<String>,
    },
    DeleteConfirm {
        /// 0 = Delete, 1 = Cancel
        selected: usize,
    },
    Info {
        message: String,
    },
    Help {
        scroll: u16,
    },
}

impl ModalState {
    pub fn driver_form() -> Self {
        ModalState::DriverForm {
            focus: FormField::Name,
            errors: FieldErrors::default(),
            general: None,
        }
    }
}

pub struct AppState {
    pub started_at: Instant,
    pub store: DriverStore,
    /// Row within the current page.
    pub selected_index: usize,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    pub show_keybinds: bool,
    pub status: Option<String>,
    pub operator: String,
}

impl AppState {
    pub fn new(store: DriverStore, theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            store,
            selected_index: 0,
            input_mode: InputMode::Normal,
            theme,
            keymap,
            modal: None,
            show_keybinds: false,
            status: None,
            operator: current_operator(),
        }
    }

    /// Default theme and keys; used by tests and embedders.
    pub fn with_store(store: DriverStore) -> Self {
        Self::new(store, Theme::mocha(), Keymap::default())
    }

    /// Driver under the cursor on the current page.
    pub fn selected_driver(&self) -> Option<DriverRecord> {
        self.store
            .paginated_records()
            .into_iter()
            .nth(self.selected_index)
    }

    /// Keep the selection on an existing row after the page changed size.
    pub fn clamp_selection(&mut self) {
        let rows = self.store.paginated_records().len();
        self.selected_index = self.selected_index.min(rows.saturating_sub(1));
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }
}

/// Login name of whoever runs the dashboard, shown in the header.
pub fn current_operator() -> String {
    users::get_current_username()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Find an existing config file: the working directory first, then the
/// platform config dir (`~/.config/driver-manager/<name>` on Linux).
pub fn config_file_read_path(name: &str) -> Option<String> {
    let local = PathBuf::from(name);
    if local.exists() {
        return Some(name.to_string());
    }
    let p = dirs::config_dir()?.join(APP_DIR).join(name);
    p.exists().then(|| p.to_string_lossy().into_owned())
}

/// Where to create a config file that does not exist yet.
pub fn config_file_write_path(name: &str) -> String {
    if let Some(existing) = config_file_read_path(name) {
        return existing;
    }
    match dirs::config_dir() {
        Some(dir) => {
            let dir = dir.join(APP_DIR);
            if std::fs::create_dir_all(&dir).is_ok() {
                return dir.join(name).to_string_lossy().into_owned();
            }
            name.to_string()
        }
        None => name.to_string(),
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
