//! Command-line options and the wiring from options to a ready [`AppState`].
use std::path::PathBuf;

use clap::Parser;

use crate::app::{AppState, Keymap, Settings, Theme, config_file_write_path};
use crate::source::{DriverSource, FixtureSource, JsonFileSource};
use crate::store::{DriverStore, Latency};

/// Terminal dashboard for managing drivers.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "driver-manager")]
#[command(version)]
#[command(about = "Search, page through, create, edit and delete drivers")]
pub struct Cli {
    /// JSON file with an array of `{ id, name, identification }` records.
    /// The built-in fixture is used when omitted.
    #[arg(long, value_name = "PATH", env = "DRIVER_MANAGER_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Settings file (page size, simulated latencies).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Colour theme file.
    #[arg(long, value_name = "PATH")]
    pub theme: Option<PathBuf>,

    /// Keybindings file.
    #[arg(long, value_name = "PATH")]
    pub keybinds: Option<PathBuf>,

    /// Rows per page; overrides the settings file.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub items_per_page: Option<u32>,

    /// Complete every data source operation immediately.
    #[arg(long)]
    pub no_latency: bool,

    /// Where to write the log (default: `<cache dir>/driver-manager/driver-manager.log`).
    #[arg(long, value_name = "PATH", env = "DRIVER_MANAGER_LOG")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    pub verbose: bool,
}

fn path_or_default(path: &Option<PathBuf>, name: &str) -> String {
    match path {
        Some(p) => p.to_string_lossy().into_owned(),
        None => config_file_write_path(name),
    }
}

impl Cli {
    /// Settings file contents with command-line overrides applied.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::load_or_init(&path_or_default(&self.config, "driver-manager.conf"));
        if let Some(n) = self.items_per_page {
            settings.items_per_page = n as usize;
        }
        if self.no_latency {
            let none = Latency::none();
            settings.load_latency_ms = none.load.as_millis() as u64;
            settings.save_latency_ms = none.save.as_millis() as u64;
            settings.delete_latency_ms = none.delete.as_millis() as u64;
        }
        settings
    }

    pub fn source(&self) -> Box<dyn DriverSource> {
        match &self.fixture {
            Some(path) => Box::new(JsonFileSource::new(path.clone())),
            None => Box::new(FixtureSource::new()),
        }
    }

    /// Build the store and application state; the initial load starts here.
    pub fn build_app(&self) -> AppState {
        let settings = self.settings();
        let mut store = DriverStore::new(self.source(), settings.latency());
        store.set_items_per_page(settings.items_per_page);
        tracing::info!(
            source = %store.source_label(),
            items_per_page = settings.items_per_page,
            "starting driver-manager"
        );
        let theme = Theme::load_or_init(&path_or_default(&self.theme, "theme.conf"));
        let keymap = Keymap::load_or_init(&path_or_default(&self.keybinds, "keybinds.conf"));
        AppState::new(store, theme, keymap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "driver-manager",
            "--items-per-page",
            "10",
            "--no-latency",
            "-v",
            "--fixture",
            "drivers.json",
        ]);
        assert_eq!(cli.items_per_page, Some(10));
        assert!(cli.no_latency);
        assert!(cli.verbose);
        assert_eq!(cli.fixture, Some(PathBuf::from("drivers.json")));
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(Cli::try_parse_from(["driver-manager", "--items-per-page", "0"]).is_err());
    }

    #[test]
    fn fixture_source_by_default() {
        let cli = Cli::default();
        let records = cli.source().fetch_drivers().unwrap();
        assert_eq!(records.len(), 3);
    }
}
