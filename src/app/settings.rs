//! Dashboard settings: parse/write `driver-manager.conf`.
//!
//! The file uses the same `<key> = <value>` format as the theme and keymap.
//! Supported keys:
//! - `items_per_page`: rows shown per page (at least 1)
//! - `load_latency_ms`, `save_latency_ms`, `delete_latency_ms`: simulated
//!   round-trip times for the data source

use std::time::Duration;

use crate::store::{DEFAULT_ITEMS_PER_PAGE, Latency};

/// Settings loaded from `driver-manager.conf`, before command-line overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub items_per_page: usize,
    pub load_latency_ms: u64,
    pub save_latency_ms: u64,
    pub delete_latency_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let latency = Latency::default();
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            load_latency_ms: latency.load.as_millis() as u64,
            save_latency_ms: latency.save.as_millis() as u64,
            delete_latency_ms: latency.delete.as_millis() as u64,
        }
    }
}

impl Settings {
    pub fn latency(&self) -> Latency {
        Latency {
            load: Duration::from_millis(self.load_latency_ms),
            save: Duration::from_millis(self.save_latency_ms),
            delete: Duration::from_millis(self.delete_latency_ms),
        }
    }

    /// Load settings from a file, or create defaults if the file doesn't exist.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let cfg = Self::default();
        if let Err(e) = cfg.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default settings");
        }
        cfg
    }

    /// `None` when the file cannot be read.
    pub fn from_file(path: &str) -> Option<Self> {
        std::fs::read_to_string(path).ok().map(|c| Self::parse(&c))
    }

    /// Parse file contents. Comments, blank lines, unknown keys and
    /// unparsable values are skipped, leaving the default for that key.
    pub fn parse(contents: &str) -> Self {
        let mut cfg = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            let (lhs, rhs) = (lhs.trim(), rhs.trim());
            match lhs {
                "items_per_page" => {
                    if let Some(n) = parse_num::<usize>(rhs).filter(|n| *n > 0) {
                        cfg.items_per_page = n;
                    }
                }
                "load_latency_ms" => set_num(&mut cfg.load_latency_ms, rhs),
                "save_latency_ms" => set_num(&mut cfg.save_latency_ms, rhs),
                "delete_latency_ms" => set_num(&mut cfg.delete_latency_ms, rhs),
                _ => {}
            }
        }
        cfg
    }

    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# driver-manager settings\n");
        buf.push_str("# Rows per page in the driver table\n");
        let _ = writeln!(&mut buf, "items_per_page = {}", self.items_per_page);
        buf.push_str("\n# Simulated data source latency, in milliseconds\n");
        let _ = writeln!(&mut buf, "load_latency_ms = {}", self.load_latency_ms);
        let _ = writeln!(&mut buf, "save_latency_ms = {}", self.save_latency_ms);
        let _ = writeln!(&mut buf, "delete_latency_ms = {}", self.delete_latency_ms);
        std::fs::write(path, buf)
    }
}

fn parse_num<T: std::str::FromStr>(s: &str) -> Option<T> {
    s.replace('_', "").parse().ok()
}

fn set_num(slot: &mut u64, s: &str) {
    match parse_num(s) {
        Some(v) => *slot = v,
        None => tracing::warn!(value = s, "ignoring non-numeric setting"),
    }
}
