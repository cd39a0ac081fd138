use crate::error::{Context, Result, simple_error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// A single driver as listed by the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub id: u32,
    pub name: String,
    pub identification: String,
}

impl DriverRecord {
    pub fn new(id: u32, name: impl Into<String>, identification: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            identification: identification.into(),
        }
    }
}

/// Where the initial driver list comes from.
///
/// The store only reads through this trait, so swapping the fixture for a
/// remote API means adding another implementation.
pub trait DriverSource {
    fn fetch_drivers(&self) -> Result<Vec<DriverRecord>>;

    /// Short label used in logs and the status bar.
    fn describe(&self) -> String;
}

/// The built-in seed data.
pub fn seed_drivers() -> Vec<DriverRecord> {
    vec![
        DriverRecord::new(1, "Carlos Mendoza", "12345678"),
        DriverRecord::new(2, "María García", "87654321"),
        DriverRecord::new(3, "José Rodríguez", "11223344"),
    ]
}

/// Serves a fixed list held in memory.
#[derive(Clone, Debug)]
pub struct FixtureSource {
    drivers: Vec<DriverRecord>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self {
            drivers: seed_drivers(),
        }
    }

    pub fn with_drivers(drivers: Vec<DriverRecord>) -> Self {
        Self { drivers }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverSource for FixtureSource {
    fn fetch_drivers(&self) -> Result<Vec<DriverRecord>> {
        Ok(self.drivers.clone())
    }

    fn describe(&self) -> String {
        "built-in fixture".to_string()
    }
}

/// Reads a JSON array of `{ "id", "name", "identification" }` objects.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DriverSource for JsonFileSource {
    fn fetch_drivers(&self) -> Result<Vec<DriverRecord>> {
        let contents = std::fs::read_to_string(&self.path)
            .with_ctx(|| format!("read fixture {}", self.path.display()))?;
        let drivers: Vec<DriverRecord> = serde_json::from_str(&contents)
            .with_ctx(|| format!("parse fixture {}", self.path.display()))?;
        normalize_records(drivers)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Trim both text fields, then reject blank fields and duplicate ids or
/// identifications, comparing the trimmed values the store compares.
fn normalize_records(drivers: Vec<DriverRecord>) -> Result<Vec<DriverRecord>> {
    let mut ids = HashSet::new();
    let mut idents = HashSet::new();
    let mut out = Vec::with_capacity(drivers.len());
    for d in drivers {
        let name = d.name.trim();
        let identification = d.identification.trim();
        if name.is_empty() || identification.is_empty() {
            return Err(simple_error(format!(
                "driver id {} has a blank name or identification",
                d.id
            )));
        }
        if !ids.insert(d.id) {
            return Err(simple_error(format!("duplicate driver id {}", d.id)));
        }
        if !idents.insert(identification.to_string()) {
            return Err(simple_error(format!(
                "duplicate identification '{identification}'"
            )));
        }
        out.push(DriverRecord::new(d.id, name, identification));
    }
    Ok(out)
}
