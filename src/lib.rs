//! Library crate for driver-manager.
//!
//! This crate exposes the building blocks of the dashboard:
//! - Driver state holder with search, paging and timed operations (`store`)
//! - Data sources and the driver record type (`source`)
//! - Dialog draft and field validation (`form`)
//! - Application state, key handling and config files (`app`)
//! - Command-line options and logging setup (`cli`, `logging`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `driver-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod app;
pub mod cli;
pub mod error;
pub mod form;
pub mod logging;
pub mod search;
pub mod source;
pub mod store;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
pub use source::DriverRecord;
pub use store::DriverStore;
