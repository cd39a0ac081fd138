//! Driver list state: records, search, paging, dialogs and simulated calls.
//!
//! [`DriverStore`] is the single owner of everything the dashboard shows.
//! Derived views (`filtered_records`, `pagination`, `paginated_records`,
//! `statistics`) are recomputed on every call from the current records,
//! search term and cursor.
//!
//! Remote calls are simulated: `load`, `save_driver` and
//! `confirm_delete_driver` only start an operation with a deadline, and
//! [`DriverStore::poll`] applies every operation whose deadline has passed.
//! The event loop calls `poll` on each turn.
pub mod op;
pub mod pagination;

use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::error::StoreError;
use crate::form::{DriverForm, FormField};
use crate::search;
use crate::source::{DriverRecord, DriverSource, FixtureSource};

pub use op::{Latency, OpState};
pub use pagination::{
    DEFAULT_ITEMS_PER_PAGE, PAGE_SIZE_OPTIONS, PageCursor, Pagination, next_page_size,
};

/// Headline numbers shown above the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverStatistics {
    pub total_drivers: usize,
    /// Every driver counts as active; there is no status field yet.
    pub active_drivers: usize,
    /// Placeholder estimate: 30% of the fleet, rounded down.
    pub new_this_month: usize,
}

impl DriverStatistics {
    pub fn from_total(total: usize) -> Self {
        Self {
            total_drivers: total,
            active_drivers: total,
            new_this_month: total * 3 / 10,
        }
    }
}

/// What a call to [`DriverStore::poll`] finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    Loaded { count: usize },
    LoadFailed { message: String },
    Created(DriverRecord),
    Updated(DriverRecord),
    Deleted(DriverRecord),
}

/// Validated draft waiting for its simulated round trip.
#[derive(Clone, Debug)]
struct PendingSave {
    editing_id: Option<u32>,
    name: String,
    identification: String,
}

/// One past the current maximum, 1 for an empty list. `None` once the
/// maximum is `u32::MAX`.
pub fn next_id(drivers: &[DriverRecord]) -> Option<u32> {
    drivers.iter().map(|d| d.id).max().unwrap_or(0).checked_add(1)
}

pub struct DriverStore {
    source: Box<dyn DriverSource>,
    latency: Latency,
    drivers: Vec<DriverRecord>,
    search_term: String,
    cursor: PageCursor,
    form: DriverForm,
    editing: Option<DriverRecord>,
    delete_target: Option<DriverRecord>,
    dialog_open: bool,
    delete_dialog_open: bool,
    loading: OpState,
    saving: OpState,
    deleting: OpState,
    pending_save: Option<PendingSave>,
    pending_delete: Option<DriverRecord>,
}

impl DriverStore {
    /// Create an empty store and start loading from `source`.
    pub fn new(source: Box<dyn DriverSource>, latency: Latency) -> Self {
        let mut store = Self::empty(source, latency);
        store.load();
        store
    }

    /// A store already holding `drivers`, with nothing in flight.
    pub fn with_records(drivers: Vec<DriverRecord>, latency: Latency) -> Self {
        let mut store = Self::empty(
            Box::new(FixtureSource::with_drivers(drivers.clone())),
            latency,
        );
        store.drivers = drivers;
        store
    }

    fn empty(source: Box<dyn DriverSource>, latency: Latency) -> Self {
        Self {
            source,
            latency,
            drivers: Vec::new(),
            search_term: String::new(),
            cursor: PageCursor::default(),
            form: DriverForm::default(),
            editing: None,
            delete_target: None,
            dialog_open: false,
            delete_dialog_open: false,
            loading: OpState::Idle,
            saving: OpState::Idle,
            deleting: OpState::Idle,
            pending_save: None,
            pending_delete: None,
        }
    }

    // ---- simulated calls ----

    pub fn load(&mut self) {
        self.load_at(Instant::now());
    }

    /// Start fetching from the source. Ignored while a load is pending.
    pub fn load_at(&mut self, now: Instant) {
        if self.loading.is_in_flight() {
            return;
        }
        debug!(source = %self.source.describe(), "loading drivers");
        self.loading = OpState::start(now, self.latency.load);
    }

    pub fn save_driver(&mut self) -> Result<(), StoreError> {
        self.save_driver_at(Instant::now())
    }

    /// Validate the draft and submit it.
    ///
    /// Errors leave the dialog open and the records untouched. On success the
    /// record is created or updated, and the dialog closed, once the save
    /// latency has elapsed.
    pub fn save_driver_at(&mut self, now: Instant) -> Result<(), StoreError> {
        if self.saving.is_in_flight() {
            warn!("save requested while another save is pending");
            return Err(StoreError::SaveInFlight);
        }

        let name = self.form.name.trim().to_string();
        let identification = self.form.identification.trim().to_string();
        if name.is_empty() || identification.is_empty() {
            warn!("rejected driver with blank fields");
            return Err(StoreError::MissingFields);
        }

        let editing_id = self.editing.as_ref().map(|d| d.id);
        if editing_id.is_none() && next_id(&self.drivers).is_none() {
            warn!("rejected create: driver ids exhausted");
            return Err(StoreError::IdsExhausted);
        }
        let duplicate = self
            .drivers
            .iter()
            .any(|d| d.identification == identification && Some(d.id) != editing_id);
        if duplicate {
            warn!(%identification, "rejected duplicate identification");
            return Err(StoreError::DuplicateIdentification { identification });
        }

        debug!(?editing_id, "saving driver");
        self.pending_save = Some(PendingSave {
            editing_id,
            name,
            identification,
        });
        self.saving = OpState::start(now, self.latency.save);
        Ok(())
    }

    pub fn confirm_delete_driver(&mut self) -> bool {
        self.confirm_delete_driver_at(Instant::now())
    }

    /// Start deleting the selected target. Returns `false` (and does nothing)
    /// when no target is selected or a delete is already pending.
    pub fn confirm_delete_driver_at(&mut self, now: Instant) -> bool {
        if self.deleting.is_in_flight() {
            return false;
        }
        let Some(target) = self.delete_target.clone() else {
            return false;
        };
        debug!(id = target.id, "deleting driver");
        self.pending_delete = Some(target);
        self.deleting = OpState::start(now, self.latency.delete);
        true
    }

    /// Apply every pending operation whose deadline is at or before `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<Completion> {
        let mut done = Vec::new();
        if self.loading.is_due(now) {
            self.loading = OpState::Idle;
            done.push(self.finish_load());
        }
        if self.saving.is_due(now) {
            self.saving = OpState::Idle;
            if let Some(pending) = self.pending_save.take() {
                done.extend(self.finish_save(pending));
            }
        }
        if self.deleting.is_due(now) {
            self.deleting = OpState::Idle;
            if let Some(target) = self.pending_delete.take() {
                done.push(self.finish_delete(target));
            }
        }
        done
    }

    fn finish_load(&mut self) -> Completion {
        match self.source.fetch_drivers() {
            Ok(drivers) => {
                info!(count = drivers.len(), source = %self.source.describe(), "drivers loaded");
                let count = drivers.len();
                self.drivers = drivers;
                Completion::Loaded { count }
            }
            Err(e) => {
                error!(source = %self.source.describe(), error = %e, "failed to load drivers");
                Completion::LoadFailed {
                    message: e.to_string(),
                }
            }
        }
    }

    fn finish_save(&mut self, pending: PendingSave) -> Option<Completion> {
        let PendingSave {
            editing_id,
            name,
            identification,
        } = pending;

        let outcome = match editing_id {
            Some(id) => {
                if self.drivers.iter().any(|d| d.id == id) {
                    let updated = DriverRecord::new(id, name, identification);
                    self.drivers = self
                        .drivers
                        .iter()
                        .map(|d| if d.id == id { updated.clone() } else { d.clone() })
                        .collect();
                    info!(id, "driver updated");
                    Some(Completion::Updated(updated))
                } else {
                    warn!(id, "edited driver disappeared before the save completed");
                    None
                }
            }
            None => match next_id(&self.drivers) {
                Some(id) => {
                    let created = DriverRecord::new(id, name, identification);
                    let mut next = self.drivers.clone();
                    next.push(created.clone());
                    self.drivers = next;
                    info!(id = created.id, "driver created");
                    Some(Completion::Created(created))
                }
                None => {
                    warn!("driver ids exhausted before the save completed");
                    None
                }
            },
        };

        self.close_modal();
        outcome
    }

    fn finish_delete(&mut self, target: DriverRecord) -> Completion {
        self.drivers = self
            .drivers
            .iter()
            .filter(|d| d.id != target.id)
            .cloned()
            .collect();
        self.close_delete_modal();

        let last_page = self
            .filtered_count()
            .div_ceil(self.cursor.items_per_page.max(1))
            .max(1);
        if self.cursor.page > last_page {
            debug!(from = self.cursor.page, to = last_page, "page moved back after delete");
            self.cursor.page = last_page;
        }
        info!(id = target.id, "driver deleted");
        Completion::Deleted(target)
    }

    // ---- search and paging ----

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.cursor.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.cursor.page = page.max(1);
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.cursor.items_per_page = items_per_page.max(1);
        self.cursor.page = 1;
    }

    /// Step to the next page if there is one.
    pub fn next_page(&mut self) {
        let p = self.pagination();
        if p.has_next() {
            self.cursor.page = p.current_page + 1;
        }
    }

    pub fn prev_page(&mut self) {
        let p = self.pagination();
        if p.has_prev() {
            self.cursor.page = p.current_page - 1;
        }
    }

    // ---- dialogs ----

    pub fn open_create_modal(&mut self) {
        self.editing = None;
        self.form = DriverForm::default();
        self.dialog_open = true;
    }

    pub fn open_edit_modal(&mut self, driver: &DriverRecord) {
        self.editing = Some(driver.clone());
        self.form = DriverForm::from_record(driver);
        self.dialog_open = true;
    }

    pub fn open_delete_modal(&mut self, driver: &DriverRecord) {
        self.delete_target = Some(driver.clone());
        self.delete_dialog_open = true;
    }

    pub fn update_form_data(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn close_modal(&mut self) {
        self.dialog_open = false;
        self.editing = None;
        self.form = DriverForm::default();
    }

    pub fn close_delete_modal(&mut self) {
        self.delete_dialog_open = false;
        self.delete_target = None;
    }

    // ---- derived views ----

    pub fn filtered_records(&self) -> Vec<DriverRecord> {
        search::filter_records(&self.drivers, &self.search_term)
    }

    fn filtered_count(&self) -> usize {
        let q = search::normalize(&self.search_term);
        self.drivers.iter().filter(|d| search::matches(d, &q)).count()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::compute(self.filtered_count(), self.cursor)
    }

    pub fn paginated_records(&self) -> Vec<DriverRecord> {
        let filtered = self.filtered_records();
        let range = Pagination::compute(filtered.len(), self.cursor).range();
        filtered[range].to_vec()
    }

    pub fn statistics(&self) -> DriverStatistics {
        DriverStatistics::from_total(self.drivers.len())
    }

    // ---- plain accessors ----

    pub fn records(&self) -> &[DriverRecord] {
        &self.drivers
    }

    pub fn find(&self, id: u32) -> Option<&DriverRecord> {
        self.drivers.iter().find(|d| d.id == id)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn form(&self) -> &DriverForm {
        &self.form
    }

    pub fn editing(&self) -> Option<&DriverRecord> {
        self.editing.as_ref()
    }

    pub fn delete_target(&self) -> Option<&DriverRecord> {
        self.delete_target.as_ref()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn is_delete_modal_open(&self) -> bool {
        self.delete_dialog_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_in_flight()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_in_flight()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting.is_in_flight()
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }
}
