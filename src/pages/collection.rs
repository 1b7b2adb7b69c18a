//! Resource Collection State
//!
//! Signals behind one resource page: the fetched list, the derived
//! search/sort/page views, and the dialog draft. Mutations go to the
//! backend first and are spliced into the local list on success.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, Endpoint};
use crate::context::{use_app_context, AppContext};
use crate::crud::{
    apply_load, error_for, filter_records, insert_record, remove_record, replace_record, sort_records,
    FieldError, Pagination, Record, SortState, Validate,
};
use crate::store::{store_error, store_success, use_app_store, AppStore};

/// Everything a resource page needs from its record type
pub trait PageRecord: Record + Endpoint + Validate + Default {}

impl<T: Record + Endpoint + Validate + Default> PageRecord for T {}

pub struct Collection<T: PageRecord> {
    pub items: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,
    pub search: RwSignal<String>,
    pub sort: RwSignal<Option<SortState>>,
    pub pagination: RwSignal<Pagination>,
    /// Record being created or edited; the dialog is open while set
    pub draft: RwSignal<Option<T>>,
    pub errors: RwSignal<Vec<FieldError>>,
    pub saving: RwSignal<bool>,
    store: AppStore,
    ctx: AppContext,
}

impl<T: PageRecord> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: PageRecord> Copy for Collection<T> {}

impl<T: PageRecord> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            load_error: RwSignal::new(None),
            search: RwSignal::new(String::new()),
            sort: RwSignal::new(None),
            pagination: RwSignal::new(Pagination::default()),
            draft: RwSignal::new(None),
            errors: RwSignal::new(Vec::new()),
            saving: RwSignal::new(false),
            store: use_app_store(),
            ctx: use_app_context(),
        }
    }

    /// Fetch the list; a failure leaves the page in its error state
    pub fn load(self) {
        self.loading.set(true);
        spawn_local(async move {
            let outcome = api::list::<T>().await.map_err(|e| e.message);
            match &outcome {
                Ok(items) => {
                    web_sys::console::log_1(&format!("[{}] Loaded {} records", T::PATH, items.len()).into());
                }
                Err(message) => store_error(&self.store, message.clone()),
            }
            let mut error = None;
            self.items.update(|items| error = apply_load(items, outcome));
            self.load_error.set(error);
            self.loading.set(false);
        });
    }

    // ========================
    // Derived views
    // ========================

    /// Records matching the search, in sort order
    pub fn visible(self) -> Memo<Vec<T>> {
        Memo::new(move |_| {
            let term = self.search.get();
            let mut rows = self.items.with(|items| filter_records(items, &term));
            if let Some(sort) = self.sort.get() {
                sort_records(&mut rows, &sort);
            }
            rows
        })
    }

    /// Current page of `visible`
    pub fn page_rows(self, visible: Memo<Vec<T>>) -> Memo<Vec<T>> {
        Memo::new(move |_| {
            visible.with(|rows| self.pagination.get().clamp(rows.len()).slice(rows))
        })
    }

    // ========================
    // Dialog
    // ========================

    pub fn open_create(self) {
        self.errors.set(Vec::new());
        self.draft.set(Some(T::default()));
    }

    pub fn open_edit(self, record: T) {
        self.errors.set(Vec::new());
        self.draft.set(Some(record));
    }

    pub fn close(self) {
        self.draft.set(None);
        self.errors.set(Vec::new());
    }

    pub fn is_open(self) -> Signal<bool> {
        Signal::derive(move || self.draft.with(Option::is_some))
    }

    pub fn dialog_title(self, noun: &'static str) -> Signal<String> {
        Signal::derive(move || {
            let creating = self.draft.with(|d| d.as_ref().map_or(true, Record::is_new));
            format!("{} {}", if creating { "Tambah" } else { "Ubah" }, noun)
        })
    }

    /// Apply an edit to the open draft
    pub fn edit(self, change: impl FnOnce(&mut T)) {
        self.draft.update(|draft| {
            if let Some(draft) = draft {
                change(draft);
            }
        });
    }

    /// Read one value out of the draft
    pub fn field<V>(self, get: impl Fn(&T) -> V + Send + Sync + 'static) -> Signal<V>
    where
        V: Default + Clone + Send + Sync + 'static,
    {
        Signal::derive(move || self.draft.with(|d| d.as_ref().map(&get).unwrap_or_default()))
    }

    pub fn error(self, field: &'static str) -> Signal<Option<String>> {
        Signal::derive(move || self.errors.with(|errors| error_for(errors, field)))
    }

    // ========================
    // Mutations
    // ========================

    /// Validate the draft, then POST or PUT it
    pub fn submit(self) {
        let Some(draft) = self.draft.get_untracked() else {
            return;
        };
        let errors = draft.validate();
        if !errors.is_empty() {
            self.errors.set(errors);
            return;
        }
        self.errors.set(Vec::new());
        self.saving.set(true);

        spawn_local(async move {
            let result = if draft.is_new() {
                api::create(&draft).await.map(|created| {
                    self.items.update(|items| insert_record(items, created));
                    "Data berhasil ditambahkan"
                })
            } else {
                api::update(draft.id(), &draft).await.map(|updated| {
                    self.apply(updated);
                    "Data berhasil diperbarui"
                })
            };
            self.saving.set(false);
            match result {
                Ok(message) => {
                    self.close();
                    store_success(&self.store, message);
                    self.ctx.reload();
                }
                Err(e) => store_error(&self.store, e.message),
            }
        });
    }

    pub fn remove(self, record: T) {
        spawn_local(async move {
            match api::delete::<T>(record.id()).await {
                Ok(()) => {
                    self.items.update(|items| remove_record(items, &record.key()));
                    let total = self.items.with_untracked(Vec::len);
                    self.pagination.update(|p| *p = p.clamp(total));
                    store_success(&self.store, "Data berhasil dihapus");
                    self.ctx.reload();
                }
                Err(e) => store_error(&self.store, e.message),
            }
        });
    }

    /// Push a server answer obtained outside `submit` into the list
    pub fn apply(self, record: T) {
        self.items.update(|items| {
            if !replace_record(items, record.clone()) {
                insert_record(items, record);
            }
        });
    }
}
