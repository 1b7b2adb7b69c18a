//! Table Logic
//!
//! Pure helpers behind every resource page: search filtering, single-key
//! sorting, pagination, draft validation and splicing server answers back
//! into the local list.

use std::cmp::Ordering;

// ========================
// Records
// ========================

/// Value a column sorts by
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    pub fn text(value: &str) -> Self {
        SortValue::Text(value.to_lowercase())
    }

    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            // Numbers before text when a column mixes both
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// A row shown in a resource table
pub trait Record: Clone + PartialEq + Send + Sync + 'static {
    /// Server-assigned id; 0 for drafts not yet saved
    fn id(&self) -> u32;

    /// Key unique within one listing
    fn key(&self) -> String {
        self.id().to_string()
    }

    /// Displayed values the search box matches against
    fn search_fields(&self) -> Vec<String>;

    /// Value for the column named `key`
    fn sort_value(&self, key: &str) -> SortValue;

    fn is_new(&self) -> bool {
        self.id() == 0
    }
}

// ========================
// Filtering and sorting
// ========================

/// Keep records where any displayed field contains `term`, ignoring case
pub fn filter_records<T: Record>(records: &[T], term: &str) -> Vec<T> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| {
            r.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: &'static str,
    pub direction: Direction,
}

impl SortState {
    pub fn ascending(key: &'static str) -> Self {
        Self {
            key,
            direction: Direction::Ascending,
        }
    }

    /// Clicking the active column flips direction; a new column starts ascending
    pub fn toggle(current: Option<&SortState>, key: &'static str) -> SortState {
        match current {
            Some(state) if state.key == key => SortState {
                key,
                direction: match state.direction {
                    Direction::Ascending => Direction::Descending,
                    Direction::Descending => Direction::Ascending,
                },
            },
            _ => SortState::ascending(key),
        }
    }

    /// Arrow shown next to a header
    pub fn indicator(current: Option<&SortState>, key: &str) -> &'static str {
        match current {
            Some(state) if state.key == key => match state.direction {
                Direction::Ascending => "▲",
                Direction::Descending => "▼",
            },
            _ => "",
        }
    }
}

/// Stable sort by one column
pub fn sort_records<T: Record>(records: &mut [T], sort: &SortState) {
    records.sort_by(|a, b| {
        let ord = a.sort_value(sort.key).compare(&b.sort_value(sort.key));
        match sort.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
}

// ========================
// Loading
// ========================

/// Fold a list fetch into the page state and return the new error state.
/// A failed fetch keeps the rows already shown.
pub fn apply_load<T>(items: &mut Vec<T>, outcome: Result<Vec<T>, String>) -> Option<String> {
    match outcome {
        Ok(fresh) => {
            *items = fresh;
            None
        }
        Err(message) => Some(message),
    }
}

// ========================
// Pagination
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 0, per_page: 10 }
    }
}

impl Pagination {
    pub fn page_count(&self, total: usize) -> usize {
        if self.per_page == 0 {
            return 1;
        }
        total.div_ceil(self.per_page).max(1)
    }

    /// Pull the page back into range, e.g. after a delete emptied the last page
    pub fn clamp(self, total: usize) -> Self {
        let last = self.page_count(total) - 1;
        Self {
            page: self.page.min(last),
            ..self
        }
    }

    /// One page back from the page actually shown
    pub fn previous(self, total: usize) -> Self {
        let shown = self.clamp(total);
        Self {
            page: shown.page.saturating_sub(1),
            ..shown
        }
    }

    pub fn next(self, total: usize) -> Self {
        let shown = self.clamp(total);
        Self {
            page: shown.page + 1,
            ..shown
        }
        .clamp(total)
    }

    pub fn slice<T: Clone>(&self, records: &[T]) -> Vec<T> {
        let start = self.page * self.per_page;
        records
            .iter()
            .skip(start)
            .take(self.per_page)
            .cloned()
            .collect()
    }

    /// "11-20 of 34" style range, 1-based
    pub fn range_label(&self, total: usize) -> String {
        if total == 0 {
            return "0 of 0".to_string();
        }
        let start = self.page * self.per_page + 1;
        let end = (start + self.per_page - 1).min(total);
        format!("{}-{} of {}", start, end, total)
    }
}

// ========================
// Validation
// ========================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Drafts check themselves before submission
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;
}

/// Message for `field`, if any
pub fn error_for(errors: &[FieldError], field: &str) -> Option<String> {
    errors.iter().find(|e| e.field == field).map(|e| e.message.clone())
}

/// Collects field errors in declaration order
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &'static str, message: String) {
        self.errors.push(FieldError { field, message });
    }

    pub fn text(mut self, field: &'static str, label: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.push(field, format!("{} wajib diisi", label));
        }
        self
    }

    pub fn date(mut self, field: &'static str, label: &str, value: &Option<String>) -> Self {
        if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
            self.push(field, format!("{} wajib diisi", label));
        }
        self
    }

    pub fn non_empty<T>(mut self, field: &'static str, label: &str, values: &[T]) -> Self {
        if values.is_empty() {
            self.push(field, format!("{} wajib diisi", label));
        }
        self
    }

    pub fn range(mut self, field: &'static str, label: &str, value: i64, min: i64, max: i64) -> Self {
        if value < min || value > max {
            self.push(field, format!("{} harus antara {} dan {}", label, min, max));
        }
        self
    }

    pub fn check(mut self, ok: bool, field: &'static str, message: &str) -> Self {
        if !ok {
            self.push(field, message.to_string());
        }
        self
    }

    pub fn finish(self) -> Vec<FieldError> {
        self.errors
    }
}

// ========================
// Local reconciliation
// ========================

pub fn insert_record<T: Record>(records: &mut Vec<T>, created: T) {
    records.push(created);
}

/// Replace the record with the same key; returns false when absent
pub fn replace_record<T: Record>(records: &mut [T], updated: T) -> bool {
    match records.iter_mut().find(|r| r.key() == updated.key()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove_record<T: Record>(records: &mut Vec<T>, key: &str) {
    records.retain(|r| r.key() != key);
}

// ========================
// Summaries
// ========================

/// Count records per known status, in the given order
pub fn status_counts<'a>(
    statuses: &[&'static str],
    values: impl Iterator<Item = &'a str>,
) -> Vec<(&'static str, usize)> {
    let mut counts: Vec<(&'static str, usize)> = statuses.iter().map(|s| (*s, 0)).collect();
    for value in values {
        if let Some(slot) = counts.iter_mut().find(|(s, _)| *s == value) {
            slot.1 += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: String,
        qty: i64,
    }

    impl Record for Row {
        fn id(&self) -> u32 {
            self.id
        }

        fn search_fields(&self) -> Vec<String> {
            vec![self.name.clone(), self.qty.to_string()]
        }

        fn sort_value(&self, key: &str) -> SortValue {
            match key {
                "qty" => SortValue::Number(self.qty as f64),
                _ => SortValue::text(&self.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "relay".into(), qty: 10 },
            Row { id: 2, name: "Kabel".into(), qty: 2 },
            Row { id: 3, name: "Baut".into(), qty: 10 },
        ]
    }

    #[test]
    fn test_filter_matches_any_field_case_insensitive() {
        let found = filter_records(&rows(), "  KAB ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);

        let by_number = filter_records(&rows(), "10");
        assert_eq!(by_number.len(), 2);

        assert_eq!(filter_records(&rows(), "").len(), 3);
        assert!(filter_records(&rows(), "zzz").is_empty());
    }

    #[test]
    fn test_toggle_flips_then_resets() {
        let first = SortState::toggle(None, "name");
        assert_eq!(first.direction, Direction::Ascending);
        let second = SortState::toggle(Some(&first), "name");
        assert_eq!(second.direction, Direction::Descending);
        let other = SortState::toggle(Some(&second), "qty");
        assert_eq!(other, SortState::ascending("qty"));
        assert_eq!(SortState::indicator(Some(&second), "name"), "▼");
        assert_eq!(SortState::indicator(Some(&second), "qty"), "");
    }

    #[test]
    fn test_sort_text_ignores_case_and_numbers_compare_numerically() {
        let mut by_name = rows();
        sort_records(&mut by_name, &SortState::ascending("name"));
        let names: Vec<_> = by_name.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Baut", "Kabel", "relay"]);

        let mut by_qty = rows();
        sort_records(
            &mut by_qty,
            &SortState {
                key: "qty",
                direction: Direction::Descending,
            },
        );
        // Stable: equal quantities keep their original order
        let ids: Vec<_> = by_qty.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn test_pagination_slice_and_clamp() {
        let items: Vec<u32> = (1..=23).collect();
        let p = Pagination { page: 2, per_page: 10 };
        assert_eq!(p.page_count(23), 3);
        assert_eq!(p.slice(&items), vec![21, 22, 23]);
        assert_eq!(p.range_label(23), "21-23 of 23");

        let clamped = p.clamp(15);
        assert_eq!(clamped.page, 1);
        assert_eq!(Pagination::default().clamp(0).page, 0);
        assert_eq!(Pagination::default().page_count(0), 1);
        assert_eq!(Pagination::default().range_label(0), "0 of 0");
    }

    #[test]
    fn test_failed_load_keeps_rows_and_retry_clears_error() {
        let mut items = vec![1, 2];
        let error = apply_load(&mut items, Err("Gagal memuat data".to_string()));
        assert_eq!(error.as_deref(), Some("Gagal memuat data"));
        assert_eq!(items, vec![1, 2]);

        let error = apply_load(&mut items, Ok(vec![3]));
        assert_eq!(error, None);
        assert_eq!(items, vec![3]);

        let error = apply_load(&mut items, Ok(Vec::new()));
        assert_eq!(error, None);
        assert!(items.is_empty());
    }

    #[test]
    fn test_paging_steps_from_the_shown_page() {
        // A reload shrank 50 rows to 12 while page 4 was stored
        let stale = Pagination { page: 4, per_page: 10 };
        assert_eq!(stale.previous(12).page, 0);
        assert_eq!(stale.next(12).page, 1);
        assert_eq!(Pagination::default().previous(30).page, 0);
        assert_eq!(Pagination { page: 2, per_page: 10 }.next(30).page, 2);
    }

    #[test]
    fn test_checks_collect_every_error() {
        let errors = Checks::new()
            .text("name", "Nama", " ")
            .date("dueDate", "Jatuh tempo", &None)
            .range("progress", "Progress", 7, 0, 5)
            .text("status", "Status", "Proses")
            .finish();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "dueDate", "progress"]);
        assert_eq!(error_for(&errors, "name").unwrap(), "Nama wajib diisi");
        assert!(error_for(&errors, "status").is_none());
    }

    #[test]
    fn test_splice_helpers() {
        let mut list = rows();
        insert_record(&mut list, Row { id: 4, name: "Mur".into(), qty: 1 });
        assert_eq!(list.len(), 4);

        assert!(replace_record(&mut list, Row { id: 2, name: "Kabel NYA".into(), qty: 3 }));
        assert_eq!(list[1].name, "Kabel NYA");
        assert!(!replace_record(&mut list, Row { id: 99, name: "x".into(), qty: 0 }));

        remove_record(&mut list, "1");
        assert!(list.iter().all(|r| r.id != 1));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_status_counts_ignores_unknown() {
        let counts = status_counts(&["Aktif", "Cuti"], ["Aktif", "Cuti", "Aktif", "Lain"].into_iter());
        assert_eq!(counts, vec![("Aktif", 2), ("Cuti", 1)]);
    }
}
