//! Table Controls
//!
//! Search box, sortable headers, pager and the empty/error states shared
//! by every resource table.

use leptos::prelude::*;

use crate::crud::{Pagination, SortState};

#[component]
pub fn SearchBar(search: RwSignal<String>, pagination: RwSignal<Pagination>) -> impl IntoView {
    view! {
        <input
            type="search"
            class="search-bar"
            placeholder="Cari..."
            prop:value=move || search.get()
            on:input=move |ev| {
                search.set(event_target_value(&ev));
                pagination.update(|p| p.page = 0);
            }
        />
    }
}

/// Column header that toggles sorting on click
#[component]
pub fn SortHeader(
    label: &'static str,
    key: &'static str,
    sort: RwSignal<Option<SortState>>,
) -> impl IntoView {
    view! {
        <th
            class="sortable"
            on:click=move |_| sort.update(|s| *s = Some(SortState::toggle(s.as_ref(), key)))
        >
            {label}
            <span class="sort-indicator">
                {move || sort.with(|s| SortState::indicator(s.as_ref(), key))}
            </span>
        </th>
    }
}

#[component]
pub fn Pager(pagination: RwSignal<Pagination>, #[prop(into)] total: Signal<usize>) -> impl IntoView {
    let current = move || pagination.get().clamp(total.get());
    let pages = move || current().page_count(total.get());

    view! {
        <div class="pager">
            <span>{move || current().range_label(total.get())}</span>
            <button
                type="button"
                disabled={move || current().page == 0}
                on:click=move |_| pagination.set(pagination.get().previous(total.get()))
            >
                "‹"
            </button>
            <span>{move || format!("{} / {}", current().page + 1, pages())}</span>
            <button
                type="button"
                disabled={move || current().page + 1 >= pages()}
                on:click=move |_| pagination.set(pagination.get().next(total.get()))
            >
                "›"
            </button>
        </div>
    }
}

/// Placeholder row for an empty or still-loading table
#[component]
pub fn EmptyRow(colspan: usize, #[prop(into)] loading: Signal<bool>) -> impl IntoView {
    view! {
        <tr class="empty-row">
            <td colspan=colspan.to_string()>
                {move || if loading.get() { "Memuat data..." } else { "Tidak ada data" }}
            </td>
        </tr>
    }
}

/// Shown instead of the table when the initial fetch failed
#[component]
pub fn ErrorState(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="error-state">
            <p>"Gagal memuat data"</p>
            <p class="error-detail">{move || message.get().unwrap_or_default()}</p>
            <button type="button" class="btn-primary" on:click=move |_| on_retry.run(())>
                "Coba lagi"
            </button>
        </div>
    }
}
