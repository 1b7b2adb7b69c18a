//! Overhaul Page
//!
//! Overhauls reference a responsible person and an inventory item by id;
//! both option lists load in parallel. History notes are appended in the
//! dialog and stamped by the server.

use futures::future::join;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::collection::Collection;
use super::{format_timestamp, lookup_name};
use crate::api;
use crate::components::{
    DateField, DeleteConfirmButton, Dialog, EmptyRow, ErrorState, ExportButtons, NumberField,
    Pager, RefSelect, SearchBar, SelectField, SortHeader, StatCards, TextField,
};
use crate::crud::status_counts;
use crate::models::{HistoryEntry, InventoryItem, Overhaul, Personnel, OVERHAUL_STATUSES};

#[component]
pub fn OverhaulPage() -> impl IntoView {
    let col = Collection::<Overhaul>::new();
    col.load();

    let personnel_options = RwSignal::new(Vec::<(u32, String)>::new());
    let inventory_options = RwSignal::new(Vec::<(u32, String)>::new());
    spawn_local(async move {
        let (people, items) = join(api::list::<Personnel>(), api::list::<InventoryItem>()).await;
        match people {
            Ok(people) => personnel_options.set(
                people
                    .into_iter()
                    .map(|p| (p.id, format!("{} - {}", p.nip, p.jabatan)))
                    .collect(),
            ),
            Err(e) => web_sys::console::log_1(&format!("[OVERHAUL] personnel options failed: {}", e).into()),
        }
        match items {
            Ok(items) => inventory_options.set(items.into_iter().map(|i| (i.id, i.name)).collect()),
            Err(e) => web_sys::console::log_1(&format!("[OVERHAUL] inventory options failed: {}", e).into()),
        }
    });

    let note = RwSignal::new(String::new());
    let add_note = move || {
        let description = note.get_untracked().trim().to_string();
        if description.is_empty() {
            return;
        }
        col.edit(|d| {
            d.history.push(HistoryEntry {
                description,
                ..Default::default()
            })
        });
        note.set(String::new());
    };
    let history = col.field(|d| d.history.clone());

    let visible = col.visible();
    let rows = col.page_rows(visible);
    let total = Signal::derive(move || visible.with(Vec::len));
    let cards = Signal::derive(move || {
        col.items.with(|items| {
            status_counts(OVERHAUL_STATUSES, items.iter().map(|o| o.status.as_str()))
                .into_iter()
                .map(|(s, n)| (s.to_string(), n))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Overhaul"</h2>
                <div class="page-actions">
                    <ExportButtons resource="overhaul" />
                    <button type="button" class="btn-primary" on:click=move |_| col.open_create()>
                        "+ Tambah Overhaul"
                    </button>
                </div>
            </div>
            <StatCards cards=cards />
            <SearchBar search=col.search pagination=col.pagination />
            <Show
                when=move || col.load_error.with(Option::is_none)
                fallback=move || view! { <ErrorState message=col.load_error on_retry=move |_: ()| col.load() /> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <SortHeader label="Nama" key="name" sort=col.sort />
                            <SortHeader label="Lokasi" key="lokasi" sort=col.sort />
                            <SortHeader label="Status" key="status" sort=col.sort />
                            <SortHeader label="Estimasi" key="estimasi" sort=col.sort />
                            <SortHeader label="Progress" key="progress" sort=col.sort />
                            <th>"PIC"</th>
                            <th>"Barang"</th>
                            <th>"Riwayat"</th>
                            <th>"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let people = personnel_options.get();
                            let items = inventory_options.get();
                            rows.get()
                                .into_iter()
                                .map(|overhaul| {
                                    let edit = overhaul.clone();
                                    let doomed = overhaul.clone();
                                    let label = overhaul.name.clone();
                                    let progress = overhaul.progress.clamp(0, 100);
                                    let last_note = overhaul
                                        .history
                                        .last()
                                        .map(|h| h.description.clone())
                                        .unwrap_or_else(|| "-".to_string());
                                    view! {
                                        <tr>
                                            <td>{overhaul.name}</td>
                                            <td>{overhaul.lokasi}</td>
                                            <td><span class="badge">{overhaul.status}</span></td>
                                            <td>{overhaul.estimasi.unwrap_or_default()}</td>
                                            <td>
                                                <div class="progress">
                                                    <div class="progress-bar" style=format!("width: {}%", progress)></div>
                                                </div>
                                                {format!("{}%", progress)}
                                            </td>
                                            <td>{lookup_name(&people, overhaul.personalia_id)}</td>
                                            <td>{lookup_name(&items, overhaul.inventory_id)}</td>
                                            <td title=format!("{} catatan", overhaul.history.len())>{last_note}</td>
                                            <td class="actions">
                                                <button type="button" class="btn-link" on:click=move |_| col.open_edit(edit.clone())>
                                                    "Ubah"
                                                </button>
                                                <DeleteConfirmButton
                                                    button_class="btn-danger"
                                                    label=label
                                                    on_confirm=move |_: ()| col.remove(doomed.clone())
                                                />
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                        <Show when=move || total.get() == 0>
                            <EmptyRow colspan=9 loading=col.loading />
                        </Show>
                    </tbody>
                </table>
                <Pager pagination=col.pagination total=total />
            </Show>

            <Dialog
                open=col.is_open()
                title=col.dialog_title("Overhaul")
                saving=col.saving
                on_close=move |_: ()| col.close()
                on_submit=move |_: ()| col.submit()
            >
                <TextField
                    label="Nama"
                    value=col.field(|d| d.name.clone())
                    on_input=move |v: String| col.edit(|d| d.name = v)
                    error=col.error("name")
                />
                <TextField
                    label="Lokasi"
                    value=col.field(|d| d.lokasi.clone())
                    on_input=move |v: String| col.edit(|d| d.lokasi = v)
                    error=col.error("lokasi")
                />
                <SelectField
                    label="Status"
                    options=OVERHAUL_STATUSES
                    value=col.field(|d| d.status.clone())
                    on_change=move |v: String| col.edit(|d| d.status = v)
                    error=col.error("status")
                />
                <DateField
                    label="Estimasi selesai"
                    value=col.field(|d| d.estimasi.clone())
                    on_input={move |v: Option<String>| col.edit(|d| d.estimasi = v)}
                    error=col.error("estimasi")
                />
                <NumberField
                    label="Progress (%)"
                    value=col.field(|d| d.progress)
                    on_input=move |v: i64| col.edit(|d| d.progress = v)
                    error=col.error("progress")
                />
                <RefSelect
                    label="Penanggung jawab"
                    options=personnel_options
                    value=col.field(|d| d.personalia_id)
                    on_change={move |v: Option<u32>| col.edit(|d| d.personalia_id = v)}
                />
                <RefSelect
                    label="Barang"
                    options=inventory_options
                    value=col.field(|d| d.inventory_id)
                    on_change={move |v: Option<u32>| col.edit(|d| d.inventory_id = v)}
                />
                <fieldset>
                    <legend>"Riwayat"</legend>
                    <ul class="history">
                        {move || {
                            history
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, entry)| {
                                    view! {
                                        <li>
                                            <span class="history-time">
                                                {entry
                                                    .timestamp
                                                    .as_deref()
                                                    .map(|t| format_timestamp(Some(t)))
                                                    .unwrap_or_else(|| "baru".to_string())}
                                            </span>
                                            <span>{entry.description}</span>
                                            <button
                                                type="button"
                                                class="btn-link"
                                                on:click=move |_| col.edit(|d| {
                                                    if index < d.history.len() {
                                                        d.history.remove(index);
                                                    }
                                                })
                                            >
                                                "×"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                    <div class="inline-form">
                        <input
                            type="text"
                            placeholder="Catatan baru"
                            prop:value=move || note.get()
                            on:input=move |ev| note.set(event_target_value(&ev))
                        />
                        <button type="button" class="btn-secondary" on:click=move |_| add_note()>
                            "Tambah"
                        </button>
                    </div>
                </fieldset>
            </Dialog>
        </section>
    }
}
