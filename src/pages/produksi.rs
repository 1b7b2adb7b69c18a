//! Production Page
//!
//! A run lists its assigned personnel by NIP, the materials it consumed
//! and dated progress notes. Material and progress rows are added through
//! small inline forms inside the dialog.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::collection::Collection;
use super::format_rupiah;
use crate::api;
use crate::components::{
    DateField, DeleteConfirmButton, Dialog, EmptyRow, ErrorState, ExportButtons, NumberField,
    Pager, SearchBar, SelectField, SortHeader, StatCards, TextField,
};
use crate::crud::status_counts;
use crate::models::{Material, Personnel, ProductionRun, ProgressEntry, PRODUCTION_STATUSES};

#[component]
pub fn ProduksiPage() -> impl IntoView {
    let col = Collection::<ProductionRun>::new();
    col.load();

    let personnel = RwSignal::new(Vec::<Personnel>::new());
    spawn_local(async move {
        match api::list::<Personnel>().await {
            Ok(list) => personnel.set(list),
            Err(e) => web_sys::console::log_1(&format!("[PRODUKSI] personnel options failed: {}", e).into()),
        }
    });

    let toggle_person = move |nip: String| {
        col.edit(|d| {
            if let Some(pos) = d.personnel.iter().position(|p| *p == nip) {
                d.personnel.remove(pos);
            } else {
                d.personnel.push(nip);
            }
        })
    };

    let material = RwSignal::new(Material::default());
    let add_material = move || {
        let new = material.get_untracked();
        if new.name.trim().is_empty() {
            return;
        }
        col.edit(|d| {
            let next_id = d.materials.iter().map(|m| m.id).max().unwrap_or(0) + 1;
            d.materials.push(Material { id: next_id, ..new });
        });
        material.set(Material::default());
    };

    let progress = RwSignal::new(ProgressEntry::default());
    let add_progress = move || {
        let new = progress.get_untracked();
        if new.date.is_none() {
            return;
        }
        col.edit(|d| {
            let next_id = d.progress.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            d.progress.push(ProgressEntry { id: next_id, ..new });
        });
        progress.set(ProgressEntry::default());
    };

    let assigned = col.field(|d| d.personnel.clone());
    let materials = col.field(|d| d.materials.clone());
    let progress_log = col.field(|d| d.progress.clone());

    let visible = col.visible();
    let rows = col.page_rows(visible);
    let total = Signal::derive(move || visible.with(Vec::len));
    let cards = Signal::derive(move || {
        col.items.with(|items| {
            status_counts(PRODUCTION_STATUSES, items.iter().map(|r| r.status.as_str()))
                .into_iter()
                .map(|(s, n)| (s.to_string(), n))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Produksi"</h2>
                <div class="page-actions">
                    <ExportButtons resource="produksi" />
                    <button type="button" class="btn-primary" on:click=move |_| col.open_create()>
                        "+ Tambah Produksi"
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
                            <SortHeader label="Produk" key="name" sort=col.sort />
                            <SortHeader label="Target" key="target" sort=col.sort />
                            <SortHeader label="Selesai" key="completed" sort=col.sort />
                            <SortHeader label="Progress" key="progress" sort=col.sort />
                            <SortHeader label="Status" key="status" sort=col.sort />
                            <SortHeader label="Mulai" key="startDate" sort=col.sort />
                            <SortHeader label="Selesai" key="endDate" sort=col.sort />
                            <th>"Personil"</th>
                            <th>"Biaya Material"</th>
                            <th>"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|run| {
                                    let edit = run.clone();
                                    let doomed = run.clone();
                                    let label = run.name.clone();
                                    let pct = run.percentage();
                                    let cost = format_rupiah(run.material_cost());
                                    view! {
                                        <tr>
                                            <td>{run.name}</td>
                                            <td>{run.target}</td>
                                            <td>{run.completed}</td>
                                            <td>
                                                <div class="progress">
                                                    <div class="progress-bar" style=format!("width: {}%", pct)></div>
                                                </div>
                                                {format!("{}%", pct)}
                                            </td>
                                            <td><span class="badge">{run.status}</span></td>
                                            <td>{run.start_date.unwrap_or_default()}</td>
                                            <td>{run.end_date.unwrap_or_default()}</td>
                                            <td>{run.personnel.join(", ")}</td>
                                            <td>{cost}</td>
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
                            <EmptyRow colspan=10 loading=col.loading />
                        </Show>
                    </tbody>
                </table>
                <Pager pagination=col.pagination total=total />
            </Show>

            <Dialog
                open=col.is_open()
                title=col.dialog_title("Produksi")
                saving=col.saving
                on_close=move |_: ()| col.close()
                on_submit=move |_: ()| col.submit()
            >
                <TextField
                    label="Nama produk"
                    value=col.field(|d| d.name.clone())
                    on_input=move |v: String| col.edit(|d| d.name = v)
                    error=col.error("name")
                />
                <NumberField
                    label="Target"
                    value=col.field(|d| d.target)
                    on_input=move |v: i64| col.edit(|d| d.target = v)
                    error=col.error("target")
                />
                <NumberField
                    label="Selesai"
                    value=col.field(|d| d.completed)
                    on_input=move |v: i64| col.edit(|d| d.completed = v)
                    error=col.error("completed")
                />
                <SelectField
                    label="Status"
                    options=PRODUCTION_STATUSES
                    value=col.field(|d| d.status.clone())
                    on_change=move |v: String| col.edit(|d| d.status = v)
                    error=col.error("status")
                />
                <DateField
                    label="Tanggal mulai"
                    value=col.field(|d| d.start_date.clone())
                    on_input={move |v: Option<String>| col.edit(|d| d.start_date = v)}
                    error=col.error("startDate")
                />
                <DateField
                    label="Tanggal selesai"
                    value=col.field(|d| d.end_date.clone())
                    on_input={move |v: Option<String>| col.edit(|d| d.end_date = v)}
                    error=col.error("endDate")
                />

                <fieldset>
                    <legend>"Personil"</legend>
                    <div class="checkbox-list">
                        {move || {
                            personnel
                                .get()
                                .into_iter()
                                .map(|person| {
                                    let nip = person.nip.clone();
                                    let checked_nip = person.nip.clone();
                                    view! {
                                        <label class="checkbox">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || assigned.with(|a| a.contains(&checked_nip))
                                                on:change=move |_| toggle_person(nip.clone())
                                            />
                                            {format!("{} - {}", person.nip, person.jabatan)}
                                        </label>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </fieldset>

                <fieldset>
                    <legend>"Material"</legend>
                    <ul class="sub-list">
                        {move || {
                            materials
                                .get()
                                .into_iter()
                                .map(|m| {
                                    let id = m.id;
                                    view! {
                                        <li>
                                            {format!("{} - {} {} x {}", m.name, m.qty, m.satuan, format_rupiah(m.harga))}
                                            <button
                                                type="button"
                                                class="btn-link"
                                                on:click=move |_| col.edit(|d| d.materials.retain(|m| m.id != id))
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
                            placeholder="Nama material"
                            prop:value=move || material.with(|m| m.name.clone())
                            on:input=move |ev| material.update(|m| m.name = event_target_value(&ev))
                        />
                        <input
                            type="number"
                            placeholder="Qty"
                            prop:value=move || material.with(|m| m.qty.to_string())
                            on:input=move |ev| material.update(|m| m.qty = event_target_value(&ev).parse().unwrap_or(0))
                        />
                        <input
                            type="text"
                            placeholder="Satuan"
                            prop:value=move || material.with(|m| m.satuan.clone())
                            on:input=move |ev| material.update(|m| m.satuan = event_target_value(&ev))
                        />
                        <input
                            type="number"
                            step="0.01"
                            placeholder="Harga"
                            prop:value=move || material.with(|m| m.harga.to_string())
                            on:input=move |ev| material.update(|m| m.harga = event_target_value(&ev).parse().unwrap_or(0.0))
                        />
                        <button type="button" class="btn-secondary" on:click=move |_| add_material()>
                            "Tambah"
                        </button>
                    </div>
                </fieldset>

                <fieldset>
                    <legend>"Progress Harian"</legend>
                    <ul class="sub-list">
                        {move || {
                            progress_log
                                .get()
                                .into_iter()
                                .map(|p| {
                                    let id = p.id;
                                    view! {
                                        <li>
                                            {format!("{}: {} unit {}", p.date.unwrap_or_default(), p.completed, p.notes)}
                                            <button
                                                type="button"
                                                class="btn-link"
                                                on:click=move |_| col.edit(|d| d.progress.retain(|p| p.id != id))
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
                            type="date"
                            prop:value=move || progress.with(|p| p.date.clone().unwrap_or_default())
                            on:input=move |ev| {
                                let raw = event_target_value(&ev);
                                progress.update(|p| p.date = (!raw.is_empty()).then_some(raw));
                            }
                        />
                        <input
                            type="number"
                            placeholder="Unit"
                            prop:value=move || progress.with(|p| p.completed.to_string())
                            on:input=move |ev| progress.update(|p| p.completed = event_target_value(&ev).parse().unwrap_or(0))
                        />
                        <input
                            type="text"
                            placeholder="Catatan"
                            prop:value=move || progress.with(|p| p.notes.clone())
                            on:input=move |ev| progress.update(|p| p.notes = event_target_value(&ev))
                        />
                        <button type="button" class="btn-secondary" on:click=move |_| add_progress()>
                            "Tambah"
                        </button>
                    </div>
                </fieldset>
            </Dialog>
        </section>
    }
}
