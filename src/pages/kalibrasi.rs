//! Calibration Page
//!
//! Progress counts completed calibration steps out of `CALIBRATION_STEPS`.

use leptos::prelude::*;

use super::collection::Collection;
use super::format_timestamp;
use crate::components::{
    DateField, DeleteConfirmButton, Dialog, EmptyRow, ErrorState, ExportButtons, NumberField,
    Pager, SearchBar, SelectField, SortHeader, StatCards, TextField,
};
use crate::crud::status_counts;
use crate::models::{Calibration, CALIBRATION_STATUSES, CALIBRATION_STEPS};

#[component]
pub fn KalibrasiPage() -> impl IntoView {
    let col = Collection::<Calibration>::new();
    col.load();

    let visible = col.visible();
    let rows = col.page_rows(visible);
    let total = Signal::derive(move || visible.with(Vec::len));
    let cards = Signal::derive(move || {
        col.items.with(|items| {
            status_counts(CALIBRATION_STATUSES, items.iter().map(|c| c.status.as_str()))
                .into_iter()
                .map(|(s, n)| (s.to_string(), n))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Kalibrasi"</h2>
                <div class="page-actions">
                    <ExportButtons resource="kalibrasi" />
                    <button type="button" class="btn-primary" on:click=move |_| col.open_create()>
                        "+ Tambah Kalibrasi"
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
                            <SortHeader label="Alat" key="name" sort=col.sort />
                            <SortHeader label="Status" key="status" sort=col.sort />
                            <SortHeader label="Progress" key="progress" sort=col.sort />
                            <SortHeader label="Jatuh Tempo" key="dueDate" sort=col.sort />
                            <SortHeader label="Update Terakhir" key="lastUpdate" sort=col.sort />
                            <th>"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|cal| {
                                    let edit = cal.clone();
                                    let doomed = cal.clone();
                                    let label = cal.name.clone();
                                    let pct = cal.progress.clamp(0, CALIBRATION_STEPS) * 100 / CALIBRATION_STEPS;
                                    view! {
                                        <tr>
                                            <td>{cal.name}</td>
                                            <td><span class="badge">{cal.status}</span></td>
                                            <td>
                                                <div class="progress">
                                                    <div class="progress-bar" style=format!("width: {}%", pct)></div>
                                                </div>
                                                {format!("{}/{}", cal.progress, CALIBRATION_STEPS)}
                                            </td>
                                            <td>{cal.due_date.unwrap_or_default()}</td>
                                            <td>{format_timestamp(cal.last_update.as_deref())}</td>
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
                            <EmptyRow colspan=6 loading=col.loading />
                        </Show>
                    </tbody>
                </table>
                <Pager pagination=col.pagination total=total />
            </Show>

            <Dialog
                open=col.is_open()
                title=col.dialog_title("Kalibrasi")
                saving=col.saving
                on_close=move |_: ()| col.close()
                on_submit=move |_: ()| col.submit()
            >
                <TextField
                    label="Nama alat"
                    value=col.field(|d| d.name.clone())
                    on_input=move |v: String| col.edit(|d| d.name = v)
                    error=col.error("name")
                />
                <SelectField
                    label="Status"
                    options=CALIBRATION_STATUSES
                    value=col.field(|d| d.status.clone())
                    on_change=move |v: String| col.edit(|d| d.status = v)
                    error=col.error("status")
                />
                <NumberField
                    label="Tahap selesai (0-5)"
                    value=col.field(|d| d.progress)
                    on_input=move |v: i64| col.edit(|d| d.progress = v)
                    error=col.error("progress")
                />
                <DateField
                    label="Jatuh tempo"
                    value=col.field(|d| d.due_date.clone())
                    on_input={move |v: Option<String>| col.edit(|d| d.due_date = v)}
                    error=col.error("dueDate")
                />
            </Dialog>
        </section>
    }
}
