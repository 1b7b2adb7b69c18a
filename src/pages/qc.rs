//! Quality Control Page
//!
//! Lists stored QC results together with rows the backend derives from
//! production runs and overhauls. Derived rows are read-only here; they
//! change when their source record changes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::collection::Collection;
use crate::api;
use crate::components::{
    DateField, DeleteConfirmButton, Dialog, EmptyRow, ErrorState, NumberField, Pager, SearchBar,
    SelectField, SortHeader, StatCards, TextField,
};
use crate::crud::status_counts;
use crate::models::{pass_rate, QualityCheck, DEPARTMENTS, QC_STATUSES};
use crate::store::{store_error, use_app_store};

fn source_label(source: &str) -> &'static str {
    match source {
        "produksi" => "Produksi",
        "overhaul" => "Overhaul",
        _ => "QC",
    }
}

#[component]
pub fn QcPage() -> impl IntoView {
    let col = Collection::<QualityCheck>::new();
    let store = use_app_store();
    col.load();

    let code = RwSignal::new(String::new());
    let lookup = move || {
        let wanted = code.get_untracked().trim().to_string();
        if wanted.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::qc_by_code(&wanted).await {
                Ok(found) => col.open_edit(found),
                Err(e) => store_error(&store, format!("{}: {}", wanted, e)),
            }
        });
    };

    let visible = col.visible();
    let rows = col.page_rows(visible);
    let total = Signal::derive(move || visible.with(Vec::len));
    let cards = Signal::derive(move || {
        col.items.with(|items| {
            let mut cards = vec![("Total".to_string(), items.len())];
            cards.extend(
                status_counts(QC_STATUSES, items.iter().map(|q| q.status.as_str()))
                    .into_iter()
                    .map(|(s, n)| (s.to_string(), n)),
            );
            let tested: i64 = items.iter().map(|q| q.tested).sum();
            let passed: i64 = items.iter().map(|q| q.passed).sum();
            cards.push(("Rata-rata Lulus (%)".to_string(), pass_rate(passed, tested).max(0) as usize));
            cards
        })
    });
    let draft_rate = col.field(|d| pass_rate(d.passed, d.tested));

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Quality Control"</h2>
                <div class="page-actions">
                    <div class="inline-form">
                        <input
                            type="text"
                            placeholder="Kode, mis. KAL-3"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(event_target_value(&ev))
                        />
                        <button type="button" class="btn-secondary" on:click=move |_| lookup()>
                            "Cari Kode"
                        </button>
                    </div>
                    <button type="button" class="btn-primary" on:click=move |_| col.open_create()>
                        "+ Tambah QC"
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
                            <SortHeader label="Kode" key="id" sort=col.sort />
                            <SortHeader label="Produk" key="product" sort=col.sort />
                            <SortHeader label="Batch" key="batch" sort=col.sort />
                            <SortHeader label="Departemen" key="department" sort=col.sort />
                            <SortHeader label="Diuji" key="tested" sort=col.sort />
                            <SortHeader label="Lulus" key="passed" sort=col.sort />
                            <SortHeader label="Rate" key="passRate" sort=col.sort />
                            <SortHeader label="Status" key="status" sort=col.sort />
                            <SortHeader label="Tanggal" key="date" sort=col.sort />
                            <th>"Sumber"</th>
                            <th>"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|qc| {
                                    let derived = qc.is_derived();
                                    let edit = qc.clone();
                                    let doomed = qc.clone();
                                    let label = qc.id.clone();
                                    view! {
                                        <tr class:derived=derived>
                                            <td>{qc.id}</td>
                                            <td>{qc.product}</td>
                                            <td>{qc.batch}</td>
                                            <td>{qc.department.unwrap_or_default()}</td>
                                            <td>{qc.tested}</td>
                                            <td>{qc.passed}</td>
                                            <td>{format!("{}%", qc.pass_rate)}</td>
                                            <td><span class="badge">{qc.status}</span></td>
                                            <td>{qc.date.unwrap_or_default()}</td>
                                            <td>{source_label(&qc.source)}</td>
                                            <td class="actions">
                                                {if derived {
                                                    view! { <span class="muted">"Otomatis"</span> }.into_any()
                                                } else {
                                                    view! {
                                                        <button type="button" class="btn-link" on:click=move |_| col.open_edit(edit.clone())>
                                                            "Ubah"
                                                        </button>
                                                        <DeleteConfirmButton
                                                            button_class="btn-danger"
                                                            label=label
                                                            on_confirm=move |_: ()| col.remove(doomed.clone())
                                                        />
                                                    }
                                                        .into_any()
                                                }}
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                        <Show when=move || total.get() == 0>
                            <EmptyRow colspan=11 loading=col.loading />
                        </Show>
                    </tbody>
                </table>
                <Pager pagination=col.pagination total=total />
            </Show>

            <Dialog
                open=col.is_open()
                title=col.dialog_title("QC")
                saving=col.saving
                on_close=move |_: ()| col.close()
                on_submit=move |_: ()| col.submit()
            >
                <TextField
                    label="Produk"
                    value=col.field(|d| d.product.clone())
                    on_input=move |v: String| col.edit(|d| d.product = v)
                    error=col.error("product")
                />
                <TextField
                    label="Batch"
                    value=col.field(|d| d.batch.clone())
                    on_input=move |v: String| col.edit(|d| d.batch = v)
                    error=col.error("batch")
                />
                <SelectField
                    label="Departemen"
                    options=DEPARTMENTS
                    value=col.field(|d| d.department.clone().unwrap_or_default())
                    on_change=move |v: String| col.edit(|d| d.department = (!v.is_empty()).then_some(v))
                    error=col.error("department")
                />
                <SelectField
                    label="Status"
                    options=QC_STATUSES
                    value=col.field(|d| d.status.clone())
                    on_change=move |v: String| col.edit(|d| d.status = v)
                    error=col.error("status")
                />
                <NumberField
                    label="Jumlah diuji"
                    value=col.field(|d| d.tested)
                    on_input=move |v: i64| col.edit(|d| d.tested = v)
                    error=col.error("tested")
                />
                <NumberField
                    label="Jumlah lulus"
                    value=col.field(|d| d.passed)
                    on_input=move |v: i64| col.edit(|d| d.passed = v)
                    error=col.error("passed")
                />
                <p class="hint">{move || format!("Pass rate: {}%", draft_rate.get())}</p>
                <DateField
                    label="Tanggal uji"
                    value=col.field(|d| d.date.clone())
                    on_input={move |v: Option<String>| col.edit(|d| d.date = v)}
                    error=col.error("date")
                />
            </Dialog>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_label() {
        assert_eq!(source_label("produksi"), "Produksi");
        assert_eq!(source_label("overhaul"), "Overhaul");
        assert_eq!(source_label("qc"), "QC");
        assert_eq!(source_label(""), "QC");
    }
}
