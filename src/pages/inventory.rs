//! Inventory Page

use leptos::prelude::*;

use super::collection::Collection;
use crate::components::{
    DeleteConfirmButton, Dialog, EmptyRow, ErrorState, ExportButtons, NumberField, Pager,
    SearchBar, SelectField, SortHeader, StatCards, TextField,
};
use crate::crud::status_counts;
use crate::models::{InventoryItem, INVENTORY_STATUSES};

#[component]
pub fn InventoryPage() -> impl IntoView {
    let col = Collection::<InventoryItem>::new();
    col.load();

    let visible = col.visible();
    let rows = col.page_rows(visible);
    let total = Signal::derive(move || visible.with(Vec::len));
    let cards = Signal::derive(move || {
        col.items.with(|items| {
            let mut cards = vec![("Total".to_string(), items.len())];
            cards.extend(
                status_counts(&INVENTORY_STATUSES[..3], items.iter().map(|i| i.status.as_str()))
                    .into_iter()
                    .map(|(s, n)| (s.to_string(), n)),
            );
            cards
        })
    });

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Inventaris"</h2>
                <div class="page-actions">
                    <ExportButtons resource="inventory" />
                    <button type="button" class="btn-primary" on:click=move |_| col.open_create()>
                        "+ Tambah Barang"
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
                            <SortHeader label="Kode" key="itemCode" sort=col.sort />
                            <SortHeader label="Nama" key="name" sort=col.sort />
                            <SortHeader label="Jumlah" key="quantity" sort=col.sort />
                            <SortHeader label="Lokasi" key="location" sort=col.sort />
                            <SortHeader label="Status" key="status" sort=col.sort />
                            <th>"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|item| {
                                    let edit = item.clone();
                                    let doomed = item.clone();
                                    let label = item.name.clone();
                                    view! {
                                        <tr>
                                            <td>{item.item_code}</td>
                                            <td>{item.name}</td>
                                            <td>{item.quantity}</td>
                                            <td>{item.location}</td>
                                            <td><span class="badge">{item.status}</span></td>
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
                title=col.dialog_title("Barang")
                saving=col.saving
                on_close=move |_: ()| col.close()
                on_submit=move |_: ()| col.submit()
            >
                <TextField
                    label="Kode barang"
                    value=col.field(|d| d.item_code.clone())
                    on_input=move |v: String| col.edit(|d| d.item_code = v)
                    error=col.error("itemCode")
                />
                <TextField
                    label="Nama"
                    value=col.field(|d| d.name.clone())
                    on_input=move |v: String| col.edit(|d| d.name = v)
                    error=col.error("name")
                />
                <NumberField
                    label="Jumlah"
                    value=col.field(|d| d.quantity)
                    on_input=move |v: i64| col.edit(|d| d.quantity = v)
                    error=col.error("quantity")
                />
                <TextField
                    label="Lokasi"
                    value=col.field(|d| d.location.clone())
                    on_input=move |v: String| col.edit(|d| d.location = v)
                    error=col.error("location")
                />
                <SelectField
                    label="Status"
                    options=INVENTORY_STATUSES
                    value=col.field(|d| d.status.clone())
                    on_change=move |v: String| col.edit(|d| d.status = v)
                    error=col.error("status")
                />
            </Dialog>
        </section>
    }
}
