//! Stock Page
//!
//! Stock rows may point at an inventory item and the production run that
//! produced them; both option lists load in parallel with the stock list.

use futures::future::join;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::collection::Collection;
use super::{format_timestamp, lookup_name};
use crate::api;
use crate::components::{
    DeleteConfirmButton, Dialog, EmptyRow, ErrorState, NumberField, Pager, RefSelect, SearchBar,
    SelectField, SortHeader, StatCards, TextField,
};
use crate::crud::status_counts;
use crate::models::{InventoryItem, ProductionRun, StockEntry, STOCK_STATUSES};

#[component]
pub fn StockPage() -> impl IntoView {
    let col = Collection::<StockEntry>::new();
    col.load();

    let inventory_options = RwSignal::new(Vec::<(u32, String)>::new());
    let production_options = RwSignal::new(Vec::<(u32, String)>::new());
    spawn_local(async move {
        let (items, runs) = join(api::list::<InventoryItem>(), api::list::<ProductionRun>()).await;
        match items {
            Ok(items) => inventory_options.set(items.into_iter().map(|i| (i.id, i.name)).collect()),
            Err(e) => web_sys::console::log_1(&format!("[STOCK] inventory options failed: {}", e).into()),
        }
        match runs {
            Ok(runs) => production_options.set(runs.into_iter().map(|r| (r.id, r.name)).collect()),
            Err(e) => web_sys::console::log_1(&format!("[STOCK] production options failed: {}", e).into()),
        }
    });

    let visible = col.visible();
    let rows = col.page_rows(visible);
    let total = Signal::derive(move || visible.with(Vec::len));
    let cards = Signal::derive(move || {
        col.items.with(|items| {
            let mut cards = vec![(
                "Total Unit".to_string(),
                items.iter().map(|s| s.quantity.max(0) as usize).sum::<usize>(),
            )];
            cards.extend(
                status_counts(STOCK_STATUSES, items.iter().map(|s| s.status.as_str()))
                    .into_iter()
                    .map(|(s, n)| (s.to_string(), n)),
            );
            cards
        })
    });

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Stok"</h2>
                <div class="page-actions">
                    <button type="button" class="btn-primary" on:click=move |_| col.open_create()>
                        "+ Tambah Stok"
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
                            <SortHeader label="Barang" key="itemName" sort=col.sort />
                            <SortHeader label="Jumlah" key="quantity" sort=col.sort />
                            <SortHeader label="Lokasi" key="location" sort=col.sort />
                            <SortHeader label="Status" key="status" sort=col.sort />
                            <th>"Inventaris"</th>
                            <th>"Produksi"</th>
                            <SortHeader label="Update Terakhir" key="lastUpdate" sort=col.sort />
                            <th>"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let inventory = inventory_options.get();
                            let production = production_options.get();
                            rows.get()
                                .into_iter()
                                .map(|entry| {
                                    let edit = entry.clone();
                                    let doomed = entry.clone();
                                    let label = entry.item_name.clone();
                                    view! {
                                        <tr>
                                            <td>{entry.item_name}</td>
                                            <td>{entry.quantity}</td>
                                            <td>{entry.location}</td>
                                            <td><span class="badge">{entry.status}</span></td>
                                            <td>{lookup_name(&inventory, entry.inventory_id)}</td>
                                            <td>{lookup_name(&production, entry.produksi_id)}</td>
                                            <td>{format_timestamp(entry.last_update.as_deref())}</td>
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
                            <EmptyRow colspan=8 loading=col.loading />
                        </Show>
                    </tbody>
                </table>
                <Pager pagination=col.pagination total=total />
            </Show>

            <Dialog
                open=col.is_open()
                title=col.dialog_title("Stok")
                saving=col.saving
                on_close=move |_: ()| col.close()
                on_submit=move |_: ()| col.submit()
            >
                <TextField
                    label="Nama barang"
                    value=col.field(|d| d.item_name.clone())
                    on_input=move |v: String| col.edit(|d| d.item_name = v)
                    error=col.error("itemName")
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
                    options=STOCK_STATUSES
                    value=col.field(|d| d.status.clone())
                    on_change=move |v: String| col.edit(|d| d.status = v)
                    error=col.error("status")
                />
                <RefSelect
                    label="Barang inventaris"
                    options=inventory_options
                    value=col.field(|d| d.inventory_id)
                    on_change={move |v: Option<u32>| col.edit(|d| d.inventory_id = v)}
                />
                <RefSelect
                    label="Hasil produksi"
                    options=production_options
                    value=col.field(|d| d.produksi_id)
                    on_change={move |v: Option<u32>| col.edit(|d| d.produksi_id = v)}
                />
            </Dialog>
        </section>
    }
}
