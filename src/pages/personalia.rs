//! Personnel Page
//!
//! Each person can be linked to one staff profile straight from the table.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::collection::Collection;
use crate::api;
use crate::components::{
    DateField, DeleteConfirmButton, Dialog, EmptyRow, ErrorState, ExportButtons, Pager, SearchBar,
    SelectField, SortHeader, StatCards, TextField,
};
use crate::crud::status_counts;
use crate::models::{Personnel, Profile, PERSONNEL_STATUSES};
use crate::store::{store_error, store_success, use_app_store};

#[component]
pub fn PersonaliaPage() -> impl IntoView {
    let col = Collection::<Personnel>::new();
    let store = use_app_store();
    col.load();

    let profiles = RwSignal::new(Vec::<Profile>::new());
    spawn_local(async move {
        match api::list::<Profile>().await {
            Ok(list) => profiles.set(list),
            Err(e) => web_sys::console::log_1(&format!("[PERSONALIA] profile options failed: {}", e).into()),
        }
    });

    let assign = move |person_id: u32, profile_id: Option<u32>| {
        spawn_local(async move {
            match api::assign_profile(person_id, profile_id).await {
                Ok(updated) => {
                    col.apply(updated);
                    let message = if profile_id.is_some() { "Profil berhasil ditautkan" } else { "Tautan profil dilepas" };
                    store_success(&store, message);
                }
                Err(e) => store_error(&store, e.message),
            }
        });
    };

    let visible = col.visible();
    let rows = col.page_rows(visible);
    let total = Signal::derive(move || visible.with(Vec::len));
    let cards = Signal::derive(move || {
        col.items.with(|items| {
            let mut cards = vec![("Total Personil".to_string(), items.len())];
            cards.extend(
                status_counts(PERSONNEL_STATUSES, items.iter().map(|p| p.status.as_str()))
                    .into_iter()
                    .map(|(s, n)| (s.to_string(), n)),
            );
            cards
        })
    });

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Personalia"</h2>
                <div class="page-actions">
                    <ExportButtons resource="personalia" />
                    <button type="button" class="btn-primary" on:click=move |_| col.open_create()>
                        "+ Tambah Personil"
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
                            <SortHeader label="NIP" key="nip" sort=col.sort />
                            <SortHeader label="Jabatan" key="jabatan" sort=col.sort />
                            <SortHeader label="Divisi" key="divisi" sort=col.sort />
                            <SortHeader label="Status" key="status" sort=col.sort />
                            <SortHeader label="Bergabung" key="joinDate" sort=col.sort />
                            <th>"Telepon"</th>
                            <th>"Profil"</th>
                            <th>"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let options = profiles.get();
                            rows.get()
                                .into_iter()
                                .map(|person| {
                                    let edit = person.clone();
                                    let doomed = person.clone();
                                    let label = person.nip.clone();
                                    let person_id = person.id;
                                    let linked = person.profile_id;
                                    let choices = options
                                        .iter()
                                        .map(|p| {
                                            let id = p.id;
                                            view! {
                                                <option value=id.to_string() selected={linked == Some(id)}>
                                                    {p.email.clone()}
                                                </option>
                                            }
                                        })
                                        .collect_view();
                                    view! {
                                        <tr>
                                            <td>{person.nip}</td>
                                            <td>{person.jabatan}</td>
                                            <td>{person.divisi}</td>
                                            <td><span class="badge">{person.status}</span></td>
                                            <td>{person.join_date.unwrap_or_default()}</td>
                                            <td>{person.phone_number}</td>
                                            <td>
                                                <select
                                                    class="inline-select"
                                                    on:change=move |ev| assign(person_id, event_target_value(&ev).parse().ok())
                                                >
                                                    <option value="" selected=linked.is_none()>"Tanpa profil"</option>
                                                    {choices}
                                                </select>
                                            </td>
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
                title=col.dialog_title("Personil")
                saving=col.saving
                on_close=move |_: ()| col.close()
                on_submit=move |_: ()| col.submit()
            >
                <TextField
                    label="NIP"
                    value=col.field(|d| d.nip.clone())
                    on_input=move |v: String| col.edit(|d| d.nip = v)
                    error=col.error("nip")
                />
                <TextField
                    label="Jabatan"
                    value=col.field(|d| d.jabatan.clone())
                    on_input=move |v: String| col.edit(|d| d.jabatan = v)
                    error=col.error("jabatan")
                />
                <TextField
                    label="Divisi"
                    value=col.field(|d| d.divisi.clone())
                    on_input=move |v: String| col.edit(|d| d.divisi = v)
                    error=col.error("divisi")
                />
                <SelectField
                    label="Status"
                    options=PERSONNEL_STATUSES
                    value=col.field(|d| d.status.clone())
                    on_change=move |v: String| col.edit(|d| d.status = v)
                    error=col.error("status")
                />
                <DateField
                    label="Tanggal bergabung"
                    value=col.field(|d| d.join_date.clone())
                    on_input={move |v: Option<String>| col.edit(|d| d.join_date = v)}
                    error=col.error("joinDate")
                />
                <TextField
                    label="No. telepon"
                    input_type="tel"
                    value=col.field(|d| d.phone_number.clone())
                    on_input=move |v: String| col.edit(|d| d.phone_number = v)
                    error=col.error("phoneNumber")
                />
                <TextField
                    label="No. darurat"
                    input_type="tel"
                    value=col.field(|d| d.urgent_number.clone())
                    on_input=move |v: String| col.edit(|d| d.urgent_number = v)
                    error=col.error("urgentNumber")
                />
            </Dialog>
        </section>
    }
}
