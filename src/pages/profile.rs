//! Staff Profile Page
//!
//! Contact details with optional education and experience sections.

use leptos::prelude::*;

use super::collection::Collection;
use crate::components::{
    DeleteConfirmButton, Dialog, EmptyRow, ErrorState, Pager, SearchBar, SortHeader, StatCards,
    TextField,
};
use crate::models::Profile;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let col = Collection::<Profile>::new();
    col.load();

    let submit = move || {
        col.edit(Profile::drop_empty_sections);
        col.submit();
    };
    let no_error = Signal::derive(|| None::<String>);

    let visible = col.visible();
    let rows = col.page_rows(visible);
    let total = Signal::derive(move || visible.with(Vec::len));
    let cards = Signal::derive(move || {
        col.items.with(|items| {
            vec![
                ("Total Profil".to_string(), items.len()),
                (
                    "Dengan Pendidikan".to_string(),
                    items.iter().filter(|p| p.education.is_some()).count(),
                ),
                (
                    "Dengan Pengalaman".to_string(),
                    items.iter().filter(|p| p.experience.is_some()).count(),
                ),
            ]
        })
    });

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Profil"</h2>
                <div class="page-actions">
                    <button type="button" class="btn-primary" on:click=move |_| col.open_create()>
                        "+ Tambah Profil"
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
                            <SortHeader label="Email" key="email" sort=col.sort />
                            <SortHeader label="Alamat" key="address" sort=col.sort />
                            <SortHeader label="Telepon" key="phoneNumber" sort=col.sort />
                            <th>"Pendidikan"</th>
                            <th>"Pengalaman"</th>
                            <th>"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|profile| {
                                    let edit = profile.clone();
                                    let doomed = profile.clone();
                                    let label = profile.email.clone();
                                    let education = profile
                                        .education
                                        .map(|e| format!("{} {} ({})", e.degree, e.university, e.year))
                                        .unwrap_or_else(|| "-".to_string());
                                    let experience = profile
                                        .experience
                                        .map(|e| format!("{}, {}", e.position, e.period))
                                        .unwrap_or_else(|| "-".to_string());
                                    view! {
                                        <tr>
                                            <td>{profile.email}</td>
                                            <td>{profile.address}</td>
                                            <td>{profile.phone_number}</td>
                                            <td>{education}</td>
                                            <td>{experience}</td>
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
                title=col.dialog_title("Profil")
                saving=col.saving
                on_close=move |_: ()| col.close()
                on_submit=move |_: ()| submit()
            >
                <TextField
                    label="Email"
                    input_type="email"
                    value=col.field(|d| d.email.clone())
                    on_input=move |v: String| col.edit(|d| d.email = v)
                    error=col.error("email")
                />
                <TextField
                    label="Alamat"
                    value=col.field(|d| d.address.clone())
                    on_input=move |v: String| col.edit(|d| d.address = v)
                    error=col.error("address")
                />
                <TextField
                    label="No. telepon"
                    value=col.field(|d| d.phone_number.clone())
                    on_input=move |v: String| col.edit(|d| d.phone_number = v)
                    error=col.error("phoneNumber")
                />
                <fieldset>
                    <legend>"Pendidikan"</legend>
                    <TextField
                        label="Gelar"
                        value=col.field(|d| d.education.as_ref().map(|e| e.degree.clone()).unwrap_or_default())
                        on_input=move |v: String| col.edit(|d| d.education.get_or_insert_with(Default::default).degree = v)
                        error=no_error
                    />
                    <TextField
                        label="Universitas"
                        value=col.field(|d| d.education.as_ref().map(|e| e.university.clone()).unwrap_or_default())
                        on_input=move |v: String| col.edit(|d| d.education.get_or_insert_with(Default::default).university = v)
                        error=no_error
                    />
                    <TextField
                        label="Tahun lulus"
                        value=col.field(|d| d.education.as_ref().map(|e| e.year.clone()).unwrap_or_default())
                        on_input=move |v: String| col.edit(|d| d.education.get_or_insert_with(Default::default).year = v)
                        error=no_error
                    />
                </fieldset>
                <fieldset>
                    <legend>"Pengalaman"</legend>
                    <TextField
                        label="Jabatan"
                        value=col.field(|d| d.experience.as_ref().map(|e| e.position.clone()).unwrap_or_default())
                        on_input=move |v: String| col.edit(|d| d.experience.get_or_insert_with(Default::default).position = v)
                        error=no_error
                    />
                    <TextField
                        label="Periode"
                        value=col.field(|d| d.experience.as_ref().map(|e| e.period.clone()).unwrap_or_default())
                        on_input=move |v: String| col.edit(|d| d.experience.get_or_insert_with(Default::default).period = v)
                        error=no_error
                    />
                </fieldset>
            </Dialog>
        </section>
    }
}
