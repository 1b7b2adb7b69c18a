//! Engineering Projects Page

use leptos::prelude::*;

use super::collection::Collection;
use crate::components::{
    DateField, DeleteConfirmButton, Dialog, EmptyRow, ErrorState, NumberField, Pager, SearchBar,
    SelectField, SortHeader, StatCards, TextField,
};
use crate::crud::status_counts;
use crate::models::{parse_team, EngineeringProject, ENGINEERING_STATUSES};

#[component]
pub fn RekayasaPage() -> impl IntoView {
    let col = Collection::<EngineeringProject>::new();
    col.load();

    // Raw comma-separated text, parsed into the draft on submit
    let team_input = RwSignal::new(String::new());

    let open_create = move || {
        team_input.set(String::new());
        col.open_create();
    };
    let open_edit = move |project: EngineeringProject| {
        team_input.set(project.team.join(", "));
        col.open_edit(project);
    };
    let submit = move || {
        let team = parse_team(&team_input.get_untracked());
        col.edit(|d| d.team = team);
        col.submit();
    };

    let visible = col.visible();
    let rows = col.page_rows(visible);
    let total = Signal::derive(move || visible.with(Vec::len));
    let cards = Signal::derive(move || {
        col.items.with(|items| {
            status_counts(ENGINEERING_STATUSES, items.iter().map(|p| p.status.as_str()))
                .into_iter()
                .map(|(s, n)| (s.to_string(), n))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Rekayasa"</h2>
                <div class="page-actions">
                    <button type="button" class="btn-primary" on:click=move |_| open_create()>
                        "+ Tambah Proyek"
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
                            <SortHeader label="Proyek" key="name" sort=col.sort />
                            <SortHeader label="Status" key="status" sort=col.sort />
                            <th>"Tim"</th>
                            <SortHeader label="Deadline" key="deadline" sort=col.sort />
                            <SortHeader label="Progress" key="progress" sort=col.sort />
                            <th>"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|project| {
                                    let edit = project.clone();
                                    let doomed = project.clone();
                                    let label = project.name.clone();
                                    let progress = project.progress.clamp(0, 100);
                                    view! {
                                        <tr>
                                            <td>{project.name}</td>
                                            <td><span class="badge">{project.status}</span></td>
                                            <td>{project.team.join(", ")}</td>
                                            <td>{project.deadline.unwrap_or_default()}</td>
                                            <td>
                                                <div class="progress">
                                                    <div class="progress-bar" style=format!("width: {}%", progress)></div>
                                                </div>
                                                {format!("{}%", progress)}
                                            </td>
                                            <td class="actions">
                                                <button type="button" class="btn-link" on:click=move |_| open_edit(edit.clone())>
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
                title=col.dialog_title("Proyek")
                saving=col.saving
                on_close=move |_: ()| col.close()
                on_submit=move |_: ()| submit()
            >
                <TextField
                    label="Nama proyek"
                    value=col.field(|d| d.name.clone())
                    on_input=move |v: String| col.edit(|d| d.name = v)
                    error=col.error("name")
                />
                <SelectField
                    label="Status"
                    options=ENGINEERING_STATUSES
                    value=col.field(|d| d.status.clone())
                    on_change=move |v: String| col.edit(|d| d.status = v)
                    error=col.error("status")
                />
                <TextField
                    label="Tim (pisahkan dengan koma)"
                    value=team_input
                    on_input=move |v: String| team_input.set(v)
                    error=col.error("team")
                />
                <DateField
                    label="Deadline"
                    value=col.field(|d| d.deadline.clone())
                    on_input={move |v: Option<String>| col.edit(|d| d.deadline = v)}
                    error=col.error("deadline")
                />
                <NumberField
                    label="Progress (%)"
                    value=col.field(|d| d.progress)
                    on_input=move |v: i64| col.edit(|d| d.progress = v)
                    error=col.error("progress")
                />
            </Dialog>
        </section>
    }
}
