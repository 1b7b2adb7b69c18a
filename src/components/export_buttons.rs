//! Export Buttons
//!
//! Excel/PDF download triggers for resources the backend can export.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ExportFormat};
use crate::store::{store_error, store_success, use_app_store};

#[component]
pub fn ExportButtons(resource: &'static str) -> impl IntoView {
    let store = use_app_store();
    let (busy, set_busy) = signal(false);

    let export = move |format: ExportFormat| {
        set_busy.set(true);
        spawn_local(async move {
            match api::download(resource, format).await {
                Ok(()) => store_success(&store, format!("Export {} berhasil", format.label())),
                Err(e) => store_error(&store, format!("Export gagal: {}", e)),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="export-buttons">
            {[ExportFormat::Excel, ExportFormat::Pdf]
                .into_iter()
                .map(|format| {
                    view! {
                        <button
                            type="button"
                            class="btn-secondary"
                            disabled=move || busy.get()
                            on:click=move |_| export(format)
                        >
                            {format!("Export {}", format.label())}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
