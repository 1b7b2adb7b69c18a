//! Delete Confirm Button
//!
//! Row-level delete with a second click to confirm. Nothing is sent to the
//! backend until the record is confirmed.

use leptos::prelude::*;

/// Two-step delete control for a table row
///
/// # Arguments
/// * `button_class` - CSS class for the first "Hapus" button
/// * `label` - record name echoed in the prompt, e.g. "Relay 24V"
/// * `on_confirm` - runs once the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, optional)] label: Option<String>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let prompt = match label {
        Some(name) if !name.trim().is_empty() => format!("Hapus {}?", name.trim()),
        _ => "Hapus data ini?".to_string(),
    };

    view! {
        <span class="delete-control" on:click=|ev| ev.stop_propagation()>
            {move || {
                if armed.get() {
                    let prompt = prompt.clone();
                    view! {
                        <span class="delete-confirm" role="alertdialog">
                            <span class="delete-confirm-text">{prompt}</span>
                            <button
                                type="button"
                                class="confirm-btn"
                                title="Ya, hapus"
                                on:click=move |_| {
                                    armed.set(false);
                                    on_confirm.run(());
                                }
                            >
                                "Ya"
                            </button>
                            <button
                                type="button"
                                class="cancel-btn"
                                title="Batal"
                                on:click=move |_| armed.set(false)
                            >
                                "Tidak"
                            </button>
                        </span>
                    }
                        .into_any()
                } else {
                    view! {
                        <button type="button" class=button_class.clone() on:click=move |_| armed.set(true)>
                            "Hapus"
                        </button>
                    }
                        .into_any()
                }
            }}
        </span>
    }
}
