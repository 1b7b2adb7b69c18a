//! Toast Notifications

use leptos::prelude::*;

use crate::store::{store_dismiss, use_app_store, AppStateStoreFields};

#[component]
pub fn Toasts() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toasts">
            <For
                each=move || store.notifications().get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.class()>
                            <span>{n.message}</span>
                            <button type="button" class="toast-close" on:click=move |_| store_dismiss(&store, id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
