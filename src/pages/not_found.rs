use leptos::prelude::*;

use crate::routes::Page;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="page not-found">
            <h2>"Halaman tidak ditemukan"</h2>
            <a href=Page::Dashboard.href()>"Kembali ke dashboard"</a>
        </section>
    }
}
