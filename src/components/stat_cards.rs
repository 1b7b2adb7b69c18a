//! Summary cards above a table

use leptos::prelude::*;

#[component]
pub fn StatCards(#[prop(into)] cards: Signal<Vec<(String, usize)>>) -> impl IntoView {
    view! {
        <div class="stat-cards">
            {move || {
                cards
                    .get()
                    .into_iter()
                    .map(|(label, count)| {
                        view! {
                            <div class="stat-card">
                                <span class="stat-label">{label}</span>
                                <span class="stat-value">{count}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
