//! Dashboard Page
//!
//! Record counts for every resource, fetched together.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::context::use_app_context;
use crate::models::{
    Calibration, EngineeringProject, InventoryItem, Overhaul, Personnel, ProductionRun, Profile,
    QualityCheck, StockEntry,
};
use crate::routes::Page;

fn count<T>(result: Result<Vec<T>, ApiError>) -> Option<usize> {
    match result {
        Ok(list) => Some(list.len()),
        Err(e) => {
            web_sys::console::log_1(&format!("[DASHBOARD] count failed: {}", e).into());
            None
        }
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let counts = RwSignal::new(Vec::<(Page, Option<usize>)>::new());
    let loading = RwSignal::new(true);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        loading.set(true);
        spawn_local(async move {
            let (inventory, produksi, overhaul, kalibrasi, personalia, qc, stock, rekayasa, profile) = futures::join!(
                api::list::<InventoryItem>(),
                api::list::<ProductionRun>(),
                api::list::<Overhaul>(),
                api::list::<Calibration>(),
                api::list::<Personnel>(),
                api::list::<QualityCheck>(),
                api::list::<StockEntry>(),
                api::list::<EngineeringProject>(),
                api::list::<Profile>(),
            );
            counts.set(vec![
                (Page::Inventory, count(inventory)),
                (Page::Produksi, count(produksi)),
                (Page::Overhaul, count(overhaul)),
                (Page::Kalibrasi, count(kalibrasi)),
                (Page::Personalia, count(personalia)),
                (Page::Qc, count(qc)),
                (Page::Stock, count(stock)),
                (Page::Rekayasa, count(rekayasa)),
                (Page::Profile, count(profile)),
            ]);
            loading.set(false);
        });
    });

    view! {
        <section class="page">
            <div class="page-header">
                <h2>"Ringkasan"</h2>
            </div>
            <Show when=move || loading.get()>
                <p class="muted">"Memuat data..."</p>
            </Show>
            <div class="stat-cards dashboard-cards">
                {move || {
                    counts
                        .get()
                        .into_iter()
                        .map(|(page, n)| {
                            view! {
                                <a class="stat-card" href=page.href()>
                                    <span class="stat-label">{page.title()}</span>
                                    <span class="stat-value">
                                        {n.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())}
                                    </span>
                                </a>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}
