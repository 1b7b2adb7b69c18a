//! Depot Frontend App
//!
//! Root component: provides the store and context, then renders the page
//! the current hash route resolves to behind the login guard.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{Frame, Toasts};
use crate::context::AppContext;
use crate::pages::{
    DashboardPage, InventoryPage, KalibrasiPage, LoginPage, NotFoundPage, OverhaulPage,
    PersonaliaPage, ProduksiPage, ProfilePage, QcPage, RekayasaPage, StockPage,
};
use crate::routes::{self, Page};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    // State
    let session = signal::<Option<String>>(None);
    let reload_trigger = signal(0u32);
    let route = routes::use_hash_route();

    // Provide context to all children
    provide_context(Store::new(AppState::new()));
    let ctx = AppContext::new(session, route, reload_trigger);
    provide_context(ctx);

    // Keep the address bar in step with guard redirects
    Effect::new(move |_| {
        let requested = route.get();
        let shown = ctx.visible_page();
        if shown != requested && requested != Page::NotFound {
            web_sys::console::log_1(&format!("[APP] {:?} redirected to {:?}", requested, shown).into());
            routes::navigate(shown);
        }
    });

    let page = Memo::new(move |_| ctx.visible_page());

    view! {
        <Toasts />
        <Show when=move || page.get() != Page::Login fallback=|| view! { <LoginPage /> }>
            <Frame>{move || render_page(page.get())}</Frame>
        </Show>
    }
}

fn render_page(page: Page) -> AnyView {
    match page {
        Page::Dashboard => view! { <DashboardPage /> }.into_any(),
        Page::Profile => view! { <ProfilePage /> }.into_any(),
        Page::Stock => view! { <StockPage /> }.into_any(),
        Page::Produksi => view! { <ProduksiPage /> }.into_any(),
        Page::Overhaul => view! { <OverhaulPage /> }.into_any(),
        Page::Rekayasa => view! { <RekayasaPage /> }.into_any(),
        Page::Kalibrasi => view! { <KalibrasiPage /> }.into_any(),
        Page::Inventory => view! { <InventoryPage /> }.into_any(),
        Page::Qc => view! { <QcPage /> }.into_any(),
        Page::Personalia => view! { <PersonaliaPage /> }.into_any(),
        Page::Login => view! { <LoginPage /> }.into_any(),
        Page::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}
