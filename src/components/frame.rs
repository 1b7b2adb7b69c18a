//! Navigation Frame
//!
//! Sidebar menu and header wrapped around every authenticated page.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::routes::Page;

#[component]
pub fn Frame(children: Children) -> impl IntoView {
    let ctx = use_app_context();

    let links = Page::MENU
        .into_iter()
        .map(|page| {
            view! {
                <a
                    href=page.href()
                    class="nav-link"
                    class:active=move || ctx.route.get() == page
                >
                    {page.title()}
                </a>
            }
        })
        .collect_view();

    view! {
        <div class="frame">
            <nav class="sidebar">
                <div class="brand">"Depot"</div>
                {links}
            </nav>
            <div class="frame-main">
                <header class="topbar">
                    <h1>{move || ctx.visible_page().title()}</h1>
                    <div class="user">
                        <span>{move || ctx.session.get().unwrap_or_default()}</span>
                        <button type="button" class="btn-secondary" on:click=move |_| ctx.logout()>
                            "Keluar"
                        </button>
                    </div>
                </header>
                <main class="content">{children()}</main>
            </div>
        </div>
    }
}
