//! Login Page

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<&'static str>>(None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match ctx.login(&email.get_untracked(), &password.get_untracked()) {
            Ok(()) => set_error.set(None),
            Err(e) => set_error.set(Some(e.message())),
        }
    };

    view! {
        <div class="login-screen">
            <form class="login-card" on:submit=on_submit>
                <h1>"Depot"</h1>
                <p class="muted">"Masuk untuk melanjutkan"</p>
                <label class="field">
                    <span class="field-label">"Email"</span>
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Password"</span>
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                {move || error.get().map(|message| view! { <p class="field-error">{message}</p> })}
                <button type="submit" class="btn-primary">"Masuk"</button>
            </form>
        </div>
    }
}
