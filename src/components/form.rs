//! Dialog Form
//!
//! Modal create/edit surface and the labelled inputs placed inside it.
//! Inputs are controlled: they read a signal and report edits through a
//! callback, leaving the draft to the page.

use leptos::prelude::*;

#[component]
pub fn Dialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] saving: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_submit: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
                <form
                    class="dialog"
                    novalidate=true
                    on:click=|ev| ev.stop_propagation()
                    on:submit=move |ev| {
                        ev.prevent_default();
                        on_submit.run(());
                    }
                >
                    <h3>{move || title.get()}</h3>
                    <div class="dialog-body">{children()}</div>
                    <div class="dialog-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>
                            "Batal"
                        </button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Menyimpan..." } else { "Simpan" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[component]
fn FieldMessage(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    move || error.get().map(|message| view! { <span class="field-error">{message}</span> })
}

#[component]
pub fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional)] input_type: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type=input_type.unwrap_or("text")
                class:invalid=move || error.with(Option::is_some)
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <FieldMessage error=error />
        </label>
    }
}

#[component]
pub fn NumberField(
    label: &'static str,
    #[prop(into)] value: Signal<i64>,
    #[prop(into)] on_input: Callback<i64>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type="number"
                class:invalid=move || error.with(Option::is_some)
                prop:value=move || value.get().to_string()
                on:input=move |ev| on_input.run(event_target_value(&ev).trim().parse().unwrap_or(0))
            />
            <FieldMessage error=error />
        </label>
    }
}

/// `YYYY-MM-DD` input; clearing it yields `None`
#[component]
pub fn DateField(
    label: &'static str,
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(into)] on_input: Callback<Option<String>>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type="date"
                class:invalid=move || error.with(Option::is_some)
                prop:value=move || value.get().unwrap_or_default()
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    on_input.run((!raw.is_empty()).then_some(raw));
                }
            />
            <FieldMessage error=error />
        </label>
    }
}

/// Select over a fixed list of values
#[component]
pub fn SelectField(
    label: &'static str,
    options: &'static [&'static str],
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select
                class:invalid=move || error.with(Option::is_some)
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="" selected=move || value.with(String::is_empty)>"Pilih..."</option>
                {options
                    .iter()
                    .map(|option| {
                        let option = *option;
                        view! {
                            <option value=option selected=move || value.with(|v| v == option)>
                                {option}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <FieldMessage error=error />
        </label>
    }
}

/// Select over records from another resource, stored as an optional id
#[component]
pub fn RefSelect(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<(u32, String)>>,
    #[prop(into)] value: Signal<Option<u32>>,
    #[prop(into)] on_change: Callback<Option<u32>>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select on:change=move |ev| on_change.run(event_target_value(&ev).parse().ok())>
                <option value="" selected=move || value.get().is_none()>"-"</option>
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|(id, name)| {
                            view! {
                                <option value=id.to_string() selected=move || value.get() == Some(id)>
                                    {name}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </label>
    }
}
