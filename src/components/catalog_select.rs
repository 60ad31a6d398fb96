//! Labeled Catalog Select
//!
//! Native select fed from a reactive catalog-option list; the selected
//! value is the option's id, empty string when nothing is chosen.

use leptos::prelude::*;

use crate::models::CatalogOption;

#[component]
pub fn CatalogSelect(
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<CatalogOption>>,
    value: RwSignal<String>,
    /// Text of the empty option; omit to have no empty option
    #[prop(into, optional)]
    placeholder: String,
) -> impl IntoView {
    let placeholder_option = (!placeholder.is_empty()).then(|| {
        view! { <option value="">{placeholder.clone()}</option> }
    });

    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {placeholder_option}
                <For
                    each=move || options.get()
                    key=|option| option.value.clone()
                    children=move |option| {
                        view! { <option value=option.value.clone()>{option.label.clone()}</option> }
                    }
                />
            </select>
        </label>
    }
}
