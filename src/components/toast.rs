//! Toast Host Component
//!
//! Renders the global toast stack; entries expire on their own and can be
//! dismissed early with a click.

use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-stack">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast toast-{}", toast.severity.css_class())
                            on:click=move |_| store_dismiss_toast(&store, id)
                        >
                            <span class="toast-summary">{toast.summary.clone()}</span>
                            <span class="toast-detail">{toast.detail.clone()}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
