//! Login Page
//!
//! Credentials go out as query parameters; a successful answer writes the
//! session cookies and lands on the work-order checkout page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::session;
use crate::store::{store_push_toast, store_set_username, use_app_store, ToastSeverity};

const HOME_ROUTE: &str = "/salidaTrabajo";

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);

    // an existing session skips the form entirely
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if session::token().is_some() {
                navigate(HOME_ROUTE, Default::default());
            }
        });
    }

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let user = username.get_untracked().trim().to_string();
        let pass = password.get_untracked();
        if user.is_empty() || pass.is_empty() {
            store_push_toast(
                &store,
                ToastSeverity::Warn,
                "Campos incompletos",
                "Ingrese usuario y clave",
            );
            return;
        }
        set_busy.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&user, &pass).await {
                Ok(response) => match response.data {
                    Some(data) if response.success => {
                        session::set_session(&data.token, &data.username);
                        store_set_username(&store, Some(data.username));
                        navigate(HOME_ROUTE, Default::default());
                    }
                    _ => {
                        let detail = response
                            .message
                            .unwrap_or_else(|| "Usuario o clave incorrectos".to_string());
                        store_push_toast(&store, ToastSeverity::Error, "Inicio de sesión", detail);
                    }
                },
                Err(err) => {
                    store_push_toast(
                        &store,
                        ToastSeverity::Error,
                        "Inicio de sesión",
                        err.user_message("No se pudo iniciar sesión"),
                    );
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <main class="login-page">
            <form class="login-card" on:submit=submit>
                <h1>"Gestión de Vehículos"</h1>
                <label class="field">
                    <span class="field-label">"Usuario"</span>
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Clave"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Ingresando..." } else { "Ingresar" }}
                </button>
            </form>
        </main>
    }
}
