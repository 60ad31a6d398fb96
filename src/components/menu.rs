//! Menu Shell Component
//!
//! Top bar with drawer navigation, username display, dark-mode toggle and
//! logout. Rendered by every authenticated page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::prefs;
use crate::session;
use crate::store::{store_set_username, use_app_store, AppStateStoreFields};

const NAV_ITEMS: &[(&str, &str)] = &[
    ("Recepción de Vehículos", "/recepcionvehiculos"),
    ("Traslado entre Establecimientos", "/traslado"),
    ("Salida por Orden de Trabajo", "/salidaTrabajo"),
    ("Checklist PDI", "/checklist"),
    ("Historial de Checklists", "/listarchecklist"),
];

#[component]
pub fn Menu(#[prop(into)] title: String) -> impl IntoView {
    let store = use_app_store();
    let (drawer_open, set_drawer_open) = signal(false);
    let (dark_mode, set_dark_mode) = signal(prefs::dark_mode());
    let navigate = use_navigate();

    let toggle_theme = move |_| {
        let enabled = !dark_mode.get_untracked();
        set_dark_mode.set(enabled);
        prefs::set_dark_mode(enabled);
    };

    let logout = {
        let navigate = navigate.clone();
        move |_| {
            session::clear();
            store_set_username(&store, None);
            navigate("/", Default::default());
        }
    };

    view! {
        <header class="menu-bar">
            <button class="drawer-toggle" on:click=move |_| set_drawer_open.update(|open| *open = !*open)>
                "☰"
            </button>
            <h1 class="menu-title">{title}</h1>
            <div class="menu-actions">
                <span class="menu-user">
                    {move || store.username().get().unwrap_or_default()}
                </span>
                <button class="theme-toggle" on:click=toggle_theme>
                    {move || if dark_mode.get() { "☀" } else { "☾" }}
                </button>
                <button class="logout-btn" on:click=logout>"Salir"</button>
            </div>
        </header>

        <Show when=move || drawer_open.get()>
            <nav class="drawer">
                {NAV_ITEMS
                    .iter()
                    .map(|(label, route)| {
                        let navigate = use_navigate();
                        view! {
                            <button
                                class="drawer-item"
                                on:click=move |_| {
                                    set_drawer_open.set(false);
                                    navigate(route, Default::default());
                                }
                            >
                                {*label}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </Show>
    }
}
