//! Application Shell
//!
//! Router, session guard and the global store/toast host. Every route
//! except the login form requires a live session cookie.

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::components::ToastHost;
use crate::pages::{
    ChecklistDetailPage, ChecklistListPage, ChecklistPage, LoginPage, ReceptionPage, TransferPage,
    WorkOrderExitPage,
};
use crate::prefs;
use crate::session;
use crate::store::AppState;

/// Renders its children only with a session cookie present, otherwise
/// bounces to the login form.
#[component]
fn RequireSession(children: ChildrenFn) -> impl IntoView {
    move || {
        if session::token().is_some() {
            children().into_any()
        } else {
            view! { <Redirect path="/" /> }.into_any()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(Store::new(AppState::new()));
    prefs::apply_saved_theme();

    view! {
        <Router>
            <ToastHost />
            <Routes fallback=|| view! { <Redirect path="/" /> }>
                <Route path=path!("/") view=LoginPage />
                <Route
                    path=path!("/salidaTrabajo")
                    view=|| view! { <RequireSession><WorkOrderExitPage /></RequireSession> }
                />
                <Route
                    path=path!("/traslado")
                    view=|| view! { <RequireSession><TransferPage /></RequireSession> }
                />
                <Route
                    path=path!("/recepcionvehiculos")
                    view=|| view! { <RequireSession><ReceptionPage /></RequireSession> }
                />
                <Route
                    path=path!("/checklist")
                    view=|| view! { <RequireSession><ChecklistPage /></RequireSession> }
                />
                <Route
                    path=path!("/listarchecklist")
                    view=|| view! { <RequireSession><ChecklistListPage /></RequireSession> }
                />
                <Route
                    path=path!("/detallechecklist/:id")
                    view=|| view! { <RequireSession><ChecklistDetailPage /></RequireSession> }
                />
            </Routes>
        </Router>
    }
}
