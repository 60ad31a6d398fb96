//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the
//! toast queue and the signed-in username; everything else is page-local.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastSeverity {
    Success,
    Info,
    Warn,
    Error,
}

impl ToastSeverity {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastSeverity::Success => "success",
            ToastSeverity::Info => "info",
            ToastSeverity::Warn => "warn",
            ToastSeverity::Error => "error",
        }
    }

    /// How long the toast stays on screen
    fn life_ms(self) -> u32 {
        match self {
            ToastSeverity::Success => 3000,
            ToastSeverity::Info => 2500,
            ToastSeverity::Warn => 3500,
            ToastSeverity::Error => 4000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub severity: ToastSeverity,
    pub summary: String,
    pub detail: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Username from the session cookie, shown in the menu bar
    pub username: Option<String>,
    /// Active toast stack, newest last
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            username: crate::session::username(),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Push a toast and schedule its expiry.
pub fn store_push_toast(
    store: &AppStore,
    severity: ToastSeverity,
    summary: &str,
    detail: impl Into<String>,
) {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id + 1);
    store.toasts().write().push(Toast {
        id,
        severity,
        summary: summary.to_string(),
        detail: detail.into(),
    });

    let store = *store;
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(severity.life_ms()).await;
        store_dismiss_toast(&store, id);
    });
}

pub fn store_dismiss_toast(store: &AppStore, id: u32) {
    store.toasts().write().retain(|toast| toast.id != id);
}

pub fn store_set_username(store: &AppStore, username: Option<String>) {
    store.username().set(username);
}
