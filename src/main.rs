#![allow(warnings)]
//! Vehicle-Management Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod dates;
mod equipment;
mod models;
mod pages;
mod prefs;
mod session;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
