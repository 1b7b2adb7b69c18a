#![allow(warnings)]
//! Depot Frontend Entry Point

mod api;
mod app;
mod auth;
mod components;
mod context;
mod crud;
mod models;
mod pages;
mod routes;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
