#![allow(warnings)]
//! Task Board Frontend Entry Point

mod config;
mod logger;
mod storage;
mod context;
mod store;
mod commands;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    mount_to_body(App);
}
