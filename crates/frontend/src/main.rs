#[macro_use]
extern crate tracing;

mod app;
mod auth;
mod auth_guard;
mod components;
mod config;
mod hooks;
mod pages;
mod storage;

use app::App;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
