mod app_core;
mod buffer_zone;
mod button;
mod init_config;
mod local_store;
mod polygon_view;
mod work_zone;
mod yew_app;

use yew_app::{build_app_core, App, AppProps};

fn main() {
    console_error_panic_hook::set_once();
    let core = build_app_core();
    yew::Renderer::<App>::with_props(AppProps { core }).render();
}
