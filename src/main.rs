use clean_water_catch::components::App;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
    }
    log::info!("Clean Water Catch starting");
    yew::Renderer::<App>::new().render();
}
