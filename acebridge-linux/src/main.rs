mod engine;
mod status_bar;
mod window;

use libadwaita as adw;
use libadwaita::prelude::*;

const APP_ID: &str = "dev.acebridge.AceBridge";

fn main() {
    env_logger::init();

    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_startup(|_app| {
        let style_manager = adw::StyleManager::default();
        style_manager.set_color_scheme(adw::ColorScheme::ForceDark);
    });

    app.connect_activate(move |app| {
        window::build_window(app);
    });

    app.run();
}
