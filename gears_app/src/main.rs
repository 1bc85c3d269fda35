//! GLFW gears demo binary
//!
//! Opens a 300x300 window with the classic rotating-gears scene. Escape
//! closes it, F/W switch between fullscreen and windowed, G toggles cursor
//! capture. Frame throughput is printed to stdout every five seconds.

use gears_engine::GearsDemo;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("starting gears demo");

    let result = GearsDemo::new().and_then(|mut demo| demo.run());
    if let Err(err) = result {
        log::error!("gears demo failed: {err}");
        std::process::exit(1);
    }

    log::info!("gears demo finished");
}
