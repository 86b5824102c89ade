//! cellrast: software 3D rasterizer for the terminal
//!
//! Renders a triangle scene into the terminal's character cells with a
//! movable camera. WASD strafes, arrow keys turn, E/C float up and
//! down, Esc or Q quits. Pass a scene file path (RON) to replace the
//! built-in scene.

mod app;
mod rasterizer;
mod scene;
mod terminal;

use std::time::Duration;

use app::App;
use scene::{default_scene, default_scene_file, load_scene, save_scene};
use terminal::{poll_input, InputEvent, TerminalDisplay};

/// Bounded wait per frame; also the frame pacing when idle
const FRAME_POLL: Duration = Duration::from_millis(33);

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // `--init <path>` writes the built-in scene as an editable file
    if args.first().map(String::as_str) == Some("--init") {
        let Some(path) = args.get(1) else {
            eprintln!("Usage: cellrast --init <scene.ron>");
            std::process::exit(1);
        };
        if let Err(e) = save_scene(&default_scene_file(), path) {
            eprintln!("Failed to write scene {}: {}", path, e);
            std::process::exit(1);
        }
        println!("Wrote default scene to {}", path);
        return;
    }

    let scene = match args.first() {
        Some(path) => match load_scene(path) {
            Ok(scene) => scene,
            Err(e) => {
                eprintln!("Failed to load scene {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => default_scene(),
    };

    let mut display = match TerminalDisplay::new() {
        Ok(display) => display,
        Err(e) => {
            eprintln!("Failed to initialize terminal: {}", e);
            std::process::exit(1);
        }
    };

    // Configuration faults are fatal before the loop starts; drop the
    // display first so the message lands on a restored terminal.
    let mut app = match App::new(scene, display.width(), display.height()) {
        Ok(app) => app,
        Err(e) => {
            drop(display);
            eprintln!("Render setup failed: {}", e);
            std::process::exit(1);
        }
    };

    while app.running {
        app.render_frame();
        if let Err(e) = display.blit(&app.fb) {
            drop(display);
            eprintln!("Display error: {}", e);
            std::process::exit(1);
        }

        let event = match poll_input(FRAME_POLL) {
            Ok(event) => event,
            Err(e) => {
                drop(display);
                eprintln!("Input error: {}", e);
                std::process::exit(1);
            }
        };

        if let Some(event) = event {
            if let InputEvent::Resize { width, height } = event {
                display.resize(width, height);
            }
            if let Err(e) = app.apply(event) {
                drop(display);
                eprintln!("Render setup failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
