//! Headless orbit-and-pick walkthrough on the two-cube demo scene.
//!
//! Run with `RUST_LOG=debug cargo run --example orbit_pick` to see the
//! picking trace. Pass a TOML file path to override the viewer options.

use std::path::Path;

use anyhow::{Context, Result};
use seisview::{gfx::camera::ViewPreset, ViewerOptions, Viewport};

fn main() -> Result<()> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => ViewerOptions::load(Path::new(&path))
            .with_context(|| format!("loading options from {path}"))?,
        None => ViewerOptions::default(),
    };

    let mut viewport = Viewport::new(options, 1280, 720)?;
    let (large, small) = viewport.populate_demo_scene()?;
    log::info!("Large cube {large}, small cube {small}");

    let center = (640.0, 360.0);
    for preset in [
        ViewPreset::Top,
        ViewPreset::Side(0),
        ViewPreset::Side(2),
        ViewPreset::Bottom,
    ] {
        viewport.camera.apply_preset(preset);
        let eye = viewport.view_params()?.eye;
        match viewport.click(center)? {
            Some(hit) => println!(
                "{preset:?}: eye ({:.1}, {:.1}, {:.1}) picks {} at t={:.2}",
                eye.x, eye.y, eye.z, hit.object, hit.distance
            ),
            None => println!("{preset:?}: nothing under the cursor"),
        }
    }

    // Drag a quarter turn to the left, then zoom out three notches.
    viewport.camera.apply_preset(ViewPreset::Side(0));
    viewport.controller.pointer_down(center);
    let quarter_turn = viewport.camera.sensitivity_x * std::f32::consts::FRAC_PI_2;
    viewport
        .controller
        .pointer_move((center.0 + quarter_turn, center.1), &mut viewport.camera);
    viewport.controller.pointer_up((center.0 + quarter_turn, center.1));
    viewport.controller.scroll(-3.0, &mut viewport.camera);
    println!(
        "After drag: azimuth {:.3} rad, arm {:.1}",
        viewport.camera.azimuth(),
        viewport.camera.radius()
    );

    let uniform = viewport.camera_uniform()?;
    println!("Camera uniform eye: {:?}", uniform.view_position);
    println!("Selected: {:?}", viewport.selection());

    Ok(())
}
