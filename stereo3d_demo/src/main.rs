//! Stereo 3D camera demo host.
//!
//! Plays the part of a render loop: a fixed desktop display, a viewer
//! orbiting the scene origin, and a few frames in every rendering mode.
//! The matrices each frame would upload are written to the log.

use glam::{Vec2, Vec3};
use stereo_3d_camera::stereo3d::log::{self, DefaultLogger, LogSeverity};
use stereo_3d_camera::{camera_error, camera_info};
use stereo_3d_camera::stereo3d::postprocess::{DepthOfFieldParams, FoveationParams, LensUnwarpParams};
use stereo_3d_camera::stereo3d::{
    DisplayParameters, Eye, RenderingMode, Result, TransformEngine, ViewerState,
};

const SOURCE: &str = "stereo3d_demo";
const FRAMES_PER_MODE: u32 = 3;
const ORBIT_RADIUS: f32 = 800.0;
const ORBIT_STEP_DEGREES: f32 = 5.0;

const MODES: [RenderingMode; 6] = [
    RenderingMode::Standard,
    RenderingMode::TopView,
    RenderingMode::Anaglyph,
    RenderingMode::LensStereo,
    RenderingMode::Foveated,
    RenderingMode::DepthOfField,
];

fn main() {
    log::set_logger(DefaultLogger::new(LogSeverity::Debug));

    if let Err(err) = run() {
        camera_error!(SOURCE, "Demo failed: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let display = DisplayParameters {
        distance_lens_screen: 39.0,
        distortion_coefficients: [0.34, 0.55],
        ..Default::default()
    };
    display.validate()?;

    let mut engine = TransformEngine::new(display);
    let mut state = ViewerState { clip_near: 10.0, ..Default::default() };
    let mut frame = 0u32;

    for mode in MODES {
        for _ in 0..FRAMES_PER_MODE {
            orbit(&mut state, frame);
            engine.try_update(&state, mode)?;
            report_frame(&engine, &state, mode, frame)?;
            frame += 1;
        }
    }

    camera_info!(SOURCE, "Rendered {} frames", frame);
    Ok(())
}

/// Move the viewer along a horizontal circle and spin the model slowly.
fn orbit(state: &mut ViewerState, frame: u32) {
    let angle = (frame as f32 * ORBIT_STEP_DEGREES).to_radians();
    state.viewer_position = Vec3::new(ORBIT_RADIUS * angle.sin(), 100.0, ORBIT_RADIUS * angle.cos());
    state.model_rotation = Vec2::new(0.0, frame as f32 * 2.0);
    state.gaze_position = Vec2::new(960.0 + 40.0 * frame as f32, 540.0);
}

/// Viewport coordinate of the temple-side edge: x = 0 for the left eye, x = 1 for the right.
fn temple_edge(eye: Eye) -> Vec2 {
    let x = if eye == Eye::Left { 0.0 } else { 1.0 };
    Vec2::new(x, 0.5)
}

fn report_frame(engine: &TransformEngine, state: &ViewerState, mode: RenderingMode, frame: u32) -> Result<()> {
    for &eye in engine.active_eyes() {
        let uniforms = engine.uniforms(eye)?;
        camera_info!(
            SOURCE,
            "frame {} {:?} {:?}: view {:?} projection {:?} ({} bytes)",
            frame,
            mode,
            eye,
            uniforms.view.to_cols_array(),
            uniforms.projection.to_cols_array(),
            uniforms.as_bytes().len()
        );
    }

    if mode.is_stereo() {
        // Unwarp inputs for the headset eyes of either stereo mode
        for eye in [Eye::Left, Eye::Right] {
            let unwarp = LensUnwarpParams::for_eye(engine.display(), eye)?;
            let temple = temple_edge(eye);
            camera_info!(
                SOURCE,
                "  lens unwarp {:?}: center {:?}, temple edge scale {:.3}",
                eye,
                unwarp.center_coordinate,
                unwarp.distortion_scale(temple)
            );
        }
        return Ok(());
    }

    match mode {
        RenderingMode::DepthOfField => {
            let dof = DepthOfFieldParams::from_engine(engine, state)?;
            let focus = dof.distance_to_fragment(dof.gaze_position, 0.99);
            camera_info!(
                SOURCE,
                "  depth of field: focus {:.1} mm, blur at 2x focus {:.2} px",
                focus,
                dof.blur_radius_pixels(2.0 * focus, focus)
            );
        }
        RenderingMode::Foveated => {
            let foveation = FoveationParams::new(engine.display(), state.gaze_position, 5.0, 10.0)?;
            let corner = Vec2::ZERO;
            camera_info!(
                SOURCE,
                "  foveation: {:.4} deg/px, corner at {:.1} deg is {:?}",
                foveation.pixel_visual_angle,
                foveation.eccentricity(corner),
                foveation.layer(corner)
            );
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
