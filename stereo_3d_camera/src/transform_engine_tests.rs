//! Unit tests for TransformEngine
//!
//! The engine logs through the process-wide logger, so every test is
//! #[serial] to keep captured entries from interleaving.

use glam::{Vec2, Vec3};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use crate::camera::{compute_model_transform, top_view_transform, Eye, FrustumPolicy};
use crate::config::EngineConfig;
use crate::display::DisplayParameters;
use crate::error::Error;
use crate::log::{self, LogEntry, LogSeverity, Logger};
use crate::math::{element, is_finite, max_abs_diff, transform_point};
use crate::state::{RenderingMode, ViewerState};
use super::*;

// ============================================================================
// TEST HELPERS
// ============================================================================

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Captured entries; the default logger comes back on drop, even when an
/// assertion fails first.
struct LogCapture {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogCapture {
    fn first(&self) -> LogEntry {
        self.entries.lock().unwrap()[0].clone()
    }
}

impl Drop for LogCapture {
    fn drop(&mut self) {
        }
}

fn capture_logs() -> LogCapture {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(CaptureLogger { entries: entries.clone() });
    LogCapture { entries }
}

fn count(capture: &LogCapture, severity: LogSeverity) -> usize {
    capture.entries.lock().unwrap().iter().filter(|e| e.severity == severity).count()
}

fn engine() -> TransformEngine {
    TransformEngine::new(DisplayParameters::default())
}

fn state() -> ViewerState {
    ViewerState {
        viewer_position: Vec3::new(100.0, 50.0, 800.0),
        viewer_target: Vec3::new(0.0, 0.0, 0.0),
        model_translation: Vec3::new(10.0, 0.0, -20.0),
        model_rotation: Vec2::new(15.0, 30.0),
        ..Default::default()
    }
}

const ALL_MODES: [RenderingMode; 6] = [
    RenderingMode::Standard,
    RenderingMode::TopView,
    RenderingMode::Anaglyph,
    RenderingMode::LensStereo,
    RenderingMode::Foveated,
    RenderingMode::DepthOfField,
];

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
#[serial]
fn test_new_engine_has_no_populated_slot() {
    let engine = engine();

    assert_eq!(engine.mode(), None);
    assert!(engine.active_eyes().is_empty());
    for eye in Eye::ALL {
        assert_eq!(engine.eye(eye).unwrap_err(), Error::UnpopulatedSlot { eye, mode: None });
    }
}

#[test]
#[serial]
fn test_construction_logs_info() {
    let entries = capture_logs();
    let _engine = engine();

    assert_eq!(count(&entries, LogSeverity::Info), 1);
    assert_eq!(count(&entries, LogSeverity::Warn), 0);
}

#[test]
#[serial]
fn test_invalid_display_warns_at_construction() {
    let entries = capture_logs();
    let _engine = TransformEngine::new(DisplayParameters { pixel_pitch: 0.0, ..Default::default() });

    assert_eq!(count(&entries, LogSeverity::Warn), 1);
}

#[test]
#[serial]
fn test_with_config_is_kept() {
    let config = EngineConfig {
        top_view_height: 900.0,
        validate_inputs: false,
        epsilon: 1e-3,
        ..Default::default()
    };
    let engine = TransformEngine::with_config(DisplayParameters::default(), config);

    assert_eq!(*engine.config(), config);
    assert_eq!(*TransformEngine::new(DisplayParameters::default()).config(), EngineConfig::default());
}

#[test]
#[serial]
fn test_log_capture_released_after_failed_assertion() {
    let leaked = Arc::new(Mutex::new(None));

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let logs = capture_logs();
        *leaked.lock().unwrap() = Some(logs.entries.clone());
        panic!("assertion failed inside a capturing test");
    }));
    assert!(result.is_err());

    let entries = leaked.lock().unwrap().take().unwrap();
    let _engine = engine();
    assert!(entries.lock().unwrap().is_empty());
}

// ============================================================================
// SLOT SELECTION
// ============================================================================

#[test]
#[serial]
fn test_monocular_modes_populate_mono_slot() {
    for mode in [
        RenderingMode::Standard,
        RenderingMode::TopView,
        RenderingMode::Foveated,
        RenderingMode::DepthOfField,
    ] {
        let mut engine = engine();
        engine.update(&state(), mode);

        assert_eq!(engine.active_eyes(), &[Eye::Mono]);
        assert!(engine.eye(Eye::Mono).is_ok());
        assert_eq!(
            engine.eye(Eye::Left).unwrap_err(),
            Error::UnpopulatedSlot { eye: Eye::Left, mode: Some(mode) }
        );
    }
}

#[test]
#[serial]
fn test_stereo_modes_populate_both_eye_slots() {
    for mode in [RenderingMode::Anaglyph, RenderingMode::LensStereo] {
        let mut engine = engine();
        engine.update(&state(), mode);

        assert_eq!(engine.active_eyes(), &[Eye::Left, Eye::Right]);
        assert!(engine.view_matrix(Eye::Left).is_ok());
        assert!(engine.view_matrix(Eye::Right).is_ok());
        assert!(engine.projection_matrix(Eye::Mono).is_err());
    }
}

#[test]
#[serial]
fn test_stale_slot_is_refused_after_mode_switch() {
    let mut engine = engine();
    engine.update(&state(), RenderingMode::Standard);
    assert!(engine.view_matrix(Eye::Mono).is_ok());

    engine.update(&state(), RenderingMode::Anaglyph);
    assert_eq!(
        engine.view_matrix(Eye::Mono).unwrap_err(),
        Error::UnpopulatedSlot { eye: Eye::Mono, mode: Some(RenderingMode::Anaglyph) }
    );
}

#[test]
#[serial]
fn test_unpopulated_read_logs_error() {
    let mut engine = engine();
    engine.update(&state(), RenderingMode::Standard);

    let entries = capture_logs();
    assert!(engine.inverse_projection_matrix(Eye::Right).is_err());

    assert_eq!(count(&entries, LogSeverity::Error), 1);
    assert!(entries.first().file.is_some());
}

// ============================================================================
// MATRIX CONTENTS
// ============================================================================

#[test]
#[serial]
fn test_model_matrix_recomputed_every_mode() {
    let mut engine = engine();
    let s = state();
    for mode in ALL_MODES {
        let mut moved = s;
        moved.model_rotation.y += 10.0;
        engine.update(&moved, mode);
        assert_eq!(
            *engine.model_matrix(),
            compute_model_transform(moved.model_translation, moved.model_rotation)
        );
    }
}

#[test]
#[serial]
fn test_monitor_scenario_projection() {
    let mut engine = engine();
    let s = ViewerState { clip_near: 1.0, clip_far: 10000.0, ..state() };
    engine.update(&s, RenderingMode::Standard);

    let projection = engine.projection_matrix(Eye::Mono).unwrap();
    assert!((element(projection, 0, 0) - 2.083_333).abs() < 1e-4);
}

#[test]
#[serial]
fn test_inverse_projection_round_trip_every_mode() {
    let mut engine = engine();
    for mode in ALL_MODES {
        engine.update(&state(), mode);
        for &eye in engine.active_eyes() {
            let slot = engine.eye(eye).unwrap();
            let product = slot.projection * slot.inverse_projection;
            assert!(max_abs_diff(&product, &Mat4::IDENTITY) < 1e-4, "{:?} {:?}", mode, eye);
        }
    }
}

#[test]
#[serial]
fn test_inverse_follows_projection_changes() {
    let mut engine = engine();
    engine.update(&state(), RenderingMode::DepthOfField);
    let first = *engine.inverse_projection_matrix(Eye::Mono).unwrap();

    let closer = ViewerState { clip_near: 10.0, ..state() };
    engine.update(&closer, RenderingMode::DepthOfField);
    let second = *engine.inverse_projection_matrix(Eye::Mono).unwrap();

    assert_ne!(first, second);
    let product = *engine.projection_matrix(Eye::Mono).unwrap() * second;
    assert!(max_abs_diff(&product, &Mat4::IDENTITY) < 1e-4);
}

#[test]
#[serial]
fn test_post_process_modes_share_standard_geometry() {
    let mut standard = engine();
    standard.update(&state(), RenderingMode::Standard);

    for mode in [RenderingMode::Foveated, RenderingMode::DepthOfField] {
        let mut other = engine();
        other.update(&state(), mode);
        assert_eq!(other.eye(Eye::Mono).unwrap(), standard.eye(Eye::Mono).unwrap());
    }
}

#[test]
#[serial]
fn test_top_view_flag_and_mode_agree() {
    let mut by_flag = engine();
    by_flag.update(&ViewerState { top_view: true, ..state() }, RenderingMode::Standard);

    let mut by_mode = engine();
    by_mode.update(&state(), RenderingMode::TopView);

    let slot = by_mode.eye(Eye::Mono).unwrap();
    assert_eq!(by_flag.eye(Eye::Mono).unwrap(), slot);
    assert_eq!(slot.view, top_view_transform(1500.0));
    assert!(matches!(by_mode.policy(), Some(FrustumPolicy::TopView { .. })));
}

#[test]
#[serial]
fn test_orthographic_flag() {
    let mut engine = engine();
    engine.update(&ViewerState { perspective: false, ..state() }, RenderingMode::Standard);

    let projection = engine.projection_matrix(Eye::Mono).unwrap();
    assert!((element(projection, 0, 0) - 1.0 / 288.0).abs() < 1e-6);
    assert_eq!(element(projection, 3, 3), 1.0);
}

#[test]
#[serial]
fn test_stereo_views_straddle_viewer() {
    let mut engine = engine();
    let s = state();
    engine.update(&s, RenderingMode::LensStereo);

    let left = transform_point(engine.view_matrix(Eye::Left).unwrap(), s.viewer_position);
    let right = transform_point(engine.view_matrix(Eye::Right).unwrap(), s.viewer_position);
    assert!(left.abs_diff_eq(Vec3::new(32.0, 0.0, 0.0), 1e-3));
    assert!(right.abs_diff_eq(Vec3::new(-32.0, 0.0, 0.0), 1e-3));
}

#[test]
#[serial]
fn test_update_is_deterministic() {
    let mut a = engine();
    let mut b = engine();
    for mode in ALL_MODES {
        a.update(&state(), mode);
        b.update(&state(), mode);
        assert_eq!(a.model_matrix(), b.model_matrix());
        for &eye in a.active_eyes() {
            assert_eq!(a.eye(eye).unwrap(), b.eye(eye).unwrap());
        }
    }
}

#[test]
#[serial]
fn test_uniforms_match_slot() {
    let mut engine = engine();
    engine.update(&state(), RenderingMode::Anaglyph);

    let uniforms = engine.uniforms(Eye::Right).unwrap();
    let slot = engine.eye(Eye::Right).unwrap();
    assert_eq!(uniforms.model, *engine.model_matrix());
    assert_eq!(uniforms.view, slot.view);
    assert_eq!(uniforms.inverse_projection, slot.inverse_projection);
    assert!(engine.uniforms(Eye::Mono).is_err());
}

#[test]
#[serial]
fn test_view_projection_composes_slot_matrices() {
    let mut engine = engine();
    engine.update(&state(), RenderingMode::LensStereo);
    let slot = engine.eye(Eye::Left).unwrap();

    let combined = slot.view_projection();
    assert_eq!(combined, slot.projection * slot.view);

    let world = Vec3::new(40.0, -25.0, -150.0);
    let by_hand = transform_point(&slot.projection, transform_point(&slot.view, world));
    let ndc = transform_point(&combined, world);
    assert!(ndc.abs_diff_eq(by_hand, 1e-5), "{} vs {}", ndc, by_hand);
}

// ============================================================================
// DEGENERATE INPUT
// ============================================================================

#[test]
#[serial]
fn test_update_propagates_degenerate_view_with_warning() {
    let mut engine = engine();
    let entries = capture_logs();

    let s = ViewerState { viewer_target: state().viewer_position, ..state() };
    engine.update(&s, RenderingMode::Standard);

    assert_eq!(count(&entries, LogSeverity::Warn), 1);
    assert!(!is_finite(engine.view_matrix(Eye::Mono).unwrap()));
}

#[test]
#[serial]
fn test_update_without_validation_stays_quiet() {
    let config = EngineConfig { validate_inputs: false, ..Default::default() };
    let mut engine = TransformEngine::with_config(DisplayParameters::default(), config);
    let entries = capture_logs();

    let s = ViewerState { clip_near: 100.0, clip_far: 10.0, ..state() };
    engine.update(&s, RenderingMode::Anaglyph);

    assert_eq!(count(&entries, LogSeverity::Warn), 0);
    assert!(engine.eye(Eye::Left).is_ok());
}

#[test]
#[serial]
fn test_top_view_skips_look_direction_check() {
    let mut engine = engine();
    let s = ViewerState { viewer_target: state().viewer_position, ..state() };
    assert!(engine.try_update(&s, RenderingMode::TopView).is_ok());
}

#[test]
#[serial]
fn test_try_update_rejects_degenerate_view() {
    let mut engine = engine();
    engine.update(&state(), RenderingMode::Standard);
    let before = *engine.eye(Eye::Mono).unwrap();

    let s = ViewerState {
        viewer_position: Vec3::new(0.0, 500.0, 0.0),
        viewer_target: Vec3::ZERO,
        ..state()
    };
    let result = engine.try_update(&s, RenderingMode::Anaglyph);

    assert!(matches!(result, Err(Error::DegenerateView(_))));
    assert_eq!(engine.mode(), Some(RenderingMode::Standard));
    assert_eq!(*engine.eye(Eye::Mono).unwrap(), before);
}

#[test]
#[serial]
fn test_try_update_rejects_inverted_clip_range() {
    let mut engine = engine();
    let s = ViewerState { clip_near: 500.0, clip_far: 50.0, ..state() };

    assert!(matches!(
        engine.try_update(&s, RenderingMode::LensStereo),
        Err(Error::InvalidFrustum(_))
    ));
    assert_eq!(engine.mode(), None);
}

#[test]
#[serial]
fn test_mode_change_logs_debug_once() {
    let mut engine = engine();
    let entries = capture_logs();

    engine.update(&state(), RenderingMode::Standard);
    engine.update(&state(), RenderingMode::Standard);
    engine.update(&state(), RenderingMode::Anaglyph);

    assert_eq!(count(&entries, LogSeverity::Debug), 2);
    assert_eq!(count(&entries, LogSeverity::Trace), 3);
}
