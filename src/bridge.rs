//! Process-wide convenience entry points
//!
//! A thin adapter for host bindings that cannot hold an [`Engine`] handle.
//! The host installs one engine; the first movement call starts it. Only
//! one engine exists per process, so nothing here suits multi-instance use.

use once_cell::sync::OnceCell;

use crate::config::{MovementStyle, Settings};
use crate::engine::{Engine, EngineState, DEFAULT_NUDGE_PIXELS};
use crate::motion::Position;

/// Global engine for binding access
static ENGINE: OnceCell<Engine> = OnceCell::new();

/// Install the process-wide engine; false if one is already installed
pub fn install(engine: Engine) -> bool {
    if ENGINE.set(engine).is_err() {
        log::error!("A global movement engine is already installed");
        return false;
    }
    true
}

/// The installed engine, if any
pub fn engine() -> Option<&'static Engine> {
    ENGINE.get()
}

/// The installed engine, started on first use
fn running() -> Option<&'static Engine> {
    let Some(engine) = ENGINE.get() else {
        log::error!("No global movement engine installed");
        return None;
    };

    if engine.state() == EngineState::Idle && !engine.initialize() {
        return None;
    }
    Some(engine)
}

pub fn move_by(dx: i32, dy: i32) -> bool {
    running().is_some_and(|engine| engine.move_cursor(dx, dy))
}

pub fn move_to(x: i32, y: i32) -> bool {
    running().is_some_and(|engine| engine.move_cursor_to(x, y))
}

pub fn position() -> Option<Position> {
    engine().map(Engine::get_position)
}

/// Move up by `pixels`, or [`DEFAULT_NUDGE_PIXELS`] when `None`
pub fn up(pixels: Option<i32>) -> bool {
    move_by(0, -pixels.unwrap_or(DEFAULT_NUDGE_PIXELS))
}

pub fn down(pixels: Option<i32>) -> bool {
    move_by(0, pixels.unwrap_or(DEFAULT_NUDGE_PIXELS))
}

pub fn left(pixels: Option<i32>) -> bool {
    move_by(-pixels.unwrap_or(DEFAULT_NUDGE_PIXELS), 0)
}

pub fn right(pixels: Option<i32>) -> bool {
    move_by(pixels.unwrap_or(DEFAULT_NUDGE_PIXELS), 0)
}

/// Replace every setting from a JSON document
pub fn configure(settings_json: &str) -> bool {
    let Some(engine) = engine() else {
        return false;
    };

    match Settings::from_json(settings_json) {
        Ok(settings) => {
            engine.apply_settings(settings);
            true
        }
        Err(e) => {
            log::error!("Failed to parse settings: {}", e);
            false
        }
    }
}

pub fn set_enabled(enabled: bool) -> bool {
    engine()
        .map(|engine| engine.set_enabled(enabled))
        .is_some()
}

pub fn set_humanization_level(level: i32) -> bool {
    engine()
        .map(|engine| engine.set_humanization_level(level))
        .is_some()
}

pub fn set_jitter_amount(amount: i32) -> bool {
    engine()
        .map(|engine| engine.set_jitter_amount(amount))
        .is_some()
}

pub fn set_movement_delay(micros: i64) -> bool {
    engine()
        .map(|engine| engine.set_movement_delay(micros))
        .is_some()
}

pub fn set_path_deviation(deviation: f64) -> bool {
    engine()
        .map(|engine| engine.set_path_deviation(deviation))
        .is_some()
}

/// Set the style from its integer form (0 = direct, 1 = bezier, 2 = random)
pub fn set_movement_style(style: i32) -> bool {
    engine()
        .map(|engine| engine.set_movement_style(MovementStyle::from_index(style)))
        .is_some()
}

/// Drain and stop the installed engine
pub fn shutdown() {
    if let Some(engine) = engine() {
        engine.shutdown();
    }
}
