//! Movement engine
//!
//! Accepts movement requests from any number of caller threads, quantizes
//! them into small steps and queues them for a single background worker,
//! which turns each step into backend calls. Absolute moves over a long
//! distance may instead walk a curved path on the caller's thread.

pub mod worker;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crate::backend::{BackendSelector, Dispatcher, PointerPlatform, PrivilegedChannel};
use crate::config::{MovementStyle, Settings, SharedSettings};
use crate::error::MotionError;
use crate::humanize::Humanizer;
use crate::motion::{CommandQueue, MovementHistory, MovementVector, Position};

pub use worker::{StepPath, SMALL_MOVE_LIMIT};

/// Distance beyond which `move_cursor_to` may walk a curved path
pub const CURVE_THRESHOLD: i32 = 10;
/// Step size queued by `move_cursor_to` for distant targets
pub const LARGE_STEP: i32 = 2;
/// Default magnitude of the directional helpers
pub const DEFAULT_NUDGE_PIXELS: i32 = 5;

/// Lifecycle of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, worker not started
    Idle,
    /// Worker draining the queue
    Running,
    /// Queue closed, worker finishing queued items
    Draining,
    /// Worker exited; terminal
    Stopped,
}

/// Screen direction for the nudge helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Relative vector of `pixels` in this direction
    pub fn delta(self, pixels: i32) -> MovementVector {
        match self {
            Direction::Up => MovementVector::new(0, -pixels),
            Direction::Down => MovementVector::new(0, pixels),
            Direction::Left => MovementVector::new(-pixels, 0),
            Direction::Right => MovementVector::new(pixels, 0),
        }
    }
}

/// State shared between the engine handle and its worker
pub(crate) struct Shared {
    pub(crate) settings: SharedSettings,
    pub(crate) queue: CommandQueue<MovementVector>,
    pub(crate) history: MovementHistory,
    pub(crate) dispatcher: Mutex<Dispatcher>,
    platform: Arc<dyn PointerPlatform>,
    state: Mutex<EngineState>,
    caller_humanizer: Mutex<Humanizer>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatcher(&self) -> MutexGuard<'_, Dispatcher> {
        self.dispatcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn caller_humanizer(&self) -> MutexGuard<'_, Humanizer> {
        self.caller_humanizer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Humanized pointer movement engine
pub struct Engine {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
    seed: Option<u64>,
}

impl Engine {
    /// Create an idle engine over a host platform with default settings
    pub fn new(platform: Arc<dyn PointerPlatform>) -> Self {
        let dispatcher = Dispatcher::new(Arc::clone(&platform), Humanizer::new());

        Self {
            shared: Arc::new(Shared {
                settings: SharedSettings::default(),
                queue: CommandQueue::new(),
                history: MovementHistory::new(),
                dispatcher: Mutex::new(dispatcher),
                platform,
                state: Mutex::new(EngineState::Idle),
                caller_humanizer: Mutex::new(Humanizer::new()),
            }),
            worker: Mutex::new(None),
            seed: None,
        }
    }

    /// Start from the given settings (clamped)
    pub fn with_settings(self, settings: Settings) -> Self {
        self.shared.settings.apply(settings);
        self
    }

    /// Make every random draw reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the backend selection policy
    pub fn with_selector(self, selector: Box<dyn BackendSelector>) -> Self {
        self.shared.dispatcher().set_selector(selector);
        self
    }

    /// Attach a privileged channel, probed once by [`Engine::initialize`]
    pub fn with_channel(self, channel: Arc<dyn PrivilegedChannel>) -> Self {
        self.shared.dispatcher().set_channel(channel);
        self
    }

    /// Start the worker
    ///
    /// Seeds the random sources, clears the history and probes the
    /// privileged channel if one is attached and not yet probed. Calling
    /// this while running does nothing; a shut-down engine cannot restart.
    pub fn initialize(&self) -> bool {
        let mut state = self.shared.state();
        match *state {
            EngineState::Idle => {}
            EngineState::Running => {
                log::warn!("Engine already running, ignoring initialize");
                return true;
            }
            EngineState::Draining | EngineState::Stopped => {
                log::error!("Engine has been shut down and cannot be restarted");
                return false;
            }
        }

        self.shared.history.clear();
        *self.shared.caller_humanizer() = self.humanizer(1);
        {
            let mut dispatcher = self.shared.dispatcher();
            dispatcher.set_humanizer(self.humanizer(0));
            if dispatcher.needs_probe() {
                match dispatcher.probe_channel() {
                    Ok(()) => log::info!("Privileged channel connected"),
                    Err(e) => log::warn!("{}; continuing without it", e),
                }
            }
        }

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("pointer-worker".to_string())
            .spawn(move || worker::run(shared));

        match spawned {
            Ok(handle) => {
                *self.worker.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
                *state = EngineState::Running;
                log::info!("Movement engine initialized");
                true
            }
            Err(e) => {
                log::error!("Failed to spawn movement worker: {}", e);
                false
            }
        }
    }

    /// Probe the privileged channel now instead of at initialization
    pub fn probe_channel(&self) -> bool {
        self.shared.dispatcher().probe_channel().is_ok()
    }

    /// Close the queue, let the worker drain it and wait for it to exit
    ///
    /// Idempotent. Blocks until every queued movement has been processed.
    pub fn shutdown(&self) {
        {
            let mut state = self.shared.state();
            match *state {
                EngineState::Idle => {
                    *state = EngineState::Stopped;
                    self.shared.queue.close();
                    return;
                }
                EngineState::Running => *state = EngineState::Draining,
                EngineState::Draining | EngineState::Stopped => {}
            }
        }

        self.shared.queue.close();

        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = worker.take() {
            if handle.join().is_err() {
                log::error!("Movement worker panicked");
            }
            log::info!("Movement engine stopped");
        }
        *self.shared.state() = EngineState::Stopped;
    }

    pub fn state(&self) -> EngineState {
        *self.shared.state()
    }

    pub fn is_initialized(&self) -> bool {
        self.state() == EngineState::Running
    }

    /// Queue a relative move
    ///
    /// The delta is jittered when humanizing and then reduced to a single
    /// step of at most one pixel per axis.
    pub fn move_cursor(&self, dx: i32, dy: i32) -> bool {
        report(self.try_move_cursor(MovementVector::new(dx, dy)))
    }

    /// Move to an absolute position
    ///
    /// Distant targets walk a curve when humanizing and the style asks for
    /// one, otherwise a single step of at most two pixels per axis is
    /// queued. While disabled no curve is walked: the far target falls
    /// through to the queued step, which the worker discards, and history
    /// still records where that step would have landed, as for every
    /// other queued movement.
    pub fn move_cursor_to(&self, x: i32, y: i32) -> bool {
        report(self.try_move_cursor_to(Position::new(x, y)))
    }

    /// Current pointer position as reported by the platform
    pub fn get_position(&self) -> Position {
        self.shared.platform.current_position()
    }

    /// Alias of [`Engine::move_cursor_to`]
    pub fn set_position(&self, x: i32, y: i32) -> bool {
        self.move_cursor_to(x, y)
    }

    pub fn move_up(&self, pixels: i32) -> bool {
        self.move_in(Direction::Up, pixels)
    }

    pub fn move_down(&self, pixels: i32) -> bool {
        self.move_in(Direction::Down, pixels)
    }

    pub fn move_left(&self, pixels: i32) -> bool {
        self.move_in(Direction::Left, pixels)
    }

    pub fn move_right(&self, pixels: i32) -> bool {
        self.move_in(Direction::Right, pixels)
    }

    /// Move [`DEFAULT_NUDGE_PIXELS`] in a direction
    pub fn nudge(&self, direction: Direction) -> bool {
        self.move_in(direction, DEFAULT_NUDGE_PIXELS)
    }

    fn move_in(&self, direction: Direction, pixels: i32) -> bool {
        let delta = direction.delta(pixels);
        self.move_cursor(delta.dx, delta.dy)
    }

    /// Positions the engine believes it moved to, oldest first
    pub fn history(&self) -> Vec<Position> {
        self.shared.history.snapshot()
    }

    /// Movements queued but not yet taken by the worker
    pub fn pending_movements(&self) -> usize {
        self.shared.queue.len()
    }

    /// Whether the privileged channel is among the selectable backends
    pub fn channel_available(&self) -> bool {
        self.shared.dispatcher().channel_available()
    }

    pub fn settings(&self) -> Settings {
        self.shared.settings.snapshot()
    }

    pub fn apply_settings(&self, settings: Settings) {
        self.shared.settings.apply(settings);
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.settings.enabled()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.shared.settings.set_enabled(enabled);
    }

    pub fn humanization_level(&self) -> u8 {
        self.shared.settings.humanization_level()
    }

    pub fn set_humanization_level(&self, level: i32) {
        self.shared.settings.set_humanization_level(level);
    }

    pub fn jitter_amount(&self) -> u8 {
        self.shared.settings.jitter_amount()
    }

    pub fn set_jitter_amount(&self, amount: i32) {
        self.shared.settings.set_jitter_amount(amount);
    }

    pub fn movement_delay(&self) -> u32 {
        self.shared.settings.movement_delay_micros()
    }

    pub fn set_movement_delay(&self, micros: i64) {
        self.shared.settings.set_movement_delay_micros(micros);
    }

    pub fn path_deviation(&self) -> f64 {
        self.shared.settings.path_deviation()
    }

    pub fn set_path_deviation(&self, deviation: f64) {
        self.shared.settings.set_path_deviation(deviation);
    }

    pub fn movement_style(&self) -> MovementStyle {
        self.shared.settings.movement_style()
    }

    pub fn set_movement_style(&self, style: MovementStyle) {
        self.shared.settings.set_movement_style(style);
    }

    fn ensure_running(&self) -> Result<(), MotionError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(MotionError::NotInitialized)
        }
    }

    fn try_move_cursor(&self, delta: MovementVector) -> Result<(), MotionError> {
        self.ensure_running()?;

        let settings = self.shared.settings.snapshot();
        let delta = if settings.humanization_level > 0 && settings.jitter_amount > 0 {
            let mut humanizer = self.shared.caller_humanizer();
            MovementVector::new(
                humanizer.jitter(delta.dx, settings.jitter_amount),
                humanizer.jitter(delta.dy, settings.jitter_amount),
            )
        } else {
            delta
        };

        self.enqueue(delta.quantize(1))
    }

    fn try_move_cursor_to(&self, target: Position) -> Result<(), MotionError> {
        self.ensure_running()?;

        let settings = self.shared.settings.snapshot();
        let delta = self.get_position().delta_to(target);

        if settings.enabled
            && settings.humanization_level > 0
            && !delta.within(CURVE_THRESHOLD)
            && self.wants_curve(settings.movement_style)
        {
            let mut dispatcher = self.shared.dispatcher();
            let start = dispatcher.current_position();
            dispatcher.curved_path(start, target, &settings)?;
            self.shared.history.record(target);
            return Ok(());
        }

        if delta.within(SMALL_MOVE_LIMIT) {
            return self.try_move_cursor(delta);
        }

        self.enqueue(delta.quantize(LARGE_STEP))
    }

    fn wants_curve(&self, style: MovementStyle) -> bool {
        match style {
            MovementStyle::Direct => false,
            MovementStyle::Bezier => true,
            MovementStyle::Random => self.shared.caller_humanizer().coin_flip(),
        }
    }

    /// Push an already quantized step and record where it should land
    fn enqueue(&self, step: MovementVector) -> Result<(), MotionError> {
        // Read before pushing so the worker cannot move the pointer first
        let believed = self.get_position().offset(step);
        if !self.shared.queue.push(step) {
            return Err(MotionError::NotInitialized);
        }

        self.shared.history.record(believed);
        Ok(())
    }

    fn humanizer(&self, stream: u64) -> Humanizer {
        match self.seed {
            Some(seed) => Humanizer::seeded(seed.wrapping_add(stream)),
            None => Humanizer::new(),
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn report(result: Result<(), MotionError>) -> bool {
    match result {
        Ok(()) => true,
        Err(MotionError::NotInitialized) => {
            log::debug!("Movement rejected: engine not running");
            false
        }
        Err(e) => {
            log::warn!("Movement failed: {}", e);
            false
        }
    }
}
