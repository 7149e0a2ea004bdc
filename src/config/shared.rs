//! Live settings shared between callers and the worker
//!
//! Each field sits in its own atomic, so any single read or write is
//! consistent. A [`SharedSettings::snapshot`] taken while another thread is
//! writing may mix old and new fields; the worker tolerates that.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, Ordering};

use super::settings::{
    clamp_delay, clamp_deviation, clamp_jitter, clamp_level, MovementStyle, Settings,
};

/// Settings store with clamping setters
#[derive(Debug)]
pub struct SharedSettings {
    humanization_level: AtomicU8,
    jitter_amount: AtomicU8,
    movement_delay_micros: AtomicU32,
    path_deviation_bits: AtomicU64,
    movement_style: AtomicU8,
    enabled: AtomicBool,
}

impl SharedSettings {
    /// Create a store holding the given settings (clamped)
    pub fn new(settings: Settings) -> Self {
        let settings = settings.clamped();
        Self {
            humanization_level: AtomicU8::new(settings.humanization_level),
            jitter_amount: AtomicU8::new(settings.jitter_amount),
            movement_delay_micros: AtomicU32::new(settings.movement_delay_micros),
            path_deviation_bits: AtomicU64::new(settings.path_deviation.to_bits()),
            movement_style: AtomicU8::new(settings.movement_style.index() as u8),
            enabled: AtomicBool::new(settings.enabled),
        }
    }

    /// Read every field once
    pub fn snapshot(&self) -> Settings {
        Settings {
            humanization_level: self.humanization_level(),
            jitter_amount: self.jitter_amount(),
            movement_delay_micros: self.movement_delay_micros(),
            path_deviation: self.path_deviation(),
            movement_style: self.movement_style(),
            enabled: self.enabled(),
        }
    }

    /// Replace every field (clamped)
    pub fn apply(&self, settings: Settings) {
        let settings = settings.clamped();
        self.humanization_level
            .store(settings.humanization_level, Ordering::Relaxed);
        self.jitter_amount
            .store(settings.jitter_amount, Ordering::Relaxed);
        self.movement_delay_micros
            .store(settings.movement_delay_micros, Ordering::Relaxed);
        self.path_deviation_bits
            .store(settings.path_deviation.to_bits(), Ordering::Relaxed);
        self.set_movement_style(settings.movement_style);
        self.set_enabled(settings.enabled);
    }

    pub fn humanization_level(&self) -> u8 {
        self.humanization_level.load(Ordering::Relaxed)
    }

    pub fn set_humanization_level(&self, level: i32) {
        self.humanization_level
            .store(clamp_level(level), Ordering::Relaxed);
    }

    pub fn jitter_amount(&self) -> u8 {
        self.jitter_amount.load(Ordering::Relaxed)
    }

    pub fn set_jitter_amount(&self, amount: i32) {
        self.jitter_amount
            .store(clamp_jitter(amount), Ordering::Relaxed);
    }

    pub fn movement_delay_micros(&self) -> u32 {
        self.movement_delay_micros.load(Ordering::Relaxed)
    }

    pub fn set_movement_delay_micros(&self, micros: i64) {
        self.movement_delay_micros
            .store(clamp_delay(micros), Ordering::Relaxed);
    }

    pub fn path_deviation(&self) -> f64 {
        f64::from_bits(self.path_deviation_bits.load(Ordering::Relaxed))
    }

    pub fn set_path_deviation(&self, deviation: f64) {
        self.path_deviation_bits
            .store(clamp_deviation(deviation).to_bits(), Ordering::Relaxed);
    }

    pub fn movement_style(&self) -> MovementStyle {
        MovementStyle::from_index(self.movement_style.load(Ordering::Relaxed) as i32)
    }

    pub fn set_movement_style(&self, style: MovementStyle) {
        self.movement_style
            .store(style.index() as u8, Ordering::Relaxed);
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
