//! Movement settings
//!
//! Every humanization knob the engine reads, with the clamping rules that
//! keep each one inside its documented range.

use serde::{Deserialize, Serialize};

use crate::error::MotionError;

/// Highest humanization level (0 = none)
pub const MAX_HUMANIZATION_LEVEL: u8 = 10;
/// Largest jitter amount in pixels
pub const MAX_JITTER_AMOUNT: u8 = 10;
/// Longest inter-movement delay in microseconds
pub const MAX_MOVEMENT_DELAY_MICROS: u32 = 10_000;

/// How `move_to` travels to a distant target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementStyle {
    /// Queue a straight step toward the target
    Direct,
    /// Walk a curved Bezier path
    #[default]
    Bezier,
    /// Flip a fair coin on every far `move_to` call: curve or straight step
    Random,
}

impl MovementStyle {
    /// Convert an integer style (0 = direct, 1 = bezier, 2 = random),
    /// clamping out-of-range values to the nearest style
    pub fn from_index(index: i32) -> Self {
        match index.clamp(0, 2) {
            0 => MovementStyle::Direct,
            1 => MovementStyle::Bezier,
            _ => MovementStyle::Random,
        }
    }

    /// Integer form of the style
    pub fn index(self) -> i32 {
        match self {
            MovementStyle::Direct => 0,
            MovementStyle::Bezier => 1,
            MovementStyle::Random => 2,
        }
    }
}

/// Main settings structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How often and how strongly movements are randomized (0-10)
    pub humanization_level: u8,
    /// Upper bound of per-axis jitter in pixels (0-10)
    pub jitter_amount: u8,
    /// Base delay between queued movements (0-10000 µs)
    pub movement_delay_micros: u32,
    /// Fraction of the travel distance control points may stray (0.0-1.0)
    pub path_deviation: f64,
    /// Path style for absolute moves
    pub movement_style: MovementStyle,
    /// When false the worker discards queued movements
    pub enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            humanization_level: 5,
            jitter_amount: 2,
            movement_delay_micros: 100,
            path_deviation: 0.3,
            movement_style: MovementStyle::Bezier,
            enabled: true,
        }
    }
}

impl Settings {
    /// Create settings with no humanization at all
    pub fn direct() -> Self {
        Self {
            humanization_level: 0,
            jitter_amount: 0,
            path_deviation: 0.0,
            movement_style: MovementStyle::Direct,
            ..Default::default()
        }
    }

    /// Create settings with every humanization knob at its strongest
    pub fn maximum() -> Self {
        Self {
            humanization_level: MAX_HUMANIZATION_LEVEL,
            jitter_amount: MAX_JITTER_AMOUNT,
            path_deviation: 0.6,
            movement_style: MovementStyle::Bezier,
            ..Default::default()
        }
    }

    /// Parse settings from JSON, clamping every field into range
    ///
    /// Numbers outside a field's storage type (a negative delay, a level of
    /// 300) are clamped like any other out-of-range value.
    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        let raw: RawSettings = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    /// Return a copy with every field inside its documented range
    pub fn clamped(self) -> Self {
        Self {
            humanization_level: clamp_level(self.humanization_level as i32),
            jitter_amount: clamp_jitter(self.jitter_amount as i32),
            movement_delay_micros: clamp_delay(self.movement_delay_micros as i64),
            path_deviation: clamp_deviation(self.path_deviation),
            ..self
        }
    }
}

/// Wide on-the-wire form of [`Settings`], read before clamping
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawSettings {
    humanization_level: i64,
    jitter_amount: i64,
    movement_delay_micros: i64,
    path_deviation: f64,
    movement_style: MovementStyle,
    enabled: bool,
}

impl Default for RawSettings {
    fn default() -> Self {
        let defaults = Settings::default();
        Self {
            humanization_level: defaults.humanization_level.into(),
            jitter_amount: defaults.jitter_amount.into(),
            movement_delay_micros: defaults.movement_delay_micros.into(),
            path_deviation: defaults.path_deviation,
            movement_style: defaults.movement_style,
            enabled: defaults.enabled,
        }
    }
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        Self {
            humanization_level: clamp_level(saturate(raw.humanization_level)),
            jitter_amount: clamp_jitter(saturate(raw.jitter_amount)),
            movement_delay_micros: clamp_delay(raw.movement_delay_micros),
            path_deviation: clamp_deviation(raw.path_deviation),
            movement_style: raw.movement_style,
            enabled: raw.enabled,
        }
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

pub(crate) fn clamp_level(level: i32) -> u8 {
    level.clamp(0, MAX_HUMANIZATION_LEVEL as i32) as u8
}

pub(crate) fn clamp_jitter(amount: i32) -> u8 {
    amount.clamp(0, MAX_JITTER_AMOUNT as i32) as u8
}

pub(crate) fn clamp_delay(micros: i64) -> u32 {
    micros.clamp(0, MAX_MOVEMENT_DELAY_MICROS as i64) as u32
}

pub(crate) fn clamp_deviation(deviation: f64) -> f64 {
    if deviation.is_nan() {
        return 0.0;
    }
    deviation.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.humanization_level, 5);
        assert_eq!(settings.jitter_amount, 2);
        assert_eq!(settings.movement_delay_micros, 100);
        assert_eq!(settings.movement_style, MovementStyle::Bezier);
        assert!(settings.enabled);
    }

    #[test]
    fn test_direct_preset() {
        let settings = Settings::direct();
        assert_eq!(settings.humanization_level, 0);
        assert_eq!(settings.jitter_amount, 0);
        assert_eq!(settings.movement_style, MovementStyle::Direct);
    }

    #[test]
    fn test_style_from_index_clamps() {
        assert_eq!(MovementStyle::from_index(-3), MovementStyle::Direct);
        assert_eq!(MovementStyle::from_index(1), MovementStyle::Bezier);
        assert_eq!(MovementStyle::from_index(7), MovementStyle::Random);
        assert_eq!(MovementStyle::Random.index(), 2);
    }

    #[test]
    fn test_from_json_clamps_and_defaults() {
        let settings = Settings::from_json(
            r#"{"humanization_level": 40, "path_deviation": 3.5, "movement_delay_micros": 99999}"#,
        )
        .unwrap();

        assert_eq!(settings.humanization_level, MAX_HUMANIZATION_LEVEL);
        assert_eq!(settings.path_deviation, 1.0);
        assert_eq!(settings.movement_delay_micros, MAX_MOVEMENT_DELAY_MICROS);
        // Missing fields fall back to defaults
        assert_eq!(settings.jitter_amount, 2);
        assert!(settings.enabled);
    }

    #[test]
    fn test_from_json_clamps_values_outside_storage_type() {
        let settings = Settings::from_json(
            r#"{"humanization_level": 300, "jitter_amount": -1, "movement_delay_micros": -5}"#,
        )
        .unwrap();
        assert_eq!(settings.humanization_level, MAX_HUMANIZATION_LEVEL);
        assert_eq!(settings.jitter_amount, 0);
        assert_eq!(settings.movement_delay_micros, 0);

        let settings = Settings::from_json(
            r#"{"humanization_level": -70000000000, "jitter_amount": 4294967296, "movement_delay_micros": 9000000000}"#,
        )
        .unwrap();
        assert_eq!(settings.humanization_level, 0);
        assert_eq!(settings.jitter_amount, MAX_JITTER_AMOUNT);
        assert_eq!(settings.movement_delay_micros, MAX_MOVEMENT_DELAY_MICROS);
    }

    #[test]
    fn test_from_json_keeps_style_and_enabled() {
        let settings =
            Settings::from_json(r#"{"movement_style": "Random", "enabled": false}"#).unwrap();
        assert_eq!(settings.movement_style, MovementStyle::Random);
        assert!(!settings.enabled);
        assert_eq!(settings.humanization_level, 5);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Settings::from_json("[1, 2").is_err());
    }

    #[test]
    fn test_nan_deviation_clamps_to_zero() {
        assert_eq!(clamp_deviation(f64::NAN), 0.0);
        assert_eq!(clamp_deviation(-0.5), 0.0);
        assert_eq!(clamp_deviation(0.25), 0.25);
    }
}
