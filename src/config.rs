//! Game tunables. Defaults match the shipped game; the `serde` feature lets a
//! host page override them with JSON.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Top-level game configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GameConfig {
    /// Countdown length per question, in whole seconds.
    pub question_seconds: u32,
    /// How long a freshly unlocked level box stays highlighted.
    pub unlock_flash_ms: u32,
    /// Optional link shown after the final level is cleared.
    pub farewell_link: Option<String>,
    pub confetti: ConfettiConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            question_seconds: 10,
            unlock_flash_ms: 700,
            farewell_link: None,
            confetti: ConfettiConfig::default(),
        }
    }
}

/// Shape of one confetti burst. Ranges are half-open `[min, max)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ConfettiConfig {
    pub particle_count: usize,
    pub duration_ms: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_tilt_increment: f64,
    pub max_tilt_increment: f64,
    pub tilt_amplitude: f64,
    /// Upper bound for the random drift phase.
    pub phase_range: f64,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            particle_count: 150,
            duration_ms: 3000.0,
            min_radius: 4.0,
            max_radius: 10.0,
            min_tilt_increment: 0.05,
            max_tilt_increment: 0.12,
            tilt_amplitude: 15.0,
            phase_range: 150.0,
        }
    }
}

#[cfg(feature = "serde_json")]
impl GameConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, crate::QuizError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), crate::QuizError> {
        use crate::QuizError::Config;
        if self.question_seconds == 0 {
            return Err(Config("question_seconds must be at least 1".into()));
        }
        let c = &self.confetti;
        if c.min_radius >= c.max_radius {
            return Err(Config("confetti radius range is empty".into()));
        }
        if c.min_tilt_increment >= c.max_tilt_increment {
            return Err(Config("confetti tilt increment range is empty".into()));
        }
        if c.duration_ms <= 0.0 || c.phase_range <= 0.0 {
            return Err(Config("confetti duration and phase range must be positive".into()));
        }
        Ok(())
    }
}
