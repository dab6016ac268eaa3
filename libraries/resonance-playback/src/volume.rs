//! Volume control
//!
//! Level is a linear gain in [0, 1], the scale browser-style media outputs
//! accept directly. Mute is tracked separately so the level survives it.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller, clamping `level` into range
    pub fn new(level: f32) -> Self {
        Self {
            level: clamp_level(level),
            muted: false,
        }
    }

    /// Set volume level (clamped to 0.0-1.0; NaN becomes 0.0)
    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain to hand to the media output
    ///
    /// Returns 0.0 if muted, otherwise the level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.5)
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
